//! Hostile agents
//!
//! `Pursuer` is a tagged variant so new enemy kinds can be added next to `Grunt`
//! without touching the session loop. Every variant answers the same capability
//! set: take damage, update against obstacles and a target, report death, and
//! expose what a renderer needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::resolve;
use super::health::Health;
use crate::settings::GruntSettings;

/// What a renderer needs to draw a pursuer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuerView {
    pub body: Body,
    pub hp_ratio: f32,
    pub kind: PursuerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuerKind {
    Grunt,
}

/// Basic chaser: walks straight at the target and hits on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grunt {
    pub body: Body,
    pub health: Health,
    pub speed: f32,
    pub attack_damage: i32,
    pub attack_cooldown: u64,
    pub last_attack: Option<u64>,
    pub detection_radius: f32,
}

impl Grunt {
    pub fn new(origin: Vec2, settings: &GruntSettings) -> Self {
        Self {
            body: Body::new(origin.x, origin.y, settings.size, settings.size),
            health: Health::new(settings.max_hp),
            speed: settings.speed,
            attack_damage: settings.attack_damage,
            attack_cooldown: settings.attack_cooldown_frames,
            last_attack: None,
            detection_radius: settings.detection_radius,
        }
    }

    fn update(&mut self, obstacles: &[Body], target: &Body, target_health: &mut Health, now: u64) {
        let to_target = target.center() - self.body.center();
        let dist = to_target.length();

        if dist != 0.0 && dist < self.detection_radius {
            let step = to_target / dist * self.speed;
            self.body = resolve(self.body, step.x, step.y, obstacles);
        }

        if self.body.overlaps(target) {
            let ready = self
                .last_attack
                .is_none_or(|t| now.saturating_sub(t) > self.attack_cooldown);
            if ready && !target_health.is_dead() {
                target_health.take_damage(self.attack_damage);
                self.last_attack = Some(now);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Pursuer {
    Grunt(Grunt),
}

impl Pursuer {
    pub fn grunt(origin: Vec2, settings: &GruntSettings) -> Self {
        Pursuer::Grunt(Grunt::new(origin, settings))
    }

    pub fn kind(&self) -> PursuerKind {
        match self {
            Pursuer::Grunt(_) => PursuerKind::Grunt,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Pursuer::Grunt(g) => &g.body,
        }
    }

    pub fn health(&self) -> &Health {
        match self {
            Pursuer::Grunt(g) => &g.health,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        match self {
            Pursuer::Grunt(g) => g.health.take_damage(amount),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health().is_dead()
    }

    /// Chase `target` through `obstacles`, hurting it on contact
    pub fn update(&mut self, obstacles: &[Body], target: &Body, target_health: &mut Health, now: u64) {
        match self {
            Pursuer::Grunt(g) => g.update(obstacles, target, target_health, now),
        }
    }

    pub fn view(&self) -> PursuerView {
        PursuerView {
            body: *self.body(),
            hp_ratio: self.health().ratio(),
            kind: self.kind(),
        }
    }
}

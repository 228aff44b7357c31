//! Mountable turrets and their projectiles
//!
//! A turret can be held by one operator at a time (`busy`). The live actor drives
//! its aim while `mounted`; ghosts only take the seat. Firing is gated by a
//! cooldown in frames and every successful shot is reported so it can be logged.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::pursuer::Pursuer;
use crate::consts::{PROJECTILE_SIZE, TILE_SIZE};
use crate::direction_from_angle;

/// Stable turret identity, assigned at level load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurretId(pub u32);

impl fmt::Display for TurretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turret#{}", self.0)
    }
}

/// A successful shot, as recorded in the action log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub turret: TurretId,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub vel: Vec2,
    pub damage: i32,
    pub active: bool,
}

impl Projectile {
    /// Spawn centered on `origin`, heading along `angle`
    pub fn new(origin: Vec2, angle: f32, speed: f32, damage: i32) -> Self {
        Self {
            body: Body::centered(origin, PROJECTILE_SIZE, PROJECTILE_SIZE),
            vel: direction_from_angle(angle) * speed,
            damage,
            active: true,
        }
    }

    /// Advance one frame
    ///
    /// Leaving `bounds` or hitting an obstacle stops the projectile without
    /// damage. Otherwise the first living pursuer it overlaps takes the damage.
    /// Obstacles are checked first, so a shot into a wall never reaches an enemy
    /// behind it.
    pub fn update(&mut self, bounds: &Body, obstacles: &[Body], pursuers: &mut [Pursuer]) {
        if !self.active {
            return;
        }
        self.body.pos += self.vel;

        if !self.body.overlaps(bounds) {
            self.active = false;
            return;
        }

        if obstacles.iter().any(|o| self.body.overlaps(o)) {
            self.active = false;
            return;
        }

        if let Some(target) = pursuers
            .iter_mut()
            .find(|p| !p.is_dead() && self.body.overlaps(p.body()))
        {
            target.take_damage(self.damage);
            self.active = false;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub id: TurretId,
    pub body: Body,
    /// Barrel direction in radians
    pub angle: f32,
    /// Operated by the live actor
    pub mounted: bool,
    /// Seat taken by anyone (live actor or ghost)
    pub busy: bool,
    pub last_fire: Option<u64>,
    pub cooldown: u64,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectiles: Vec<Projectile>,
}

impl Turret {
    pub fn new(id: TurretId, origin: Vec2, cooldown: u64, projectile_speed: f32, projectile_damage: i32) -> Self {
        Self {
            id,
            body: Body::new(origin.x, origin.y, TILE_SIZE, TILE_SIZE),
            angle: 0.0,
            mounted: false,
            busy: false,
            last_fire: None,
            cooldown,
            projectile_speed,
            projectile_damage,
            projectiles: Vec::new(),
        }
    }

    /// Take the seat; fails if anyone already holds it
    pub fn try_mount(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Leave the seat
    pub fn release(&mut self) {
        self.busy = false;
        self.mounted = false;
    }

    pub fn in_range(&self, actor: &Body, range: f32) -> bool {
        actor.center().distance(self.body.center()) < range
    }

    pub fn can_fire(&self, now: u64) -> bool {
        self.last_fire
            .is_none_or(|t| now.saturating_sub(t) > self.cooldown)
    }

    /// Fire along the current aim
    ///
    /// Returns the shot for logging, or `None` while cooling down.
    pub fn fire(&mut self, now: u64) -> Option<Shot> {
        if !self.can_fire(now) {
            return None;
        }
        self.projectiles.push(Projectile::new(
            self.body.center(),
            self.angle,
            self.projectile_speed,
            self.projectile_damage,
        ));
        self.last_fire = Some(now);
        Some(Shot {
            turret: self.id,
            angle: self.angle,
        })
    }

    /// Advance every projectile and drop the spent ones
    pub fn update(&mut self, bounds: &Body, obstacles: &[Body], pursuers: &mut [Pursuer]) {
        for projectile in &mut self.projectiles {
            projectile.update(bounds, obstacles, pursuers);
        }
        self.projectiles.retain(|p| p.active);
    }
}

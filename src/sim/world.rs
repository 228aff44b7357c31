//! The live world of one attempt
//!
//! `World` owns every entity in the room. It is rebuilt from the `Level` at the
//! start of each attempt and passed by `&mut` to each subsystem in frame order.
//! Entity collections keep their load order for the whole attempt, so iteration
//! is stable and ids never move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{movement_step, resolve};
use super::door::{Door, DoorId};
use super::gate::{Button, ButtonId, Gate};
use super::health::Health;
use super::level::{Level, WallKind};
use super::pursuer::Pursuer;
use super::turret::{Shot, Turret, TurretId};
use crate::consts::TILE_SIZE;
use crate::settings::Settings;
use crate::{tile_center, tile_origin};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub body: Body,
    pub kind: WallKind,
}

/// The live, player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub body: Body,
    pub health: Health,
    /// Pixels per frame along one axis
    pub speed: f32,
    /// Turret currently operated, if any
    pub mounted: Option<TurretId>,
}

impl Actor {
    /// Hidden and frozen while operating a turret
    pub fn visible(&self) -> bool {
        self.mounted.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Frames simulated this attempt; the first simulated frame is 1
    pub frame: u64,
    /// The level's full grid extent; projectiles leaving it are dropped
    pub bounds: Body,
    pub actor: Actor,
    pub walls: Vec<Wall>,
    pub doors: Vec<Door>,
    pub buttons: Vec<Button>,
    pub gates: Vec<Gate>,
    pub turrets: Vec<Turret>,
    pub pursuers: Vec<Pursuer>,
}

impl World {
    /// Spawn everything the level describes
    pub fn from_level(level: &Level, settings: &Settings) -> Self {
        let tile = |origin: Vec2| Body::new(origin.x, origin.y, TILE_SIZE, TILE_SIZE);

        let walls = level
            .walls
            .iter()
            .map(|&(cell, kind)| Wall {
                body: tile(tile_origin(cell.col, cell.row)),
                kind,
            })
            .collect();

        let doors = level
            .doors
            .iter()
            .zip(0u32..)
            .map(|(&(cell, orientation), id)| Door::new(DoorId(id), cell.col, cell.row, orientation))
            .collect();

        let buttons: Vec<Button> = level
            .buttons
            .iter()
            .zip(0u32..)
            .map(|(&(cell, tag), id)| {
                Button::new(
                    ButtonId(id),
                    tile(tile_origin(cell.col, cell.row)),
                    tag,
                    settings.button_active_frames,
                )
            })
            .collect();

        let gates = level
            .gates
            .iter()
            .map(|&(cell, tag)| {
                let linked = buttons.iter().filter(|b| b.tag == tag).map(|b| b.id).collect();
                Gate::new(tile(tile_origin(cell.col, cell.row)), tag, linked)
            })
            .collect();

        let turrets = level
            .turrets
            .iter()
            .zip(0u32..)
            .map(|(&cell, id)| {
                Turret::new(
                    TurretId(id),
                    tile_origin(cell.col, cell.row),
                    settings.turret_cooldown_frames,
                    settings.projectile_speed,
                    settings.projectile_damage,
                )
            })
            .collect();

        let pursuers = level
            .grunts
            .iter()
            .map(|&cell| {
                let origin = tile_center(cell.col, cell.row) - Vec2::splat(settings.grunt.size / 2.0);
                Pursuer::grunt(origin, &settings.grunt)
            })
            .collect();

        let actor = Actor {
            body: Body::centered(
                tile_center(level.spawn.col, level.spawn.row),
                settings.actor_size,
                settings.actor_size,
            ),
            health: Health::new(settings.actor_max_hp),
            speed: settings.actor_speed,
            mounted: None,
        };

        let bounds = Body::new(
            0.0,
            0.0,
            level.width as f32 * TILE_SIZE,
            level.height as f32 * TILE_SIZE,
        );

        Self {
            frame: 0,
            bounds,
            actor,
            walls,
            doors,
            buttons,
            gates,
            turrets,
            pursuers,
        }
    }

    /// Everything that blocks movement right now
    ///
    /// Order is walls, then closed doors, then closed gates, each in load order.
    /// Recomputed on every call, so a door opened earlier this frame is already
    /// absent.
    pub fn obstacles(&self) -> Vec<Body> {
        self.walls
            .iter()
            .map(|w| w.body)
            .chain(self.doors.iter().filter_map(Door::obstacle))
            .chain(self.gates.iter().filter_map(Gate::obstacle))
            .collect()
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.id == id)
    }

    pub fn turret(&self, id: TurretId) -> Option<&Turret> {
        self.turrets.iter().find(|t| t.id == id)
    }

    pub fn turret_mut(&mut self, id: TurretId) -> Option<&mut Turret> {
        self.turrets.iter_mut().find(|t| t.id == id)
    }

    /// Walk the actor along `dir` (components in -1..=1)
    ///
    /// No-op while the actor is operating a turret.
    pub fn move_actor(&mut self, dir: Vec2) {
        if self.actor.mounted.is_some() || dir == Vec2::ZERO {
            return;
        }
        let step = movement_step(dir, self.actor.speed);
        let obstacles = self.obstacles();
        self.actor.body = resolve(self.actor.body, step.x, step.y, &obstacles);
    }

    /// Interact with every door whose anchor is within `range` of `who`
    ///
    /// Returns the ids of all doors triggered, whether or not they changed state.
    pub fn interact_doors(&mut self, who: &Body, range: f32) -> Vec<DoorId> {
        let mut triggered = Vec::new();
        for door in self.doors.iter_mut().filter(|d| d.in_range(who, range)) {
            if door.interact(who) {
                log::debug!("{} now {}", door.id, if door.open { "open" } else { "closed" });
            }
            triggered.push(door.id);
        }
        triggered
    }

    /// Press every button whose center is within `range` of `who`
    pub fn press_buttons_in_range(&mut self, who: &Body, range: f32) {
        let now = self.frame;
        for button in &mut self.buttons {
            if button.body.center_distance(who) < range {
                button.press(now);
            }
        }
    }

    /// Press every button overlapped by any of `bodies`
    pub fn press_buttons_under(&mut self, bodies: &[Body]) {
        let now = self.frame;
        for button in &mut self.buttons {
            if bodies.iter().any(|b| b.overlaps(&button.body)) {
                button.press(now);
            }
        }
    }

    /// Mount the first free turret in range (list order), or dismount the
    /// current one
    ///
    /// Returns the turret id when a mount or dismount happened (this is what gets
    /// logged), `None` when there was nothing to do.
    pub fn toggle_mount(&mut self, range: f32) -> Option<TurretId> {
        if let Some(id) = self.actor.mounted.take() {
            if let Some(turret) = self.turret_mut(id) {
                turret.release();
            }
            log::debug!("Actor left {}", id);
            return Some(id);
        }

        let actor_body = self.actor.body;
        let turret = self
            .turrets
            .iter_mut()
            .find(|t| !t.busy && t.in_range(&actor_body, range))?;
        if !turret.try_mount() {
            return None;
        }
        turret.mounted = true;
        let id = turret.id;
        let seat = turret.body.center();
        self.actor.body.set_center(seat);
        self.actor.mounted = Some(id);
        log::debug!("Actor mounted {}", id);
        Some(id)
    }

    /// Point the actor's turret at `angle`; no-op when not mounted
    pub fn aim_mounted(&mut self, angle: f32) {
        if let Some(id) = self.actor.mounted {
            if let Some(turret) = self.turret_mut(id) {
                turret.angle = angle;
            }
        }
    }

    /// Fire the actor's turret
    ///
    /// Returns the shot for logging; `None` when not mounted or on cooldown.
    pub fn fire_mounted(&mut self) -> Option<Shot> {
        let id = self.actor.mounted?;
        let now = self.frame;
        self.turret_mut(id)?.fire(now)
    }

    /// Advance every turret's projectiles
    pub fn update_turrets(&mut self) {
        let obstacles = self.obstacles();
        for turret in &mut self.turrets {
            turret.update(&self.bounds, &obstacles, &mut self.pursuers);
        }
    }

    /// Recompute every gate; `occupants` hold open gates they stand in
    pub fn update_gates(&mut self, occupants: Option<&[Body]>) {
        let now = self.frame;
        for gate in &mut self.gates {
            let was_open = gate.open;
            gate.update(&self.buttons, now, occupants);
            if gate.open != was_open {
                log::debug!("Gate {:?} now {}", gate.tag, if gate.open { "open" } else { "closed" });
            }
        }
    }

    /// Move pursuers toward the actor, then drop the dead
    pub fn update_pursuers(&mut self) {
        let now = self.frame;
        let obstacles = self.obstacles();
        let target = self.actor.body;
        for pursuer in self.pursuers.iter_mut().filter(|p| !p.is_dead()) {
            pursuer.update(&obstacles, &target, &mut self.actor.health, now);
        }
        let before = self.pursuers.len();
        self.pursuers.retain(|p| !p.is_dead());
        if self.pursuers.len() != before {
            log::debug!("{} pursuer(s) down", before - self.pursuers.len());
        }
    }
}

//! Ghostwalk - a top-down room simulation with recorded ghost runs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, interactables, replay, session)
//! - `settings`: Data-driven tunables
//! - `persistence`: Save slots for recorded runs

pub mod persistence;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;

    /// Grid cell edge length in pixels
    pub const TILE_SIZE: f32 = 50.0;
    /// Door sliver thickness (across the doorway)
    pub const DOOR_THICKNESS: f32 = 10.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 40.0;
    pub const ACTOR_SPEED: f32 = 5.0;
    pub const ACTOR_MAX_HP: i32 = 100;
    /// Max center-to-anchor distance for doors, buttons and turrets
    pub const INTERACT_RANGE: f32 = 60.0;

    /// Buttons stay active for 3 seconds after a press
    pub const BUTTON_ACTIVE_FRAMES: u64 = 3 * SIM_HZ as u64;

    /// Turret defaults
    pub const TURRET_COOLDOWN_FRAMES: u64 = 24;
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_DAMAGE: i32 = 50;

    /// Grunt defaults
    pub const GRUNT_SIZE: f32 = 35.0;
    pub const GRUNT_SPEED: f32 = 2.0;
    pub const GRUNT_MAX_HP: i32 = 50;
    pub const GRUNT_ATTACK_DAMAGE: i32 = 10;
    pub const GRUNT_ATTACK_COOLDOWN_FRAMES: u64 = 2 * SIM_HZ as u64;
    pub const GRUNT_DETECTION_RADIUS: f32 = 400.0;

    /// Sample the actor's location every N frames
    pub const LOCATION_SAMPLE_INTERVAL: u64 = 1;
    /// Number of save slots (and therefore concurrent ghosts)
    pub const SAVE_SLOTS: usize = 2;
}

/// Top-left corner of grid cell (col, row)
#[inline]
pub fn tile_origin(col: usize, row: usize) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_SIZE, row as f32 * consts::TILE_SIZE)
}

/// Center of grid cell (col, row)
#[inline]
pub fn tile_center(col: usize, row: usize) -> Vec2 {
    tile_origin(col, row) + Vec2::splat(consts::TILE_SIZE / 2.0)
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

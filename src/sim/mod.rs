//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, durations counted in frames
//! - Stable iteration order (load order, never hash order)
//! - No rendering or platform dependencies
//!
//! Identical inputs from identical state produce identical logs, which is what
//! makes ghost replay work.

pub mod body;
pub mod collision;
pub mod door;
pub mod gate;
pub mod ghost;
pub mod health;
pub mod history;
pub mod level;
pub mod pursuer;
pub mod state;
pub mod tick;
pub mod turret;
pub mod world;

pub use body::Body;
pub use collision::{first_overlap, movement_step, resolve};
pub use door::{Door, DoorId, DoorOrientation};
pub use gate::{Button, ButtonId, Gate};
pub use ghost::Ghost;
pub use health::Health;
pub use history::ActionLog;
pub use level::{Cell, DEMO_MAP, Level, LevelError, WallKind};
pub use pursuer::{Grunt, Pursuer, PursuerKind, PursuerView};
pub use state::{AttemptEnd, Phase, SaveChoice, SaveSlots, Session};
pub use tick::{TickInput, tick};
pub use turret::{Projectile, Shot, Turret, TurretId};
pub use world::{Actor, Wall, World};

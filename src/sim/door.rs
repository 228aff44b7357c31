//! Doors
//!
//! A door is a thin sliver across its grid cell. Closed doors are obstacles; open
//! doors are not.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::{DOOR_THICKNESS, TILE_SIZE};
use crate::{tile_center, tile_origin};

/// Stable door identity, assigned at level load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DoorId(pub u32);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door#{}", self.0)
    }
}

/// Which way the sliver runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorOrientation {
    /// Spans the cell left-to-right (door in a horizontal wall)
    Horizontal,
    /// Spans the cell top-to-bottom (door in a vertical wall)
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub body: Body,
    /// Interaction distance is measured to this point
    pub anchor: Vec2,
    pub orientation: DoorOrientation,
    pub open: bool,
}

impl Door {
    /// Build a closed door for grid cell (col, row)
    pub fn new(id: DoorId, col: usize, row: usize, orientation: DoorOrientation) -> Self {
        let origin = tile_origin(col, row);
        let offset = (TILE_SIZE - DOOR_THICKNESS) / 2.0;
        let body = match orientation {
            DoorOrientation::Horizontal => {
                Body::new(origin.x, origin.y + offset, TILE_SIZE, DOOR_THICKNESS)
            }
            DoorOrientation::Vertical => {
                Body::new(origin.x + offset, origin.y, DOOR_THICKNESS, TILE_SIZE)
            }
        };
        Self {
            id,
            body,
            anchor: tile_center(col, row),
            orientation,
            open: false,
        }
    }

    /// Toggle the door on behalf of `actor`
    ///
    /// Opening always succeeds. Closing is refused while `actor` stands in the
    /// doorway so nobody gets shut inside it. Returns whether the state changed.
    pub fn interact(&mut self, actor: &Body) -> bool {
        if !self.open {
            self.open = true;
            return true;
        }
        if actor.overlaps(&self.body) {
            return false;
        }
        self.open = false;
        true
    }

    /// Whether `actor` is close enough to reach the handle
    pub fn in_range(&self, actor: &Body, range: f32) -> bool {
        actor.center().distance(self.anchor) < range
    }

    /// Body to collide against this frame, if closed
    pub fn obstacle(&self) -> Option<Body> {
        (!self.open).then_some(self.body)
    }
}

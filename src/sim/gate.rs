//! Pressure buttons and the gates they hold open
//!
//! A button has no on/off state of its own: it remembers the frame it was last
//! pressed and is active for a fixed number of frames after that. A gate opens
//! once every button sharing its tag is active at the same time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::body::Body;

/// Stable button identity, assigned at level load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ButtonId(pub u32);

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    pub id: ButtonId,
    pub body: Body,
    /// Lowercase grid letter shared with the gates it drives
    pub tag: char,
    /// Frame of the most recent press
    pub last_pressed: Option<u64>,
    pub active_duration: u64,
}

impl Button {
    pub fn new(id: ButtonId, body: Body, tag: char, active_duration: u64) -> Self {
        Self {
            id,
            body,
            tag,
            last_pressed: None,
            active_duration,
        }
    }

    pub fn press(&mut self, now: u64) {
        self.last_pressed = Some(now);
    }

    pub fn is_active(&self, now: u64) -> bool {
        self.last_pressed
            .is_some_and(|t| now.saturating_sub(t) < self.active_duration)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub body: Body,
    /// Lowercase tag of the buttons that drive this gate
    pub tag: char,
    /// Linked buttons, in grid order
    pub buttons: Vec<ButtonId>,
    pub open: bool,
}

impl Gate {
    pub fn new(body: Body, tag: char, buttons: Vec<ButtonId>) -> Self {
        Self {
            body,
            tag,
            buttons,
            open: false,
        }
    }

    /// Whether every linked button is active this frame
    ///
    /// Linked ids missing from `buttons` count as inactive.
    pub fn all_active(&self, buttons: &[Button], now: u64) -> bool {
        self.buttons.iter().all(|id| {
            buttons
                .iter()
                .find(|b| b.id == *id)
                .is_some_and(|b| b.is_active(now))
        })
    }

    /// Recompute the open flag for this frame
    ///
    /// With `occupants`, an open gate stays open while any of them overlaps its
    /// footprint. With `None` it closes as soon as a button lapses.
    pub fn update(&mut self, buttons: &[Button], now: u64, occupants: Option<&[Body]>) {
        if self.all_active(buttons, now) {
            self.open = true;
            return;
        }
        if !self.open {
            return;
        }
        let blocked = occupants.is_some_and(|bodies| bodies.iter().any(|b| b.overlaps(&self.body)));
        if !blocked {
            self.open = false;
        }
    }

    /// Body to collide against this frame, if closed
    pub fn obstacle(&self) -> Option<Body> {
        (!self.open).then_some(self.body)
    }
}

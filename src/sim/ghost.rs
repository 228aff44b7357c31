//! Ghost replay of a saved action log
//!
//! A ghost owns no cursor: each frame it looks the current frame index up in
//! every map of its log. Entries are re-executed against the live world, not a
//! private copy, so a ghost replays *triggers*, not guaranteed outcomes. A door
//! the live actor already opened will be closed by a ghost that recorded opening
//! it, and two ghosts may fight over the same turret.

use glam::Vec2;

use super::body::Body;
use super::history::ActionLog;
use super::turret::TurretId;
use super::world::World;

#[derive(Debug, Clone)]
pub struct Ghost {
    log: ActionLog,
    pub body: Body,
    /// Shown, and counted as a button presser and gate occupant
    pub visible: bool,
    /// Turret whose seat this ghost holds
    pub mounted: Option<TurretId>,
}

impl Ghost {
    /// Build a ghost from a recorded run
    ///
    /// The body is seeded at the first recorded location with the recording
    /// actor's size. A log with no locations gives a hidden ghost.
    pub fn new(log: ActionLog, size: f32) -> Self {
        let start = log.first_location();
        let pos = start.unwrap_or(Vec2::ZERO);
        Self {
            log,
            body: Body::new(pos.x, pos.y, size, size),
            visible: start.is_some(),
            mounted: None,
        }
    }

    /// Whether the recording has no entries at or after `frame`
    pub fn finished(&self, frame: u64) -> bool {
        self.log.last_frame().is_none_or(|last| frame > last)
    }

    /// Replay whatever was recorded for the world's current frame
    ///
    /// `range` is the interact reach used to press buttons on a replayed
    /// interact. Once the recording runs out the ghost leaves any seat it holds
    /// and disappears.
    pub fn update(&mut self, world: &mut World, range: f32) {
        let frame = world.frame;

        if self.finished(frame) {
            self.retire(world);
            return;
        }

        if let Some(&pos) = self.log.locations.get(&frame) {
            self.body.pos = pos;
            if self.mounted.is_none() {
                self.visible = true;
            }
        }

        if let Some(doors) = self.log.doors.get(&frame) {
            for &id in doors {
                if let Some(door) = world.door_mut(id) {
                    door.interact(&self.body);
                    log::debug!("Ghost touched {} (now open: {})", id, door.open);
                }
            }
            world.press_buttons_in_range(&self.body, range);
        }

        if let Some(&id) = self.log.cannons.get(&frame) {
            self.toggle_turret(world, id);
        }

        if let Some(shot) = self.log.shots.get(&frame) {
            if let Some(turret) = world.turret_mut(shot.turret) {
                turret.angle = shot.angle;
                if turret.fire(frame).is_none() {
                    log::debug!("Ghost shot from {} suppressed by cooldown", shot.turret);
                }
            }
        }
    }

    /// Leave the room for good: free the held seat and hide
    fn retire(&mut self, world: &mut World) {
        if let Some(id) = self.mounted.take() {
            if let Some(turret) = world.turret_mut(id) {
                turret.busy = false;
            }
        }
        if self.visible {
            log::debug!("Ghost recording ended on frame {}", world.frame);
            self.visible = false;
        }
    }

    /// Enter or leave a turret's seat
    ///
    /// Entering needs a free seat; leaving only releases the seat this ghost holds.
    fn toggle_turret(&mut self, world: &mut World, id: TurretId) {
        let Some(turret) = world.turret_mut(id) else {
            return;
        };
        match self.mounted {
            Some(held) if held == id => {
                turret.busy = false;
                self.mounted = None;
                self.visible = true;
            }
            Some(_) => {}
            None => {
                if turret.try_mount() {
                    self.mounted = Some(id);
                    self.visible = false;
                } else {
                    log::debug!("Ghost could not take {}: busy", id);
                }
            }
        }
    }
}

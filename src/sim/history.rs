//! Action log of one attempt
//!
//! Four sparse maps keyed by frame index. Only discrete triggers are stored (door
//! interactions, turret mounts, shots) plus a periodic location sample; ghosts
//! rebuild a run by replaying these against the live world.
//!
//! This struct is also the save format: it serializes to JSON as-is.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::door::DoorId;
use super::turret::{Shot, TurretId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Doors in reach on each interact frame; an empty list still marks the
    /// interact, which may have pressed buttons
    #[serde(default)]
    pub doors: BTreeMap<u64, Vec<DoorId>>,
    /// Turret mounted or dismounted on each frame
    #[serde(default)]
    pub cannons: BTreeMap<u64, TurretId>,
    /// Successful shots
    #[serde(default)]
    pub shots: BTreeMap<u64, Shot>,
    /// Actor position samples (top-left)
    #[serde(default)]
    pub locations: BTreeMap<u64, Vec2>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interact and the doors it reached
    pub fn record_doors(&mut self, frame: u64, doors: Vec<DoorId>) {
        self.doors.entry(frame).or_default().extend(doors);
    }

    pub fn record_cannon(&mut self, frame: u64, turret: TurretId) {
        self.cannons.insert(frame, turret);
    }

    pub fn record_shot(&mut self, frame: u64, shot: Shot) {
        self.shots.insert(frame, shot);
    }

    pub fn record_location(&mut self, frame: u64, pos: Vec2) {
        self.locations.insert(frame, pos);
    }

    /// Whether `frame` gets a location sample
    ///
    /// Frame 1 is always sampled so a replay has a starting point.
    pub fn samples_location(frame: u64, interval: u64) -> bool {
        frame == 1 || (frame > 0 && interval > 0 && frame % interval == 0)
    }

    /// Earliest recorded position
    pub fn first_location(&self) -> Option<Vec2> {
        self.locations.values().next().copied()
    }

    /// Last frame with any entry
    pub fn last_frame(&self) -> Option<u64> {
        [
            self.doors.keys().next_back(),
            self.cannons.keys().next_back(),
            self.shots.keys().next_back(),
            self.locations.keys().next_back(),
        ]
        .into_iter()
        .flatten()
        .max()
        .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
            && self.cannons.is_empty()
            && self.shots.is_empty()
            && self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_schedule() {
        assert!(ActionLog::samples_location(1, 10));
        assert!(!ActionLog::samples_location(2, 10));
        assert!(ActionLog::samples_location(10, 10));
        assert!(ActionLog::samples_location(7, 1));
        assert!(!ActionLog::samples_location(0, 10));
        assert!(!ActionLog::samples_location(0, 1));
    }

    #[test]
    fn test_interact_without_doors_is_recorded() {
        let mut log = ActionLog::new();
        log.record_doors(3, Vec::new());
        assert_eq!(log.doors[&3], Vec::<DoorId>::new());
        log.record_doors(3, vec![DoorId(1)]);
        log.record_doors(3, vec![DoorId(2)]);
        assert_eq!(log.doors[&3], vec![DoorId(1), DoorId(2)]);
    }

    #[test]
    fn test_first_and_last() {
        let mut log = ActionLog::new();
        log.record_location(5, Vec2::new(1.0, 2.0));
        log.record_location(1, Vec2::new(3.0, 4.0));
        log.record_cannon(9, TurretId(0));
        assert_eq!(log.first_location(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(log.last_frame(), Some(9));
    }

    #[test]
    fn test_json_schema() {
        let mut log = ActionLog::new();
        log.record_doors(2, vec![DoorId(0)]);
        log.record_shot(
            4,
            Shot {
                turret: TurretId(1),
                angle: 0.5,
            },
        );
        log.record_location(1, Vec2::new(10.0, 10.0));

        let text = serde_json::to_string(&log).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["doors"]["2"], serde_json::json!([0]));
        assert_eq!(json["shots"]["4"]["turret"], serde_json::json!(1));
        assert_eq!(json["locations"]["1"], serde_json::json!([10.0, 10.0]));

        let back: ActionLog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, log);
    }
}

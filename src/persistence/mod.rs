//! Save slot persistence
//!
//! Both slots go into one versioned JSON envelope. Each slot holds at most one
//! recorded run in the `ActionLog` schema. Writes go to a temp file first and
//! are renamed into place, so a crash mid-save leaves the previous file intact.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SaveSlots;

/// Current envelope version
pub const SLOT_FILE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("slot file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("slot file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("slot file version {found} is not supported (expected {SLOT_FILE_VERSION})")]
    UnsupportedVersion { found: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct SlotFile {
    version: u32,
    slots: SaveSlots,
}

/// Encode slots as the on-disk JSON envelope
pub fn encode_slots(slots: &SaveSlots) -> Result<String, PersistError> {
    let file = SlotFile {
        version: SLOT_FILE_VERSION,
        slots: slots.clone(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Decode the on-disk JSON envelope
pub fn decode_slots(json: &str) -> Result<SaveSlots, PersistError> {
    let file: SlotFile = serde_json::from_str(json)?;
    if file.version != SLOT_FILE_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: file.version,
        });
    }
    Ok(file.slots)
}

/// Write both slots to `path`
pub fn save_slots(path: impl AsRef<Path>, slots: &SaveSlots) -> Result<(), PersistError> {
    let path = path.as_ref();
    let json = encode_slots(slots)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    log::info!("Saved {} slot(s) to {}", slots.filled().count(), path.display());
    Ok(())
}

/// Read slots from `path`
///
/// A missing file is not an error: it yields empty slots.
pub fn load_slots(path: impl AsRef<Path>) -> Result<SaveSlots, PersistError> {
    let path = path.as_ref();
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No slot file at {}, starting empty", path.display());
            return Ok(SaveSlots::new());
        }
        Err(e) => return Err(e.into()),
    };
    let slots = decode_slots(&json)?;
    log::info!("Loaded {} slot(s) from {}", slots.filled().count(), path.display());
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ActionLog, DoorId};
    use glam::Vec2;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ghostwalk_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_round_trip_through_disk() {
        let mut log = ActionLog::new();
        log.record_location(1, Vec2::new(105.0, 55.0));
        log.record_doors(12, vec![DoorId(0), DoorId(2)]);
        let mut slots = SaveSlots::new();
        slots.store(1, log);

        let path = temp_path("round_trip");
        save_slots(&path, &slots).unwrap();
        let loaded = load_slots(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, slots);
        assert!(loaded.get(0).is_none());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let loaded = load_slots(temp_path("missing")).unwrap();
        assert_eq!(loaded.filled().count(), 0);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let json = r#"{ "version": 99, "slots": { "slots": [null, null] } }"#;
        assert!(matches!(
            decode_slots(json),
            Err(PersistError::UnsupportedVersion { found: 99 })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode_slots("not json"), Err(PersistError::Json(_))));
    }
}

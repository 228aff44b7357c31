//! Level grid decoding
//!
//! Levels are rectangular grids of characters, one per tile:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `.` or space | floor |
//! | `W` | wall |
//! | `H` | hazard wall (blocks like a wall, drawn differently) |
//! | `D` | door; horizontal when both side neighbours are walls, else vertical |
//! | `G` | grunt spawn |
//! | `T` | turret |
//! | `P` | actor spawn (exactly one) |
//! | `a`..`z` | pressure button with that tag |
//! | other `A`..`Z` | gate opened by the buttons tagged with its lowercase |
//!
//! The editor's export format (`"WWW..W",` one row per line) is accepted as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::door::DoorOrientation;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallKind {
    #[default]
    Solid,
    Hazard,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {ch:?} at column {col}, row {row}")]
    UnknownTile { ch: char, col: usize, row: usize },

    #[error("level has no actor spawn ('P')")]
    MissingSpawn,

    #[error("second actor spawn at {second:?}, first at {first:?}")]
    DuplicateSpawn { first: Cell, second: Cell },

    #[error("gate {tag:?} at {cell:?} has no buttons")]
    UnlinkedGate { tag: char, cell: Cell },
}

/// A decoded level: where everything spawns at the start of an attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    pub walls: Vec<(Cell, WallKind)>,
    pub doors: Vec<(Cell, DoorOrientation)>,
    pub buttons: Vec<(Cell, char)>,
    pub gates: Vec<(Cell, char)>,
    pub turrets: Vec<Cell>,
    pub grunts: Vec<Cell>,
    pub spawn: Cell,
}

/// Small room used by the demo driver
pub const DEMO_MAP: &[&str] = &[
    "WWWWWWWWWWWWWWWWWWWW",
    "W..................W",
    "W...P.......a......W",
    "W........WWWW......W",
    "W...........W...G..W",
    "W.....D.....W......W",
    "WWWWWW......W......W",
    "W...........WWWAWWWW",
    "W....WWWWWWWW......W",
    "W...T..........b...W",
    "WWWWWWWWWWWWWWWWWWWW",
];

impl Level {
    /// Decode a level from its text form
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text
            .lines()
            .map(clean_line)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    /// Decode a level from already-split rows
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let height = grid.len();
        let width = grid.first().map(Vec::len).ok_or(LevelError::Empty)?;
        if width == 0 {
            return Err(LevelError::Empty);
        }
        for (row, line) in grid.iter().enumerate() {
            if line.len() != width {
                return Err(LevelError::Ragged {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
        }

        let is_wall = |col: Option<usize>, row: usize| -> bool {
            col.and_then(|c| grid[row].get(c))
                .is_some_and(|&ch| matches!(ch, 'W' | 'H'))
        };

        let mut walls = Vec::new();
        let mut doors = Vec::new();
        let mut buttons = Vec::new();
        let mut gates = Vec::new();
        let mut turrets = Vec::new();
        let mut grunts = Vec::new();
        let mut spawn: Option<Cell> = None;

        for (row, line) in grid.iter().enumerate() {
            for (col, &ch) in line.iter().enumerate() {
                let cell = Cell::new(col, row);
                match ch {
                    '.' | ' ' => {}
                    'W' => walls.push((cell, WallKind::Solid)),
                    'H' => walls.push((cell, WallKind::Hazard)),
                    'D' => {
                        let orientation = if is_wall(col.checked_sub(1), row) && is_wall(Some(col + 1), row) {
                            DoorOrientation::Horizontal
                        } else {
                            DoorOrientation::Vertical
                        };
                        doors.push((cell, orientation));
                    }
                    'G' => grunts.push(cell),
                    'T' => turrets.push(cell),
                    'P' => {
                        if let Some(first) = spawn {
                            return Err(LevelError::DuplicateSpawn { first, second: cell });
                        }
                        spawn = Some(cell);
                    }
                    c if c.is_ascii_lowercase() => buttons.push((cell, c)),
                    c if c.is_ascii_uppercase() => gates.push((cell, c.to_ascii_lowercase())),
                    c => return Err(LevelError::UnknownTile { ch: c, col, row }),
                }
            }
        }

        let spawn = spawn.ok_or(LevelError::MissingSpawn)?;

        if let Some(&(cell, tag)) = gates
            .iter()
            .find(|(_, tag)| !buttons.iter().any(|(_, b)| b == tag))
        {
            return Err(LevelError::UnlinkedGate { tag, cell });
        }

        log::info!(
            "Level {}x{}: {} walls, {} doors, {} buttons, {} gates, {} turrets, {} grunts",
            width,
            height,
            walls.len(),
            doors.len(),
            buttons.len(),
            gates.len(),
            turrets.len(),
            grunts.len()
        );

        Ok(Self {
            width,
            height,
            walls,
            doors,
            buttons,
            gates,
            turrets,
            grunts,
            spawn,
        })
    }

    /// The built-in demo room
    pub fn demo() -> Result<Self, LevelError> {
        Self::from_rows(DEMO_MAP)
    }
}

/// Strip the editor's quoting (`"...",`) and surrounding whitespace
fn clean_line(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line);
    line.strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(line)
}

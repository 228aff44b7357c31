//! Session state and attempt lifecycle
//!
//! A session runs attempts back to back on one level. Each attempt gets a fresh
//! `World`, a fresh `ActionLog` and one ghost per filled save slot. When an
//! attempt ends (restart or death) its log is held for the save prompt; nothing
//! simulates until the prompt is answered.

use serde::{Deserialize, Serialize};

use super::ghost::Ghost;
use super::history::ActionLog;
use super::level::Level;
use super::world::World;
use crate::consts::SAVE_SLOTS;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Frames are being simulated
    Playing,
    /// Attempt over, waiting for a save choice; the frame counter is frozen
    SavePrompt,
    /// Operator asked to quit
    Quit,
}

/// Answer to the save prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Slot1,
    Slot2,
    Discard,
}

impl SaveChoice {
    fn slot(self) -> Option<usize> {
        match self {
            SaveChoice::Slot1 => Some(0),
            SaveChoice::Slot2 => Some(1),
            SaveChoice::Discard => None,
        }
    }
}

/// Why an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptEnd {
    Restart,
    ActorDied,
}

/// Recorded runs kept between attempts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveSlots {
    slots: [Option<ActionLog>; SAVE_SLOTS],
}

impl SaveSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&ActionLog> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Store `log` in `slot`, replacing whatever was there; out-of-range is a no-op
    pub fn store(&mut self, slot: usize, log: ActionLog) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(log);
        }
    }

    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// Filled slots in slot order
    pub fn filled(&self) -> impl Iterator<Item = &ActionLog> {
        self.slots.iter().flatten()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    level: Level,
    /// Live state of the current attempt
    pub world: World,
    /// Recording of the current attempt
    pub log: ActionLog,
    pub ghosts: Vec<Ghost>,
    pub slots: SaveSlots,
    pub phase: Phase,
    /// Finished attempt awaiting a save choice
    pending: Option<ActionLog>,
    /// 1-based attempt counter
    pub attempt: u32,
}

impl Session {
    pub fn new(level: Level, settings: Settings) -> Self {
        Self::with_slots(level, settings, SaveSlots::new())
    }

    /// Start a session with previously saved runs already loaded as ghosts
    pub fn with_slots(level: Level, settings: Settings, slots: SaveSlots) -> Self {
        let world = World::from_level(&level, &settings);
        let mut session = Self {
            settings,
            level,
            world,
            log: ActionLog::new(),
            ghosts: Vec::new(),
            slots,
            phase: Phase::Playing,
            pending: None,
            attempt: 0,
        };
        session.start_attempt();
        session
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Current frame index of the attempt
    pub fn frame(&self) -> u64 {
        self.world.frame
    }

    /// The finished attempt's log, while the save prompt is up
    pub fn pending_log(&self) -> Option<&ActionLog> {
        self.pending.as_ref()
    }

    /// Throw away all live state and begin a new attempt at frame 0
    fn start_attempt(&mut self) {
        self.world = World::from_level(&self.level, &self.settings);
        self.log = ActionLog::new();
        self.ghosts = self
            .slots
            .filled()
            .map(|log| Ghost::new(log.clone(), self.settings.actor_size))
            .collect();
        self.attempt += 1;
        self.phase = Phase::Playing;
        log::info!("Attempt {} started with {} ghost(s)", self.attempt, self.ghosts.len());
    }

    /// Finish the current attempt and raise the save prompt
    pub fn end_attempt(&mut self, reason: AttemptEnd) {
        if self.phase != Phase::Playing {
            return;
        }
        log::info!(
            "Attempt {} ended after {} frames ({:?})",
            self.attempt,
            self.world.frame,
            reason
        );
        self.pending = Some(std::mem::take(&mut self.log));
        self.phase = Phase::SavePrompt;
    }

    /// Answer the save prompt and start the next attempt
    ///
    /// Returns `false` (and does nothing) when no prompt is up.
    pub fn resolve_prompt(&mut self, choice: SaveChoice) -> bool {
        if self.phase != Phase::SavePrompt {
            return false;
        }
        let finished = self.pending.take().unwrap_or_default();
        match choice.slot() {
            Some(slot) => {
                log::info!("Saved attempt {} to slot {}", self.attempt, slot + 1);
                self.slots.store(slot, finished);
            }
            None => log::info!("Attempt {} discarded", self.attempt),
        }
        self.start_attempt();
        true
    }

    pub fn quit(&mut self) {
        log::info!("Quit after {} attempt(s)", self.attempt);
        self.phase = Phase::Quit;
    }
}

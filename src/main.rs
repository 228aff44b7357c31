//! Ghostwalk headless driver
//!
//! Runs a few attempts on a level with seeded random-walk input, saving each run
//! to a slot so later attempts share the room with ghosts.
//!
//! Usage: `ghostwalk [LEVEL_FILE] [SETTINGS_FILE] [SLOT_FILE]`
//!
//! Set `RUST_LOG=debug` to see door toggles, mounts and ghost replays.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ghostwalk::Settings;
use ghostwalk::persistence::{load_slots, save_slots};
use ghostwalk::sim::{Level, Phase, SaveChoice, Session, TickInput, tick};

/// Frames per attempt (30 seconds)
const ATTEMPT_FRAMES: u64 = 30 * ghostwalk::consts::SIM_HZ as u64;
/// What to do with each finished attempt, in order
const PLAN: [SaveChoice; 3] = [SaveChoice::Slot1, SaveChoice::Slot2, SaveChoice::Discard];
const SEED: u64 = 0x6057_3a11;

/// Random walk that holds a heading for a while before turning
struct Wanderer {
    rng: Pcg32,
    heading: Vec2,
}

impl Wanderer {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            heading: Vec2::ZERO,
        }
    }

    fn next(&mut self, mounted: bool) -> TickInput {
        if self.rng.random_bool(0.05) {
            self.heading = Vec2::new(
                self.rng.random_range(-1..=1) as f32,
                self.rng.random_range(-1..=1) as f32,
            );
        }
        TickInput {
            move_dir: self.heading,
            interact: self.rng.random_bool(0.03),
            mount: self.rng.random_bool(if mounted { 0.02 } else { 0.01 }),
            fire: mounted && self.rng.random_bool(0.3),
            aim: mounted.then(|| self.rng.random_range(-std::f32::consts::PI..std::f32::consts::PI)),
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let level_path = args.next();
    let settings_path = args.next();
    let slot_path = args.next();

    let level = match &level_path {
        Some(path) => Level::parse(&std::fs::read_to_string(path)?)?,
        None => Level::demo()?,
    };

    let settings = settings_path.as_deref().map(Settings::load).unwrap_or_default();
    let slots = match &slot_path {
        Some(path) => load_slots(path)?,
        None => Default::default(),
    };

    let mut session = Session::with_slots(level, settings, slots);
    let level = session.level();
    log::info!(
        "Ghostwalk (headless) starting on a {}x{} level, {} door(s), {} turret(s), seed {:#x}",
        level.width,
        level.height,
        level.doors.len(),
        level.turrets.len(),
        SEED
    );

    for (n, choice) in PLAN.into_iter().enumerate() {
        let mut input = Wanderer::new(SEED + n as u64);
        while session.phase == Phase::Playing && session.frame() < ATTEMPT_FRAMES {
            let frame_input = input.next(session.world.actor.mounted.is_some());
            tick(&mut session, &frame_input);
        }
        if session.phase == Phase::Playing {
            tick(
                &mut session,
                &TickInput {
                    restart: true,
                    ..Default::default()
                },
            );
        }

        if let Some(log) = session.pending_log() {
            log::info!(
                "Attempt {}: {} interact(s), {} mount toggle(s), {} shot(s), {} location sample(s), {} pursuer(s) left",
                session.attempt,
                log.doors.len(),
                log.cannons.len(),
                log.shots.len(),
                log.locations.len(),
                session.world.pursuers.len(),
            );
        }
        session.resolve_prompt(choice);
    }

    tick(
        &mut session,
        &TickInput {
            quit: true,
            ..Default::default()
        },
    );

    if let Some(path) = &slot_path {
        save_slots(path, &session.slots)?;
    }
    Ok(())
}

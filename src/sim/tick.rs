//! Fixed timestep simulation tick
//!
//! Advances one frame in a fixed order. The order is part of the contract:
//! door and gate outcomes depend on who acts first, and a ghost's door toggle on
//! frame N is only seen by the live collision pass on frame N+1.
//!
//! 1. live actor movement
//! 2. live actor interactions (doors, buttons in reach, mount, fire)
//! 3. turret projectiles
//! 4. buttons under bodies, then gates
//! 5. pursuers
//! 6. ghosts
//! 7. location sample, death check

use glam::Vec2;

use super::body::Body;
use super::history::ActionLog;
use super::state::{AttemptEnd, Phase, Session};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent, each component in -1..=1
    pub move_dir: Vec2,
    /// Interact with doors and buttons in reach
    pub interact: bool,
    /// Mount or dismount a turret
    pub mount: bool,
    /// Fire while mounted (held)
    pub fire: bool,
    /// Turret aim angle in radians, if the pointer moved
    pub aim: Option<f32>,
    /// End this attempt and open the save prompt
    pub restart: bool,
    pub quit: bool,
}

/// Advance the session by one frame
///
/// Does nothing unless the session is `Playing`; the save prompt sits outside
/// the simulated timeline.
pub fn tick(session: &mut Session, input: &TickInput) {
    if session.phase != Phase::Playing {
        return;
    }
    if input.quit {
        session.quit();
        return;
    }
    if input.restart {
        session.end_attempt(AttemptEnd::Restart);
        return;
    }

    let range = session.settings.interact_range;
    let world = &mut session.world;
    world.frame += 1;
    let frame = world.frame;

    // 1. Movement
    world.move_actor(input.move_dir);

    // 2. Interactions
    if input.interact && world.actor.visible() {
        let actor = world.actor.body;
        let doors = world.interact_doors(&actor, range);
        session.log.record_doors(frame, doors);
        world.press_buttons_in_range(&actor, range);
    }
    if input.mount {
        if let Some(turret) = world.toggle_mount(range) {
            session.log.record_cannon(frame, turret);
        }
    }
    if let Some(angle) = input.aim {
        world.aim_mounted(angle);
    }
    if input.fire {
        if let Some(shot) = world.fire_mounted() {
            log::debug!("Frame {}: shot from {} at {:.3}", frame, shot.turret, shot.angle);
            session.log.record_shot(frame, shot);
        }
    }

    // 3. Projectiles
    world.update_turrets();

    // 4. Buttons and gates
    let bodies = occupants(session);
    let world = &mut session.world;
    world.press_buttons_under(&bodies);
    let hold = session.settings.gate_hysteresis.then_some(bodies.as_slice());
    world.update_gates(hold);

    // 5. Pursuers
    world.update_pursuers();

    // 6. Ghosts
    for ghost in &mut session.ghosts {
        ghost.update(world, range);
    }

    // 7. Recording and end of attempt
    if ActionLog::samples_location(frame, session.settings.location_sample_interval) {
        session.log.record_location(frame, world.actor.body.pos);
    }
    if world.actor.health.is_dead() {
        session.end_attempt(AttemptEnd::ActorDied);
    }
}

/// Bodies that press buttons and hold gates open: the visible actor, visible
/// ghosts and living pursuers
fn occupants(session: &Session) -> Vec<Body> {
    let world = &session.world;
    let actor = world.actor.visible().then_some(world.actor.body);
    actor
        .into_iter()
        .chain(session.ghosts.iter().filter(|g| g.visible).map(|g| g.body))
        .chain(world.pursuers.iter().filter(|p| !p.is_dead()).map(|p| *p.body()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::door::DoorId;
    use crate::sim::level::Level;
    use crate::sim::state::{SaveChoice, SaveSlots};
    use crate::sim::turret::TurretId;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn session(rows: &[&str]) -> Session {
        Session::new(Level::from_rows(rows).unwrap(), Settings::default())
    }

    fn run(session: &mut Session, input: &TickInput, frames: usize) {
        for _ in 0..frames {
            tick(session, input);
        }
    }

    fn walk(x: f32, y: f32) -> TickInput {
        TickInput {
            move_dir: Vec2::new(x, y),
            ..Default::default()
        }
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    const SOUTH_DOOR_ROOM: &[&str] = &["WWWWW", "W...W", "W...W", "W.P.W", "WWDWW"];

    #[test]
    fn test_south_door_scenario() {
        let mut s = session(SOUTH_DOOR_ROOM);
        let interact = press(|i| i.interact = true);

        tick(&mut s, &interact);
        assert!(s.world.doors[0].open);

        // Onto the door tile
        run(&mut s, &walk(0.0, 1.0), 8);
        assert!(s.world.actor.body.overlaps(&s.world.doors[0].body));

        // And back off
        run(&mut s, &walk(0.0, -1.0), 8);
        assert!(!s.world.actor.body.overlaps(&s.world.doors[0].body));

        tick(&mut s, &interact);
        assert!(!s.world.doors[0].open);

        assert_eq!(s.log.doors.len(), 2);
        assert!(s.log.doors.values().all(|ids| ids == &vec![DoorId(0)]));
    }

    #[test]
    fn test_closed_door_blocks_then_open_door_lets_through() {
        let mut s = session(SOUTH_DOOR_ROOM);
        run(&mut s, &walk(0.0, 1.0), 10);
        assert_eq!(s.world.actor.body.bottom(), s.world.doors[0].body.top());

        tick(&mut s, &press(|i| i.interact = true));
        run(&mut s, &walk(0.0, 1.0), 10);
        assert!(s.world.actor.body.bottom() > s.world.doors[0].body.bottom());
    }

    #[test]
    fn test_location_sampling_interval() {
        let level = Level::from_rows(SOUTH_DOOR_ROOM).unwrap();
        let settings = Settings {
            location_sample_interval: 10,
            ..Default::default()
        };
        let mut s = Session::new(level, settings);
        run(&mut s, &TickInput::default(), 25);
        let frames: Vec<u64> = s.log.locations.keys().copied().collect();
        assert_eq!(frames, vec![1, 10, 20]);
    }

    #[test]
    fn test_save_prompt_freezes_simulation() {
        let mut s = session(SOUTH_DOOR_ROOM);
        run(&mut s, &walk(1.0, 0.0), 5);
        tick(&mut s, &press(|i| i.restart = true));
        assert_eq!(s.phase, Phase::SavePrompt);

        let frame = s.frame();
        let pos = s.world.actor.body.pos;
        run(&mut s, &walk(-1.0, 0.0), 20);
        assert_eq!(s.frame(), frame);
        assert_eq!(s.world.actor.body.pos, pos);
        assert_eq!(s.pending_log().unwrap().locations.len(), 5);
    }

    #[test]
    fn test_quit() {
        let mut s = session(SOUTH_DOOR_ROOM);
        tick(&mut s, &press(|i| i.quit = true));
        assert_eq!(s.phase, Phase::Quit);
        assert_eq!(s.frame(), 0);
    }

    #[test]
    fn test_mount_and_fire_are_logged() {
        let mut s = session(&["WWWWWW", "WPT..W", "WWWWWW"]);
        tick(&mut s, &press(|i| i.mount = true));
        assert_eq!(s.world.actor.mounted, Some(TurretId(0)));

        let fire = press(|i| {
            i.fire = true;
            i.aim = Some(0.0);
        });
        run(&mut s, &fire, 30);

        assert_eq!(s.log.cannons.get(&1), Some(&TurretId(0)));
        // Fired on frame 2 and again once the 24-frame cooldown passed
        let shot_frames: Vec<u64> = s.log.shots.keys().copied().collect();
        assert_eq!(shot_frames, vec![2, 27]);
    }

    #[test]
    fn test_mount_with_nothing_in_range_logs_nothing() {
        let mut s = session(SOUTH_DOOR_ROOM);
        tick(&mut s, &press(|i| i.mount = true));
        assert!(s.log.cannons.is_empty());
    }

    #[test]
    fn test_gate_opens_while_button_held() {
        // Button 'a' under the actor, gate 'A' in the wall to the right
        let mut s = session(&["WWWWW", "WaPAW", "WWWWW"]);
        run(&mut s, &walk(-1.0, 0.0), 3);
        assert!(s.world.gates[0].open);

        // Leave the button and wait out its timer
        let active = s.settings.button_active_frames as usize;
        run(&mut s, &walk(1.0, 0.0), 2);
        run(&mut s, &TickInput::default(), active);
        assert!(!s.world.gates[0].open);
    }

    #[test]
    fn test_gate_held_open_by_occupant() {
        let settings = Settings {
            button_active_frames: 20,
            ..Default::default()
        };
        let level = Level::from_rows(&["WWWWWWW", "WaP.A.W", "WWWWWWW"]).unwrap();
        let mut s = Session::new(level, settings);

        run(&mut s, &walk(-1.0, 0.0), 2);
        assert!(s.world.gates[0].open);
        // Walk into the gate tile and stand there past the timer
        run(&mut s, &walk(1.0, 0.0), 20);
        assert!(s.world.actor.body.overlaps(&s.world.gates[0].body));
        run(&mut s, &TickInput::default(), 40);
        assert!(s.world.gates[0].open);
    }

    #[test]
    fn test_actor_death_ends_attempt() {
        let mut s = session(&["WWWWW", "WPG.W", "WWWWW"]);
        s.world.actor.health.current = 1;
        run(&mut s, &TickInput::default(), 20);
        assert_eq!(s.phase, Phase::SavePrompt);
        assert!(s.frame() < 20);
    }

    #[test]
    fn test_ghost_door_toggle_changes_live_path() {
        let mut s = session(SOUTH_DOOR_ROOM);
        // Record a run that opens the door on frame 1
        tick(&mut s, &press(|i| i.interact = true));
        tick(&mut s, &press(|i| i.restart = true));
        s.resolve_prompt(SaveChoice::Slot1);
        assert_eq!(s.ghosts.len(), 1);
        assert!(!s.world.doors[0].open);

        // The live actor just stands still; the ghost opens the door for them
        tick(&mut s, &TickInput::default());
        assert!(s.world.doors[0].open);
        assert!(s.log.doors.is_empty());
    }

    #[test]
    fn test_determinism() {
        fn random_run(seed: u64) -> Session {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut s = Session::new(Level::demo().unwrap(), Settings::default());
            for _ in 0..600 {
                let input = TickInput {
                    move_dir: Vec2::new(
                        rng.random_range(-1..=1) as f32,
                        rng.random_range(-1..=1) as f32,
                    ),
                    interact: rng.random_bool(0.05),
                    mount: rng.random_bool(0.02),
                    fire: rng.random_bool(0.5),
                    aim: Some(rng.random_range(-3.1..3.1)),
                    ..Default::default()
                };
                tick(&mut s, &input);
            }
            s
        }

        let a = random_run(7);
        let b = random_run(7);
        assert_eq!(a.log, b.log);
        assert_eq!(a.world.actor.body, b.world.actor.body);
        assert_eq!(a.frame(), b.frame());
    }

    fn restart_and_save(s: &mut Session, choice: SaveChoice) {
        tick(s, &press(|i| i.restart = true));
        s.resolve_prompt(choice);
    }

    #[test]
    fn test_ghost_replays_button_only_interact() {
        let mut s = session(&["WWWWWWW", "W.aP.AW", "WWWWWWW"]);
        tick(&mut s, &press(|i| i.interact = true));
        assert!(s.world.gates[0].open);
        assert_eq!(s.log.doors.get(&1), Some(&Vec::new()));

        restart_and_save(&mut s, SaveChoice::Slot1);
        assert!(!s.world.gates[0].open);

        // Replayed press lands after the gate pass, so the gate opens a frame later
        run(&mut s, &TickInput::default(), 2);
        assert!(s.world.buttons[0].is_active(s.frame()));
        assert!(s.world.gates[0].open);
    }

    #[test]
    fn test_finished_ghost_stops_holding_buttons() {
        let level = Level::from_rows(&["WWWWWWW", "WaP..AW", "WWWWWWW"]).unwrap();
        let settings = Settings {
            button_active_frames: 5,
            ..Default::default()
        };
        let mut s = Session::new(level, settings);

        // Recording ends standing on the button
        run(&mut s, &walk(-1.0, 0.0), 3);
        restart_and_save(&mut s, SaveChoice::Slot1);

        run(&mut s, &TickInput::default(), 4);
        assert!(s.world.gates[0].open);
        assert!(!s.ghosts[0].visible);

        run(&mut s, &TickInput::default(), 26);
        assert!(!s.world.gates[0].open);
    }

    #[test]
    fn test_empty_recording_gives_no_visible_ghost() {
        let mut s = session(&["aWWWW", "W.P.W", "WWAWW"]);
        restart_and_save(&mut s, SaveChoice::Slot1);
        assert_eq!(s.ghosts.len(), 1);

        run(&mut s, &TickInput::default(), 5);
        assert!(!s.ghosts[0].visible);
        assert!(s.world.buttons[0].last_pressed.is_none());
        assert!(!s.world.gates[0].open);
    }

    #[test]
    fn test_two_ghosts_share_door_and_turret() {
        let recording = |start: Vec2| {
            let mut log = ActionLog::new();
            log.record_location(1, start);
            log.record_doors(2, vec![DoorId(0)]);
            log.record_cannon(3, TurretId(0));
            log.record_location(6, start);
            log
        };
        let mut slots = SaveSlots::new();
        slots.store(0, recording(Vec2::new(105.0, 55.0)));
        slots.store(1, recording(Vec2::new(55.0, 55.0)));

        let level = Level::from_rows(&["WWWWW", "W.PTW", "WWDWW"]).unwrap();
        let mut s = Session::with_slots(level, Settings::default(), slots);
        assert_eq!(s.ghosts.len(), 2);

        tick(&mut s, &TickInput::default());
        assert_eq!(s.ghosts[0].body.pos, Vec2::new(105.0, 55.0));
        assert_eq!(s.ghosts[1].body.pos, Vec2::new(55.0, 55.0));

        // Both recorded opening the door; replayed together they cancel out
        tick(&mut s, &TickInput::default());
        assert!(!s.world.doors[0].open);

        // Only the first ghost gets the seat
        tick(&mut s, &TickInput::default());
        assert_eq!(s.ghosts[0].mounted, Some(TurretId(0)));
        assert!(!s.ghosts[0].visible);
        assert!(s.ghosts[1].mounted.is_none());
        assert!(s.ghosts[1].visible);
        assert!(s.world.turrets[0].busy);

        // Recordings over: the seat is freed
        run(&mut s, &TickInput::default(), 4);
        assert!(s.ghosts.iter().all(|g| !g.visible));
        assert!(!s.world.turrets[0].busy);
        assert!(s.log.doors.is_empty());
    }
}

//! Fixed timestep simulation tick
//!
//! `tick` is the only entry point that mutates a session. Every tuned rate
//! is a per-tick quantity, so there is no dt parameter; callers drive the
//! loop at the fixed logical rate. The step order inside a tick is part of
//! the behavioral contract:
//!
//! 1. classify gestures and fold them into the manual inputs
//! 2. flyer physics
//! 3. collision and lost-state update
//! 4. scoring queue
//! 5. obstacle scroll/expiry, barrier clears, spawn
//! 6. event-mode stop, then the fresh roll
//! 7. reset processing

use rand::Rng;

use super::collision;
use super::flyer::{FlyerControls, FlyerMode};
use super::gesture::{SensorState, classify};
use super::session::{GameSession, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest sensor snapshot, usually read from the glove mailbox
    pub sensor: SensorState,
    /// Flap trigger fired this tick (pointer press or equivalent)
    pub flap_pressed: bool,
    /// Flap input currently held down
    pub flap_held: bool,
    /// Stop-fall key held
    pub stop_fall: bool,
    /// Stop-event key held
    pub stop_event: bool,
    /// Clear-barriers key held
    pub clear_barriers: bool,
    /// Reset requested (button press or equivalent)
    pub reset: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.tick_count += 1;

    // Classify the sensor snapshot and OR it into the manual inputs.
    // Strong acceleration doubles as a flap in both the pressed and the
    // held sense, so a shaken glove flaps at most once until it calms.
    let flags = classify(&input.sensor);
    let accel_flap = input.sensor.accel_magnitude() > session.tuning.accel_flap_threshold;
    let flap_pressed = input.flap_pressed || accel_flap;
    let flap_held = input.flap_held || accel_flap;
    let stop_fall = input.stop_fall || flags.falling_stop;
    let stop_event = input.stop_event || flags.event_stop;
    let clear_barriers = input.clear_barriers || flags.barrier;
    let reset = input.reset || flags.reset;

    // Flyer physics; the first successful flap puts the session in the air
    let controls = FlyerControls {
        flap_pressed,
        flap_held,
        stop_fall,
        flap_gated: session.event_mode,
    };
    session.flyer.update(&controls, &session.tuning);
    if session.phase == SessionPhase::Idle && session.flyer.mode == FlyerMode::Flying {
        session.phase = SessionPhase::Flying;
        log::info!("first flap, session airborne");
    }

    // Collision ends the run, as does the floor landing the flyer detected
    // itself during physics
    if session.phase == SessionPhase::Flying {
        let flyer_box = session.flyer.bounds(&session.tuning);
        if collision::hit(
            &flyer_box,
            &session.field.pipes,
            &session.field.barriers,
            &session.tuning,
        ) {
            // a hit mid-ascent forces a fixed descent
            if session.flyer.vel < 0.0 {
                session.flyer.vel = session.tuning.hit_descent_speed;
            }
            session.lose();
        } else if session.flyer.mode == FlyerMode::Dead {
            session.lose();
        }
    }

    // Scoring queue, frozen once the run is lost
    if session.phase != SessionPhase::Lost && session.field.advance_score_queue(&session.tuning) {
        session.score += 1;
        log::debug!("score {}", session.score);
    }

    // Obstacles: the spawn clock ticks unconditionally; scrolling and
    // barrier clears stop once the run is lost; spawning needs the air
    session.field.advance_spawn_clock();
    if session.phase != SessionPhase::Lost {
        if clear_barriers {
            session.field.clear_barriers();
        }
        session.field.scroll_and_expire(&session.tuning);
    }
    if session.phase == SessionPhase::Flying && session.field.spawn_due(&session.tuning) {
        session.field.spawn(&mut session.rng, &session.tuning);
    }

    // Event mode: stop requests land before the fresh roll, so a roll of
    // zero can re-open the window on the very tick it was stopped
    if session.phase != SessionPhase::Lost && stop_event {
        session.event_mode = false;
    }
    if session.phase == SessionPhase::Flying
        && session.rng.random_range(0..=session.tuning.event_roll_max) == 0
    {
        if !session.event_mode {
            log::debug!("event window opened at tick {}", session.tick_count);
        }
        session.event_mode = true;
    }

    // Reset request; `restart` ignores it unless the run is lost
    if reset {
        session.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::GloveBarrier;
    use crate::tuning::Tuning;
    use glam::Vec3;

    /// Tuning that never auto-spawns and as good as never opens the event
    /// window, so scripted scenarios stay fully under test control
    fn scripted_tuning() -> Tuning {
        Tuning {
            spawn_interval_ticks: 1_000_000,
            event_roll_max: u32::MAX,
            ..Tuning::default()
        }
    }

    fn scripted_session(seed: u64) -> GameSession {
        let mut session = GameSession::with_tuning(seed, scripted_tuning());
        session.field.ticks_since_spawn = 0;
        session
    }

    fn flap_input() -> TickInput {
        TickInput {
            flap_pressed: true,
            flap_held: true,
            ..TickInput::default()
        }
    }

    /// Keeps an airborne flyer hovering at its current height; the stop
    /// event request keeps a stray roll from gating the stop-fall input
    fn hover_input() -> TickInput {
        TickInput {
            stop_fall: true,
            stop_event: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_first_flap_leaves_idle() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        assert_eq!(session.phase, SessionPhase::Flying);
        assert_eq!(session.flyer.vel, -10.0 + 0.45);
    }

    #[test]
    fn test_idle_session_stays_put_without_input() {
        let mut session = GameSession::new(1);
        for _ in 0..100 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(session.field.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.tick_count, 100);
        assert_eq!(session.flyer.pos.y, 472.0);
    }

    #[test]
    fn test_accel_above_threshold_is_a_flap() {
        let mut session = scripted_session(1);
        let input = TickInput {
            sensor: SensorState::from_frame([false; 6], Vec3::new(0.0, 0.0, 11.0)),
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.phase, SessionPhase::Flying);
        assert_eq!(session.flyer.vel, -10.0 + 0.45);
    }

    #[test]
    fn test_accel_at_threshold_does_not_flap() {
        let mut session = scripted_session(1);
        let input = TickInput {
            sensor: SensorState::from_frame([false; 6], Vec3::new(0.0, 0.0, 10.0)),
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_spawn_fires_on_the_first_flying_tick() {
        // the default spawn clock starts elapsed
        let mut session = GameSession::new(3);
        tick(&mut session, &flap_input());
        assert_eq!(session.field.pipes.len() + session.field.barriers.len(), 1);
    }

    #[test]
    fn test_no_spawn_while_idle() {
        let mut session = GameSession::new(3);
        for _ in 0..200 {
            tick(&mut session, &TickInput::default());
        }
        assert!(session.field.is_empty());
    }

    #[test]
    fn test_collision_loses_and_forces_descent() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);
        assert!(!session.flyer.alive);
        // the flyer was still ascending, so the hit set the fixed descent
        assert_eq!(session.flyer.vel, 2.0);
    }

    #[test]
    fn test_floor_landing_loses_on_the_same_tick() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        let mut landed = false;
        for _ in 0..300 {
            tick(&mut session, &TickInput::default());
            if session.flyer.pos.y >= session.tuning.floor_y {
                assert_eq!(session.phase, SessionPhase::Lost);
                assert!(!session.flyer.alive);
                landed = true;
                break;
            }
        }
        assert!(landed, "flyer never reached the floor");
    }

    #[test]
    fn test_flap_while_lost_changes_nothing() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);

        let frozen = session.flyer;
        tick(&mut session, &flap_input());
        assert_eq!(session.phase, SessionPhase::Lost);
        assert_eq!(session.flyer, frozen);
    }

    #[test]
    fn test_obstacles_freeze_once_lost() {
        let mut session = scripted_session(1);
        let tuning = session.tuning.clone();
        tick(&mut session, &flap_input());
        session.field.spawn_pipe(512.0, &tuning);
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);

        let pipe_x = session.field.pipes[0].x;
        let lifespan = session.field.pipes[0].lifespan_ticks;
        let pending = session.field.pending_scores();
        let input = TickInput {
            clear_barriers: true,
            ..TickInput::default()
        };
        for _ in 0..10 {
            tick(&mut session, &input);
        }
        assert_eq!(session.field.pipes[0].x, pipe_x);
        assert_eq!(session.field.pipes[0].lifespan_ticks, lifespan);
        assert_eq!(session.field.pending_scores(), pending);
        assert_eq!(session.score, 0);
        // even the barrier clear is ignored once the run is lost
        assert!(!session.field.barriers.is_empty());
    }

    #[test]
    fn test_barrier_gesture_clears_barriers() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        // barrier well clear of the flyer
        session.field.barriers.push(GloveBarrier { x: 600.0 });
        let input = TickInput {
            sensor: SensorState::from_frame([true; 6], Vec3::ZERO),
            stop_fall: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert!(session.field.barriers.is_empty());
        assert_eq!(session.phase, SessionPhase::Flying);
    }

    #[test]
    fn test_event_window_gates_the_flap() {
        let mut tuning = scripted_tuning();
        tuning.event_roll_max = 0; // every roll opens the window
        let mut session = GameSession::with_tuning(1, tuning);
        session.field.ticks_since_spawn = 0;

        tick(&mut session, &flap_input());
        assert!(session.event_mode, "roll of zero always opens the window");

        // with the window open, a fresh flap must not set the impulse and
        // stop-fall must not zero the velocity
        tick(&mut session, &hover_input());
        let vel_before = session.flyer.vel;
        let mut press = flap_input();
        press.stop_fall = true;
        tick(&mut session, &press);
        assert_eq!(session.flyer.vel, vel_before + 0.45);
    }

    #[test]
    fn test_stop_event_closes_the_window() {
        let mut tuning = scripted_tuning();
        tuning.event_roll_max = 0;
        let mut session = GameSession::with_tuning(1, tuning);
        session.field.ticks_since_spawn = 0;
        tick(&mut session, &flap_input());
        assert!(session.event_mode);

        // stop re-rolling, then request the stop
        session.tuning.event_roll_max = u32::MAX;
        let input = TickInput {
            stop_event: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert!(!session.event_mode);
    }

    #[test]
    fn test_stop_request_lands_before_the_fresh_roll() {
        let mut tuning = scripted_tuning();
        tuning.event_roll_max = 0; // every roll opens the window
        let mut session = GameSession::with_tuning(1, tuning);
        session.field.ticks_since_spawn = 0;
        tick(&mut session, &flap_input());
        assert!(session.event_mode);

        // the stop is honored first; the same tick's roll then re-opens
        // the window, so it must still be open afterwards
        let input = TickInput {
            stop_event: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert!(session.event_mode);
    }

    #[test]
    fn test_event_window_survives_a_loss_until_restart() {
        let mut tuning = scripted_tuning();
        tuning.event_roll_max = 0;
        let mut session = GameSession::with_tuning(1, tuning);
        session.field.ticks_since_spawn = 0;
        tick(&mut session, &flap_input());
        assert!(session.event_mode);

        session.tuning.event_roll_max = u32::MAX;
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);

        // stop requests are ignored while lost
        let input = TickInput {
            stop_event: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert!(session.event_mode);

        let reset = TickInput {
            reset: true,
            ..TickInput::default()
        };
        tick(&mut session, &reset);
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(!session.event_mode);
    }

    #[test]
    fn test_reset_gesture_restarts_after_loss() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);

        // thumb and index bent is the reset pose
        let input = TickInput {
            sensor: SensorState::from_frame(
                [false, true, true, false, false, false],
                Vec3::ZERO,
            ),
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.score, 0);
        assert!(session.field.is_empty());
        assert!(session.resetted);
    }

    #[test]
    fn test_reset_midflight_is_ignored() {
        let mut session = scripted_session(1);
        tick(&mut session, &flap_input());
        let input = TickInput {
            reset: true,
            stop_fall: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.phase, SessionPhase::Flying);
        assert!(!session.resetted);
    }

    #[test]
    fn test_spawn_clock_survives_a_restart() {
        let mut session = GameSession::new(5);
        tick(&mut session, &flap_input());
        assert_eq!(session.field.pipes.len() + session.field.barriers.len(), 1);

        session.lose();
        let reset = TickInput {
            reset: true,
            ..TickInput::default()
        };
        tick(&mut session, &reset);
        assert!(session.field.is_empty());

        // idle ticks keep feeding the clock, so once the interval has
        // passed the first flying tick spawns again
        for _ in 0..session.tuning.spawn_interval_ticks {
            tick(&mut session, &TickInput::default());
        }
        tick(&mut session, &flap_input());
        assert_eq!(session.field.pipes.len() + session.field.barriers.len(), 1);
    }

    #[test]
    fn test_same_tick_loss_freezes_scoring() {
        let mut tuning = scripted_tuning();
        // countdown starts at 4: one tick from retiring
        tuning.score_trigger_margin = tuning.screen_width - 4.0;
        let mut session = GameSession::with_tuning(1, tuning);
        session.field.ticks_since_spawn = 0;
        let tuning = session.tuning.clone();

        tick(&mut session, &flap_input());
        session.field.spawn_pipe(512.0, &tuning);
        session.field.barriers.push(GloveBarrier { x: 100.0 });
        // the collision lands before the queue would have retired its head
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, SessionPhase::Lost);
        assert_eq!(session.score, 0);
        assert_eq!(session.field.pending_scores(), 1);
    }

    #[test]
    fn test_pipe_scores_at_exactly_tick_310() {
        let mut session = scripted_session(9);
        let tuning = session.tuning.clone();
        // pipe gap spans 412..612; a flyer hovering at its spawn height
        // sits inside that window when the pipe sweeps past
        session.field.spawn_pipe(512.0, &tuning);
        assert_eq!(session.field.pending_scores(), 1);

        tick(&mut session, &flap_input());
        assert_eq!(session.phase, SessionPhase::Flying);
        for t in 2..=309 {
            tick(&mut session, &hover_input());
            assert_eq!(session.score, 0, "scored early at tick {t}");
        }
        tick(&mut session, &hover_input());
        assert_eq!(session.score, 1);
        assert_eq!(session.field.pending_scores(), 0);
        // the pipe itself lives on until its forced lifespan runs out
        assert_eq!(session.field.pipes.len(), 1);
        assert!(session.field.pipes[0].scored);
        assert_eq!(session.phase, SessionPhase::Flying);
    }

    #[test]
    fn test_forced_expiry_at_tick_340_in_session() {
        let mut session = scripted_session(9);
        let tuning = session.tuning.clone();
        session.field.spawn_pipe(512.0, &tuning);

        tick(&mut session, &flap_input());
        for _ in 2..=339 {
            tick(&mut session, &hover_input());
        }
        assert_eq!(session.field.pipes.len(), 1);
        tick(&mut session, &hover_input());
        assert!(session.field.pipes.is_empty());
        assert_eq!(session.score, 1, "the pipe scored before expiring");
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed must evolve identically
        let mut a = GameSession::new(99_999);
        let mut b = GameSession::new(99_999);

        let inputs = [
            flap_input(),
            TickInput::default(),
            hover_input(),
            TickInput {
                flap_pressed: true,
                flap_held: true,
                stop_event: true,
                ..TickInput::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_full_run_spawns_on_cadence() {
        // fly with constant hover and count what the default cadence spawns
        let mut session = GameSession::new(42);
        tick(&mut session, &flap_input());
        let mut seen = session.field.pipes.len() + session.field.barriers.len();
        assert_eq!(seen, 1);

        let interval = session.tuning.spawn_interval_ticks as usize;
        for t in 0..(interval * 3) {
            tick(&mut session, &hover_input());
            let now = session.field.pipes.len() + session.field.barriers.len();
            // obstacles may expire, so only count growth
            if now > seen {
                seen = now;
                // growth only lands on the cadence
                assert_eq!((t + 1) % interval, 0, "off-cadence spawn at tick {t}");
            } else {
                seen = now;
            }
        }
        assert_eq!(session.phase, SessionPhase::Flying);
    }
}

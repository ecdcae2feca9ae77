//! Headless runner
//!
//! Drives the simulation at the fixed tick rate with a scripted glove feed,
//! logging phase transitions and per-second frame snapshots. Useful for
//! soak-testing the sim without a renderer or real sensor hardware.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                          # 60 seconds with a clock seed
//!   cargo run -- --seed 42            # Reproducible run
//!   cargo run -- -t 12000 -c tuning.json

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glove_flap::consts;
use glove_flap::sim::SessionPhase;
use glove_flap::{GameSession, SensorMailbox, TickInput, Tuning, tick};

struct RunConfig {
    seed: Option<u64>,
    max_ticks: u64,
    tuning_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: 60 * consts::TICK_RATE_HZ as u64,
            tuning_path: None,
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let tuning = match config.tuning_path {
        Some(ref path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let mut session = GameSession::with_tuning(seed, tuning);
    log::info!("session seeded with {seed}");

    // Feeder thread standing in for the glove transport. It publishes frames
    // faster than the tick rate; the sim loop samples the freshest one.
    let mailbox = SensorMailbox::new();
    let stop = Arc::new(AtomicBool::new(false));
    let feeder = {
        let mailbox = mailbox.clone();
        let stop = stop.clone();
        thread::spawn(move || {
            let mut i: u64 = 0;
            while !stop.load(Ordering::Relaxed) {
                let (fingers, accel) = scripted_frame(i);
                mailbox.publish_frame(&fingers, accel);
                i += 1;
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let tick_duration = Duration::from_millis(consts::TICK_MS);
    let mut next_tick = Instant::now() + tick_duration;
    let mut last_phase = session.phase;
    let mut losses: u32 = 0;
    let mut best_score: u32 = 0;

    for _ in 0..config.max_ticks {
        let input = TickInput {
            sensor: mailbox.snapshot(),
            ..TickInput::default()
        };
        tick(&mut session, &input);

        if session.phase != last_phase {
            log::info!(
                "phase {:?} -> {:?} at tick {} (score {})",
                last_phase,
                session.phase,
                session.tick_count,
                session.score
            );
            if session.phase == SessionPhase::Lost {
                best_score = best_score.max(session.score);
                losses += 1;
                if losses >= 2 {
                    last_phase = session.phase;
                    break;
                }
            }
            last_phase = session.phase;
        }

        if session.tick_count % consts::TICK_RATE_HZ as u64 == 0 {
            if let Ok(json) = serde_json::to_string(&session.frame()) {
                log::debug!("{json}");
            }
        }

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }
        next_tick += tick_duration;
    }

    stop.store(true, Ordering::Relaxed);
    let _ = feeder.join();

    best_score = best_score.max(session.score);
    println!(
        "run finished: {} ticks, {} losses, best score {}, final phase {:?}",
        session.tick_count, losses, best_score, last_phase
    );
}

/// Scripted glove frames on the feeder's 5 ms cadence: a shake flap every
/// ~1.2 s lets the flyer sink slowly enough to meet some pipes, and a
/// reset-pose burst every ~8 s picks a lost run back up.
fn scripted_frame(i: u64) -> ([bool; 6], [f32; 3]) {
    if i % 1600 < 40 {
        // thumb and index bent: the reset pose
        return ([false, true, true, false, false, false], [0.0; 3]);
    }
    if i % 240 < 10 {
        return ([false; 6], [0.0, 0.0, 14.0]);
    }
    ([false; 6], [0.0; 3])
}

fn parse_args(args: &[String]) -> RunConfig {
    let mut config = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks = args[i + 1].parse().unwrap_or(config.max_ticks);
                    i += 1;
                }
            }
            "-c" | "--tuning" => {
                if i + 1 < args.len() {
                    config.tuning_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Glove Flap headless runner");
    println!();
    println!("USAGE:");
    println!("    cargo run -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --seed <S>      Random seed for reproducibility (default: clock)");
    println!("    -t, --ticks <T>     Max ticks to run (default: 2400, one minute)");
    println!("    -c, --tuning <P>    Path to a tuning JSON file");
    println!("    -h, --help          Show this help");
    println!();
    println!("The run stops early after the second lost run. Set RUST_LOG=debug");
    println!("for per-second frame snapshots in JSON.");
}

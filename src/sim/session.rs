//! Game session state
//!
//! One `GameSession` owns everything a run needs: flyer, obstacle field,
//! score, phase machine, event-mode flag, tuning, and a seeded RNG. The same
//! seed and input sequence replays the same run tick for tick. The whole
//! session serializes, so a run can be checkpointed and resumed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::flyer::Flyer;
use crate::sim::obstacles::ObstacleField;
use crate::tuning::Tuning;

/// Top-level phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the first flap
    Idle,
    /// Run in progress
    Flying,
    /// Run over; only a reset leaves this phase
    Lost,
}

/// One complete game run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub tuning: Tuning,
    /// Seed the session RNG started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Ticks advanced since the session was created
    pub tick_count: u64,
    pub phase: SessionPhase,
    pub score: u32,
    /// Randomly-triggered modifier window; gates flapping while active
    pub event_mode: bool,
    /// True once any reset has happened this process lifetime
    pub resetted: bool,
    pub flyer: Flyer,
    pub field: ObstacleField,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let flyer = Flyer::new(&tuning);
        let field = ObstacleField::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick_count: 0,
            phase: SessionPhase::Idle,
            score: 0,
            event_mode: false,
            resetted: false,
            flyer,
            field,
            tuning,
        }
    }

    /// End the run: kill the flyer and enter `Lost`
    pub(crate) fn lose(&mut self) {
        self.flyer.kill();
        self.phase = SessionPhase::Lost;
        log::info!("run lost at score {}", self.score);
    }

    /// Restart after a loss. From any other phase this is a no-op: a reset
    /// request only acts on a lost run.
    pub fn restart(&mut self) {
        if self.phase != SessionPhase::Lost {
            return;
        }
        self.field.clear();
        self.flyer.reset(&self.tuning);
        self.score = 0;
        self.event_mode = false;
        self.resetted = true;
        self.phase = SessionPhase::Idle;
        log::info!("session restarted");
    }
}

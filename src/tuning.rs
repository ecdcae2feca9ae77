//! Data-driven gameplay constants
//!
//! Defaults are the shipped gameplay values; a JSON file can override
//! individual fields for experiments (e.g. scroll speed). The engine reads
//! these through `GameSession`, never from globals.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Logical screen width in pixels
    pub screen_width: f32,
    /// Logical screen height in pixels
    pub screen_height: f32,
    /// Flyer y at or past this value counts as hitting the floor
    pub floor_y: f32,

    // === Flyer physics ===
    /// Downward acceleration per tick while flying
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = up)
    pub flap_impulse: f32,
    /// Terminal fall speed
    pub terminal_fall_speed: f32,
    /// Velocity forced when a collision happens mid-ascent
    pub hit_descent_speed: f32,

    // === Obstacles ===
    /// Pixels every obstacle moves left per tick
    pub scroll_speed: f32,
    /// Half-height of a pipe pair's gap
    pub gap_half_height: f32,
    /// Gap center offset range; drawn uniformly from [-range, +range]
    pub gap_offset_range: i32,
    /// Minimum ticks between spawn attempts
    pub spawn_interval_ticks: u32,
    /// Ticks after which a pipe pair is force-removed
    pub pipe_lifespan_ticks: u32,
    /// Scoring distance = screen_width - this margin
    pub score_trigger_margin: f32,

    // === Inputs ===
    /// Acceleration magnitude above this triggers a synthetic flap
    pub accel_flap_threshold: f32,
    /// Event-mode roll upper bound (inclusive); rolling 0 triggers
    pub event_roll_max: u32,

    // === Bounding boxes (presentation-derived) ===
    /// Flyer spawn position, top-left corner
    pub flyer_start_x: f32,
    pub flyer_start_y: f32,
    /// Flyer bounding box
    pub flyer_width: f32,
    pub flyer_height: f32,
    /// Horizontal extent of a pipe
    pub pipe_width: f32,
    /// Horizontal extent of a barrier
    pub barrier_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: consts::SCREEN_WIDTH,
            screen_height: consts::SCREEN_HEIGHT,
            floor_y: consts::FLOOR_Y,

            gravity: consts::GRAVITY_PER_TICK,
            flap_impulse: consts::FLAP_IMPULSE,
            terminal_fall_speed: consts::TERMINAL_FALL_SPEED,
            hit_descent_speed: consts::HIT_DESCENT_SPEED,

            scroll_speed: consts::SCROLL_SPEED,
            gap_half_height: consts::PIPE_GAP_HALF_HEIGHT,
            gap_offset_range: consts::GAP_OFFSET_RANGE,
            spawn_interval_ticks: consts::SPAWN_INTERVAL_TICKS,
            pipe_lifespan_ticks: consts::PIPE_LIFESPAN_TICKS,
            score_trigger_margin: consts::SCORE_TRIGGER_MARGIN,

            accel_flap_threshold: consts::ACCEL_FLAP_THRESHOLD,
            event_roll_max: consts::EVENT_ROLL_MAX,

            flyer_start_x: consts::FLYER_START_X,
            flyer_start_y: consts::FLYER_START_Y,
            flyer_width: consts::FLYER_WIDTH,
            flyer_height: consts::FLYER_HEIGHT,
            pipe_width: consts::PIPE_WIDTH,
            barrier_width: consts::BARRIER_WIDTH,
        }
    }
}

impl Tuning {
    /// Vertical midpoint of the playfield (gap centers offset from here)
    #[inline]
    pub fn vertical_midpoint(&self) -> f32 {
        self.screen_height / 2.0
    }

    /// Scoring distance a pipe registers at spawn
    #[inline]
    pub fn scoring_distance(&self) -> f32 {
        self.screen_width - self.score_trigger_margin
    }

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {path}");
                    tuning
                }
                Err(err) => {
                    log::warn!("Bad tuning file {path}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read tuning file {path}: {err}; using defaults");
                Self::default()
            }
        }
    }
}

//! Glove Flap - simulation core for a glove-controlled side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flyer physics, obstacles, collisions,
//!   gesture classification, game state)
//! - `glove`: Sensor acquisition boundary (single-slot snapshot mailbox)
//! - `tuning`: Data-driven gameplay constants

pub mod glove;
pub mod sim;
pub mod tuning;

pub use glove::SensorMailbox;
pub use sim::{FrameSnapshot, GameSession, SensorState, SessionPhase, TickInput, tick};
pub use tuning::Tuning;

/// Engine constants fixed by the simulation contract
pub mod consts {
    /// Logical tick rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 40;
    /// Duration of one tick in milliseconds
    pub const TICK_MS: u64 = 1000 / TICK_RATE_HZ as u64;

    /// Playfield dimensions (logical pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 1024.0;
    /// Flyer y at or past this value is a floor collision
    pub const FLOOR_Y: f32 = 777.0;

    /// Downward acceleration per tick while flying
    pub const GRAVITY_PER_TICK: f32 = 0.45;
    /// Vertical velocity set by a flap
    pub const FLAP_IMPULSE: f32 = -10.0;
    /// Terminal fall speed (velocity is clamped to this, never above)
    pub const TERMINAL_FALL_SPEED: f32 = 10.0;
    /// Velocity forced on a mid-ascent collision
    pub const HIT_DESCENT_SPEED: f32 = 2.0;

    /// Obstacle scroll speed in pixels per tick
    pub const SCROLL_SPEED: f32 = 4.0;
    /// Half-height of the gap between a pipe pair
    pub const PIPE_GAP_HALF_HEIGHT: f32 = 100.0;
    /// Gap center offset is drawn uniformly from [-this, +this]
    pub const GAP_OFFSET_RANGE: i32 = 130;
    /// Minimum time between obstacle spawns
    pub const SPAWN_INTERVAL_MS: u64 = 1750;
    /// Spawn interval in whole ticks (70 at 40 Hz)
    pub const SPAWN_INTERVAL_TICKS: u32 = (SPAWN_INTERVAL_MS / TICK_MS) as u32;
    /// Pipes are force-removed this many ticks after spawn
    pub const PIPE_LIFESPAN_TICKS: u32 = 340;
    /// Scoring distance registered at pipe spawn (screen width minus this)
    pub const SCORE_TRIGGER_MARGIN: f32 = 40.0;

    /// Acceleration magnitude above this triggers a synthetic flap
    pub const ACCEL_FLAP_THRESHOLD: f32 = 10.0;
    /// Event-mode roll is uniform in [0, this]; a 0 triggers (p = 1/201)
    pub const EVENT_ROLL_MAX: u32 = 200;

    /// Flyer spawn position (top-left corner)
    pub const FLYER_START_X: f32 = 100.0;
    pub const FLYER_START_Y: f32 = SCREEN_HEIGHT / 2.0 - 40.0;
    /// Flyer bounding box
    pub const FLYER_WIDTH: f32 = 64.0;
    pub const FLYER_HEIGHT: f32 = 48.0;
    /// Obstacle bounding-box widths
    pub const PIPE_WIDTH: f32 = 120.0;
    pub const BARRIER_WIDTH: f32 = 100.0;

    /// Rotation hint per unit of velocity while alive (degrees)
    pub const ROTATION_ALIVE_FACTOR: f32 = -2.5;
    /// Rotation hint per unit of velocity after death (degrees)
    pub const ROTATION_DEAD_FACTOR: f32 = -11.0;
}

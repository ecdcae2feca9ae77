//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Per-tick rates, no wall-clock reads
//! - No rendering, audio, or sensor-transport dependencies

pub mod collision;
pub mod flyer;
pub mod gesture;
pub mod obstacles;
pub mod rect;
pub mod session;
pub mod snapshot;
pub mod tick;

pub use flyer::{Flyer, FlyerControls, FlyerMode};
pub use gesture::{GestureFlags, SensorState, classify};
pub use obstacles::{GloveBarrier, ObstacleField, PipePair};
pub use rect::Rect;
pub use session::{GameSession, SessionPhase};
pub use snapshot::{FlyerView, FrameSnapshot, ObstacleView};
pub use tick::{TickInput, tick};

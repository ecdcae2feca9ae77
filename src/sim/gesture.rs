//! Glove sensor snapshot and gesture classification
//!
//! Classification is stateless: flags are recomputed from scratch every tick
//! with no hysteresis or debounce, so a single noisy sample flips a flag for
//! exactly one tick and callers must tolerate the flicker. Three of the four
//! poses leave the little finger free; only the barrier pose reads all six
//! flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Latest raw glove reading: six finger-bend flags plus an acceleration
/// vector. The default (all straight, zero acceleration) is a valid reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorState {
    pub palm: bool,
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub little: bool,
    /// Acceleration in sensor units, one component per axis
    pub accel: Vec3,
}

impl SensorState {
    /// Build a reading from a whole glove frame
    pub fn from_frame(fingers: [bool; 6], accel: Vec3) -> Self {
        let [palm, thumb, index, middle, ring, little] = fingers;
        Self {
            palm,
            thumb,
            index,
            middle,
            ring,
            little,
            accel,
        }
    }

    /// Euclidean norm of the acceleration vector
    #[inline]
    pub fn accel_magnitude(&self) -> f32 {
        self.accel.length()
    }

    /// True when every acceleration component is a finite number
    #[inline]
    pub fn accel_is_finite(&self) -> bool {
        self.accel.is_finite()
    }
}

/// Gesture flags derived from one sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureFlags {
    /// Whole hand clenched: clears the barrier collection
    pub barrier: bool,
    /// Zeroes vertical velocity while flying
    pub falling_stop: bool,
    /// Ends an active event-mode window
    pub event_stop: bool,
    /// Requests a session restart after a loss
    pub reset: bool,
}

/// Classify one sensor reading into gesture flags.
///
/// The poses (palm, thumb, index, middle, ring; little only in barrier):
/// - barrier: all six bent
/// - falling stop: index + middle + ring bent, palm and thumb straight
/// - event stop: palm + index + middle bent, thumb and ring straight
/// - reset: thumb + index bent, palm, middle and ring straight
pub fn classify(sensor: &SensorState) -> GestureFlags {
    let SensorState {
        palm,
        thumb,
        index,
        middle,
        ring,
        little,
        ..
    } = *sensor;

    GestureFlags {
        barrier: palm && thumb && index && middle && ring && little,
        falling_stop: !palm && !thumb && index && middle && ring,
        event_stop: palm && !thumb && index && middle && !ring,
        reset: !palm && thumb && index && !middle && !ring,
    }
}

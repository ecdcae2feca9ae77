//! Single-slot snapshot mailbox between the sensor thread and the sim loop
//!
//! A publish replaces the previous frame whole; a snapshot copies the latest
//! frame out. Sensor frames arrive faster than the tick rate, so frames that
//! are never read are simply superseded. Malformed frames are rejected at
//! this boundary and the previous good frame stays in the slot, which keeps
//! NaN acceleration out of the gesture math.

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use crate::sim::SensorState;

/// Shared handle to the latest sensor frame
#[derive(Debug, Clone, Default)]
pub struct SensorMailbox {
    slot: Arc<Mutex<SensorState>>,
}

impl SensorMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a complete frame. Returns false and keeps the previous frame
    /// when the acceleration vector is not finite.
    pub fn publish(&self, frame: SensorState) -> bool {
        if !frame.accel_is_finite() {
            log::warn!("dropping sensor frame with non-finite acceleration");
            return false;
        }
        *self.slot.lock() = frame;
        true
    }

    /// Publish a raw transport frame: one bend flag per finger in glove
    /// order (palm, thumb, index, middle, ring, little) plus acceleration.
    /// Returns false when the finger count is wrong.
    pub fn publish_frame(&self, fingers: &[bool], accel: [f32; 3]) -> bool {
        let fingers: [bool; 6] = match fingers.try_into() {
            Ok(fingers) => fingers,
            Err(_) => {
                log::warn!(
                    "dropping sensor frame with {} finger flags, expected 6",
                    fingers.len()
                );
                return false;
            }
        };
        self.publish(SensorState::from_frame(
            fingers,
            Vec3::new(accel[0], accel[1], accel[2]),
        ))
    }

    /// Copy of the latest accepted frame
    pub fn snapshot(&self) -> SensorState {
        *self.slot.lock()
    }
}

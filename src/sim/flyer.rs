//! Flyer physics state machine
//!
//! The flyer has three modes: `Idle` before the first flap (gravity off),
//! `Flying` (gravity on), and `Dead` (frozen; the presentation layer draws a
//! death roll from the rotation hint). The impulse/gravity numbers are tuned
//! constants, not physically derived; the clamps only bound runaway velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::rect::Rect;
use crate::tuning::Tuning;

/// Flyer lifecycle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlyerMode {
    Idle,
    Flying,
    Dead,
}

/// Per-tick flyer controls, already OR-combined from manual and gesture
/// sources by the session
#[derive(Debug, Clone, Copy, Default)]
pub struct FlyerControls {
    /// Flap trigger fired this tick (pointer press or synthetic)
    pub flap_pressed: bool,
    /// Flap input currently held; releasing it re-arms the jump
    pub flap_held: bool,
    /// Zero the vertical velocity this tick
    pub stop_fall: bool,
    /// Event-mode window active; suppresses flap and stop-fall
    pub flap_gated: bool,
}

/// The controllable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    /// Top-left corner; x never changes after spawn
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick, positive is down
    pub vel: f32,
    pub mode: FlyerMode,
    /// True from a flap until the triggering input is released
    pub jumping: bool,
    /// Mirrors `mode != Dead`, kept for the presentation layer
    pub alive: bool,
}

impl Flyer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.flyer_start_x, tuning.flyer_start_y),
            vel: 0.0,
            mode: FlyerMode::Idle,
            jumping: false,
            alive: true,
        }
    }

    /// Return to the spawn position with zero velocity, ready to fly again
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Mark the flyer dead; it stays frozen until reset
    pub fn kill(&mut self) {
        self.alive = false;
        self.mode = FlyerMode::Dead;
    }

    /// Bounding box used for collision
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos.x, self.pos.y, tuning.flyer_width, tuning.flyer_height)
    }

    /// Advance the flyer by one tick.
    pub fn update(&mut self, controls: &FlyerControls, tuning: &Tuning) {
        // 1. A dead flyer is frozen
        if self.mode == FlyerMode::Dead {
            return;
        }

        // 2. Flap impulse, replacing whatever velocity the flyer had; an
        //    idle flyer starts flying on its first flap
        if controls.flap_pressed && !self.jumping && !controls.flap_gated {
            self.vel = tuning.flap_impulse;
            self.jumping = true;
            if self.mode == FlyerMode::Idle {
                self.mode = FlyerMode::Flying;
            }
        }

        if self.mode == FlyerMode::Flying {
            // 3. Gravity, then the stop-fall input zeroes velocity
            self.vel += tuning.gravity;
            if controls.stop_fall && !controls.flap_gated {
                self.vel = 0.0;
            }
            // 4. Terminal fall speed; no lower clamp beyond the impulse
            if self.vel > tuning.terminal_fall_speed {
                self.vel = tuning.terminal_fall_speed;
            }
            // 5. Integer pixel step, only while above the floor; the step
            //    lands on the floor instead of carrying past it
            if self.pos.y < tuning.floor_y {
                self.pos.y = (self.pos.y + self.vel.floor()).min(tuning.floor_y);
            }
        }

        // 6. Level-triggered re-arm: any release of the input re-enables
        //    the flap, not only a clean down-edge
        if !controls.flap_held {
            self.jumping = false;
        }

        // 7. Landing on the floor kills the flyer on the same tick
        if self.pos.y >= tuning.floor_y {
            self.kill();
        }
    }
}

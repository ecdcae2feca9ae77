//! Read-only frame views for renderers and loggers
//!
//! A snapshot is a plain-data projection of one tick. Renderers draw from it
//! without touching live simulation state, and the headless runner dumps it
//! as JSON. Positions stay in logical pixels; the rotation hint is the only
//! derived value.

use serde::{Deserialize, Serialize};

use super::session::{GameSession, SessionPhase};
use crate::consts;

/// Flyer as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyerView {
    /// Top-left corner in logical pixels
    pub x: f32,
    pub y: f32,
    /// Suggested sprite rotation in degrees, positive tilting up
    pub rotation_deg: f32,
    pub alive: bool,
}

/// One obstacle as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObstacleView {
    Pipes {
        x: f32,
        gap_center_y: f32,
        gap_half_height: f32,
        scored: bool,
    },
    Barrier {
        x: f32,
    },
}

/// Complete view of one simulation tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: SessionPhase,
    pub score: u32,
    pub event_mode: bool,
    /// Show the start prompt: idle and never restarted this process
    pub show_start_prompt: bool,
    pub flyer: FlyerView,
    pub obstacles: Vec<ObstacleView>,
}

impl GameSession {
    /// Project the current tick into a renderer-facing snapshot
    pub fn frame(&self) -> FrameSnapshot {
        let factor = if self.flyer.alive {
            consts::ROTATION_ALIVE_FACTOR
        } else {
            consts::ROTATION_DEAD_FACTOR
        };
        let flyer = FlyerView {
            x: self.flyer.pos.x,
            y: self.flyer.pos.y,
            rotation_deg: self.flyer.vel * factor,
            alive: self.flyer.alive,
        };

        let mut obstacles = Vec::with_capacity(self.field.pipes.len() + self.field.barriers.len());
        for pipe in &self.field.pipes {
            obstacles.push(ObstacleView::Pipes {
                x: pipe.x,
                gap_center_y: pipe.gap_center_y,
                gap_half_height: pipe.gap_half_height,
                scored: pipe.scored,
            });
        }
        for barrier in &self.field.barriers {
            obstacles.push(ObstacleView::Barrier { x: barrier.x });
        }

        FrameSnapshot {
            tick: self.tick_count,
            phase: self.phase,
            score: self.score,
            event_mode: self.event_mode,
            show_start_prompt: self.phase == SessionPhase::Idle && !self.resetted,
            flyer,
            obstacles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::GloveBarrier;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_fresh_session_shows_start_prompt() {
        let session = GameSession::new(1);
        let frame = session.frame();
        assert_eq!(frame.tick, 0);
        assert_eq!(frame.phase, SessionPhase::Idle);
        assert!(frame.show_start_prompt);
        assert!(frame.obstacles.is_empty());
        assert!(frame.flyer.alive);
        assert_eq!(frame.flyer.x, 100.0);
        assert_eq!(frame.flyer.y, 472.0);
    }

    #[test]
    fn test_prompt_suppressed_after_restart() {
        let mut session = GameSession::new(1);
        session.lose();
        session.restart();
        let frame = session.frame();
        assert_eq!(frame.phase, SessionPhase::Idle);
        assert!(!frame.show_start_prompt);
    }

    #[test]
    fn test_rotation_hint_tracks_velocity() {
        let mut session = GameSession::new(1);
        session.flyer.vel = -10.0;
        assert_eq!(session.frame().flyer.rotation_deg, 25.0);

        session.flyer.kill();
        session.flyer.vel = 10.0;
        assert_eq!(session.frame().flyer.rotation_deg, -110.0);
        assert!(!session.frame().flyer.alive);
    }

    #[test]
    fn test_obstacles_mirror_the_field() {
        let mut session = GameSession::new(1);
        let tuning = session.tuning.clone();
        session.field.spawn_pipe(512.0, &tuning);
        session.field.barriers.push(GloveBarrier { x: 640.0 });

        let frame = session.frame();
        assert_eq!(frame.obstacles.len(), 2);
        assert_eq!(
            frame.obstacles[0],
            ObstacleView::Pipes {
                x: 1280.0,
                gap_center_y: 512.0,
                gap_half_height: 100.0,
                scored: false,
            }
        );
        assert_eq!(frame.obstacles[1], ObstacleView::Barrier { x: 640.0 });
    }

    #[test]
    fn test_snapshot_serializes_to_tagged_json() {
        let mut session = GameSession::new(1);
        let input = TickInput {
            flap_pressed: true,
            flap_held: true,
            ..TickInput::default()
        };
        tick(&mut session, &input);

        let json = serde_json::to_string(&session.frame()).unwrap();
        assert!(json.contains("\"phase\":\"flying\""));
        assert!(json.contains("\"type\""));
    }
}

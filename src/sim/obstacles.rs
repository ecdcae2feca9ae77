//! Obstacle spawning, scrolling, expiry, and the scoring queue
//!
//! Two independent collections: pipe pairs (gap to fly through, removed by a
//! forced lifespan counter, never by leaving the screen) and glove barriers
//! (full-height walls removed by the barrier gesture, an explicit clear, or
//! scrolling fully off-screen).
//!
//! Scoring is a FIFO queue of countdown distances decoupled from pipe
//! positions: each pipe registers `screen_width - 40` at spawn, every value
//! decrements by the scroll speed per tick, and only the head of the queue
//! is checked, scoring exactly when it reaches zero. The decoupling is a
//! deliberate behavioral contract; a position-based check would change
//! scoring timing whenever the scroll speed is reconfigured mid-run.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::rect::Rect;
use crate::tuning::Tuning;

/// A pair of pipes with a vertical gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    /// Left edge
    pub x: f32,
    /// Vertical center of the gap
    pub gap_center_y: f32,
    /// Half-height of the gap
    pub gap_half_height: f32,
    /// Remaining ticks until forced removal
    pub lifespan_ticks: u32,
    /// True once this pair's scoring entry has retired
    pub scored: bool,
}

impl PipePair {
    /// Solid boxes above and below the gap, spanning to the screen edges
    pub fn bounds(&self, tuning: &Tuning) -> (Rect, Rect) {
        let gap_top = self.gap_center_y - self.gap_half_height;
        let gap_bottom = self.gap_center_y + self.gap_half_height;
        let top = Rect::new(self.x, 0.0, tuning.pipe_width, gap_top);
        let bottom = Rect::new(
            self.x,
            gap_bottom,
            tuning.pipe_width,
            tuning.screen_height - gap_bottom,
        );
        (top, bottom)
    }
}

/// A full-height wall; unavoidable until cleared
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GloveBarrier {
    /// Left edge
    pub x: f32,
}

impl GloveBarrier {
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, tuning.barrier_width, tuning.screen_height)
    }
}

/// Live obstacles plus the spawn clock and the scoring queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub pipes: Vec<PipePair>,
    pub barriers: Vec<GloveBarrier>,
    /// Scoring countdowns in spawn order, one per unscored pipe
    score_queue: VecDeque<f32>,
    /// Ticks since the last spawn; keeps counting across pauses and resets
    pub(crate) ticks_since_spawn: u32,
}

impl ObstacleField {
    /// An empty field whose spawn clock starts elapsed, so the first flying
    /// tick spawns immediately
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pipes: Vec::new(),
            barriers: Vec::new(),
            score_queue: VecDeque::new(),
            ticks_since_spawn: tuning.spawn_interval_ticks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty() && self.barriers.is_empty() && self.score_queue.is_empty()
    }

    /// Queued scoring countdowns not yet retired
    pub fn pending_scores(&self) -> usize {
        self.score_queue.len()
    }

    /// Remove every obstacle and queued score; the spawn clock is left alone
    pub fn clear(&mut self) {
        self.pipes.clear();
        self.barriers.clear();
        self.score_queue.clear();
    }

    /// Remove all barriers immediately (gesture or explicit clear)
    pub fn clear_barriers(&mut self) {
        self.barriers.clear();
    }

    /// Advance the spawn clock by one tick
    pub fn advance_spawn_clock(&mut self) {
        self.ticks_since_spawn = self.ticks_since_spawn.saturating_add(1);
    }

    /// True when the spawn interval has fully elapsed
    pub fn spawn_due(&self, tuning: &Tuning) -> bool {
        self.ticks_since_spawn >= tuning.spawn_interval_ticks
    }

    /// Spawn one obstacle at the right edge: a barrier on a roll of 1, a
    /// pipe pair on 2 or 3. Resets the spawn clock.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        if rng.random_range(1..=3) == 1 {
            self.spawn_barrier(tuning);
        } else {
            let offset = rng.random_range(-tuning.gap_offset_range..=tuning.gap_offset_range);
            self.spawn_pipe(tuning.vertical_midpoint() + offset as f32, tuning);
        }
        self.ticks_since_spawn = 0;
    }

    /// Spawn a pipe pair and register its scoring countdown
    pub fn spawn_pipe(&mut self, gap_center_y: f32, tuning: &Tuning) {
        self.pipes.push(PipePair {
            x: tuning.screen_width,
            gap_center_y,
            gap_half_height: tuning.gap_half_height,
            lifespan_ticks: tuning.pipe_lifespan_ticks,
            scored: false,
        });
        self.score_queue.push_back(tuning.scoring_distance());
        log::debug!("spawned pipe pair, gap center {gap_center_y:.0}");
    }

    /// Spawn a barrier at the right edge
    pub fn spawn_barrier(&mut self, tuning: &Tuning) {
        self.barriers.push(GloveBarrier {
            x: tuning.screen_width,
        });
        log::debug!("spawned barrier");
    }

    /// Scroll every obstacle left and run removals: pipes retire when their
    /// lifespan counter runs out, barriers once fully off-screen.
    pub fn scroll_and_expire(&mut self, tuning: &Tuning) {
        for pipe in &mut self.pipes {
            pipe.x -= tuning.scroll_speed;
            pipe.lifespan_ticks = pipe.lifespan_ticks.saturating_sub(1);
        }
        self.pipes.retain(|pipe| pipe.lifespan_ticks > 0);

        for barrier in &mut self.barriers {
            barrier.x -= tuning.scroll_speed;
        }
        let barrier_width = tuning.barrier_width;
        self.barriers.retain(|barrier| barrier.x + barrier_width > 0.0);
    }

    /// Decrement every queued countdown and retire the head if it reached
    /// exactly zero. Only the head is examined, once per tick; a head that
    /// skips past zero stalls the queue forever, which is the contract.
    /// Returns true when a score was earned this tick.
    pub fn advance_score_queue(&mut self, tuning: &Tuning) -> bool {
        for distance in &mut self.score_queue {
            *distance -= tuning.scroll_speed;
        }
        if self.score_queue.front() == Some(&0.0) {
            self.score_queue.pop_front();
            if let Some(pipe) = self.pipes.iter_mut().find(|pipe| !pipe.scored) {
                pipe.scored = true;
            }
            return true;
        }
        false
    }
}

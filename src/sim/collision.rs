//! Collision detection between the flyer and the world
//!
//! Pure functions, no state. A hit is any strict bounding-box overlap with a
//! pipe or barrier, or the flyer's top edge crossing above y = 0. Touching
//! edges without overlap is safe. The floor is not handled here; landing is
//! the flyer's own death condition.

use crate::sim::obstacles::{GloveBarrier, PipePair};
use crate::sim::rect::Rect;
use crate::tuning::Tuning;

/// Check the flyer's bounding box against the ceiling and every obstacle
pub fn hit(
    flyer_box: &Rect,
    pipes: &[PipePair],
    barriers: &[GloveBarrier],
    tuning: &Tuning,
) -> bool {
    if flyer_box.top() < 0.0 {
        return true;
    }

    let pipe_hit = pipes.iter().any(|pipe| {
        let (top, bottom) = pipe.bounds(tuning);
        flyer_box.intersects(&top) || flyer_box.intersects(&bottom)
    });

    pipe_hit
        || barriers
            .iter()
            .any(|barrier| flyer_box.intersects(&barrier.bounds(tuning)))
}

//! Post-drag momentum
//!
//! Release velocity comes from the last two drag samples; afterwards it decays
//! geometrically, once per frame, and snaps to exactly zero below a threshold.

use std::time::Duration;

use crate::constants::physics::RELEASE_WINDOW;
use crate::constants::timing::REFERENCE_FPS;

use super::state::PointerSample;

/// Convert elapsed time into reference frames (1/60 s each)
pub fn frames(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32() * REFERENCE_FPS
}

/// Velocity between two samples in distance per reference frame
///
/// Zero elapsed time, a missing sample, or a non-finite result all give 0.
/// So does a release more than `RELEASE_WINDOW` after the last sample, since
/// the pointer was held still. The result is capped to `±max_velocity`.
pub fn release_velocity(
    prev: Option<PointerSample>,
    last: Option<PointerSample>,
    released_at: Duration,
    max_velocity: f32,
) -> f32 {
    let (Some(prev), Some(last)) = (prev, last) else {
        return 0.0;
    };
    if released_at.saturating_sub(last.at) > RELEASE_WINDOW {
        return 0.0;
    }
    let elapsed = frames(last.at.saturating_sub(prev.at));
    if elapsed <= 0.0 {
        return 0.0;
    }
    let velocity = (last.position - prev.position) / elapsed;
    if !velocity.is_finite() {
        return 0.0;
    }
    velocity.clamp(-max_velocity, max_velocity)
}

/// Apply one frame of damping; returns the new velocity
///
/// Below `stop_threshold` the velocity becomes exactly 0.
pub fn decay(velocity: f32, damping: f32, stop_threshold: f32) -> f32 {
    let next = velocity * damping;
    if next.abs() < stop_threshold {
        0.0
    } else {
        next
    }
}

/// Sum momentum with autoplay and cap the result
pub fn combined_velocity(momentum: f32, autoplay: f32, max_velocity: f32) -> f32 {
    (momentum + autoplay).clamp(-max_velocity, max_velocity)
}

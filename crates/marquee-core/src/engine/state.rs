//! Scroll State - per-engine positional model
//!
//! Owned by exactly one engine. Only the engine's step and pointer handlers
//! mutate it; everyone else gets read access.

use std::time::Duration;

/// Interaction phase of the lane
///
/// `Idle -> Dragging -> (Momentum -> Idle) | Idle`. Autoplay is orthogonal and
/// runs in `Idle` and `Momentum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Momentum,
}

impl Phase {
    pub fn is_dragging(self) -> bool {
        self == Phase::Dragging
    }
}

/// One pointer position along the scroll axis with its timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: f32,
    pub at: Duration,
}

/// Mutable scroll state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    /// Lane offset, always in `[0, cycle_length)` when the lane can scroll
    pub(crate) offset: f32,
    /// Momentum velocity in distance per reference frame
    pub(crate) velocity: f32,
    pub(crate) phase: Phase,
    /// Most recent drag sample
    pub(crate) last_sample: Option<PointerSample>,
    /// Sample before `last_sample`
    pub(crate) prev_sample: Option<PointerSample>,
    pub(crate) hovered: bool,
    /// Count of state mutations since construction
    pub(crate) mutations: u64,
}

impl ScrollState {
    /// Fresh state: offset 0, at rest, not hovered
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn last_sample(&self) -> Option<PointerSample> {
        self.last_sample
    }

    /// Number of times the state has changed; frozen after unmount
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Push a new drag sample, keeping the previous one for velocity
    pub(crate) fn record_sample(&mut self, sample: PointerSample) {
        self.prev_sample = self.last_sample.replace(sample);
    }

    pub(crate) fn clear_samples(&mut self) {
        self.last_sample = None;
        self.prev_sample = None;
    }

    pub(crate) fn mark_mutated(&mut self) {
        self.mutations = self.mutations.wrapping_add(1);
    }
}

//! Scroll engine
//!
//! Drives a perpetually scrolling, pointer-interactive lane of opaque items.
//! All mutation goes through `step` and the pointer handlers; after each one
//! that changes state, the wrap check runs and the embedder's renderer is
//! invoked with a fresh `LaneFrame`.

mod item;
mod lane;
pub mod momentum;
mod state;
mod tilt;

pub use item::{Item, ItemId};
pub use lane::{wrap_offset, Lane, Placement};
pub use state::{Phase, PointerSample, ScrollState};
pub use tilt::TiltTransform;

use std::time::Duration;

use tracing::debug;

use crate::config::{Axis, EngineConfig};
use crate::events::{Point, PointerEvent, PointerEventKind};

/// Render callback supplied by the embedding UI layer
///
/// Called from inside the engine; it must not call back into the engine.
pub trait Renderer<T: ?Sized> {
    fn render(&mut self, frame: &LaneFrame<'_, T>);
}

impl<T: ?Sized, F> Renderer<T> for F
where
    F: FnMut(&LaneFrame<'_, T>),
{
    fn render(&mut self, frame: &LaneFrame<'_, T>) {
        self(frame)
    }
}

/// Read-only snapshot of everything a renderer needs
#[derive(Debug)]
pub struct LaneFrame<'a, T: ?Sized> {
    pub lane: &'a Lane<T>,
    pub offset: f32,
    pub phase: Phase,
    pub hovered: bool,
    pub axis: Axis,
    /// Present when tilt is enabled
    pub tilt: Option<TiltTransform>,
}

impl<'a, T: ?Sized> LaneFrame<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.lane.is_empty()
    }

    pub fn cycle_length(&self) -> f32 {
        self.lane.cycle_length()
    }

    /// Every item copy of the rendered lane
    pub fn placements(&self, viewport: f32) -> Vec<Placement<'a, T>> {
        self.lane.placements(self.offset, viewport)
    }

    /// Placements intersecting `[0, viewport)`
    pub fn visible(&self, viewport: f32) -> Vec<Placement<'a, T>> {
        self.placements(viewport)
            .into_iter()
            .filter(|p| p.end() > 0.0 && p.start < viewport)
            .collect()
    }
}

fn build_frame<'a, T: ?Sized>(
    lane: &'a Lane<T>,
    state: &ScrollState,
    config: &EngineConfig,
) -> LaneFrame<'a, T> {
    LaneFrame {
        lane,
        offset: state.offset,
        phase: state.phase,
        hovered: state.hovered,
        axis: config.axis,
        tilt: config
            .tilt_enabled
            .then(|| TiltTransform::for_direction(config.tilt_direction)),
    }
}

/// Infinite scroll lane engine
pub struct ScrollEngine<T: ?Sized> {
    config: EngineConfig,
    lane: Lane<T>,
    state: ScrollState,
    renderer: Option<Box<dyn Renderer<T>>>,
    detached: bool,
}

impl<T: ?Sized> ScrollEngine<T> {
    /// Create an engine at rest over `lane`
    pub fn new(lane: Lane<T>, config: EngineConfig) -> Self {
        let config = config.sanitized();
        let tilt = config
            .tilt_enabled
            .then(|| TiltTransform::for_direction(config.tilt_direction).to_css());
        debug!(
            items = lane.len(),
            cycle = lane.cycle_length(),
            autoplay = config.autoplay,
            tilt = tilt.as_deref().unwrap_or("none"),
            "Scroll engine created"
        );
        Self {
            config,
            lane,
            state: ScrollState::new(),
            renderer: None,
            detached: false,
        }
    }

    /// Attach the render callback
    pub fn with_renderer(mut self, renderer: impl Renderer<T> + 'static) -> Self {
        self.set_renderer(renderer);
        self
    }

    pub fn set_renderer(&mut self, renderer: impl Renderer<T> + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lane(&self) -> &Lane<T> {
        &self.lane
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> f32 {
        self.state.offset
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// True once `unmount` has run; all handlers are no-ops afterwards
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Snapshot for rendering
    pub fn frame(&self) -> LaneFrame<'_, T> {
        build_frame(&self.lane, &self.state, &self.config)
    }

    /// Invoke the renderer with the current state
    pub fn render(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&build_frame(&self.lane, &self.state, &self.config));
        }
    }

    /// True when autoplay is configured but suppressed by hover
    pub fn is_paused(&self) -> bool {
        self.config.autoplay && self.config.pause_on_hover && self.state.hovered
    }

    /// Autoplay velocity for the current frame after drag and hover rules
    fn autoplay_velocity(&self) -> f32 {
        if self.state.phase.is_dragging() || self.is_paused() {
            return 0.0;
        }
        self.config.autoplay_velocity()
    }

    fn can_mutate(&self) -> bool {
        !self.detached && self.lane.can_scroll()
    }

    /// Move the lane and immediately wrap
    fn advance(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        self.state.offset = wrap_offset(self.state.offset + delta, self.lane.cycle_length());
    }

    fn commit(&mut self) {
        self.state.mark_mutated();
        self.render();
    }

    fn axis_position(&self, point: Point) -> Option<f32> {
        let position = match self.config.axis {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        };
        position.is_finite().then_some(position)
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance one display refresh. Returns true if state changed.
    pub fn step(&mut self, dt: Duration) -> bool {
        if !self.can_mutate() {
            return false;
        }
        let frames = momentum::frames(dt);
        let autoplay = self.autoplay_velocity();
        let before = (self.state.offset, self.state.velocity, self.state.phase);

        match self.state.phase {
            Phase::Dragging => return false,
            Phase::Idle => self.advance(autoplay * frames),
            Phase::Momentum => {
                let applied = momentum::combined_velocity(
                    self.state.velocity,
                    autoplay,
                    self.config.max_velocity,
                );
                self.advance(applied * frames);
                self.state.velocity = momentum::decay(
                    self.state.velocity,
                    self.config.damping,
                    self.config.stop_threshold,
                );
                if self.state.velocity == 0.0 {
                    self.state.phase = Phase::Idle;
                    debug!(offset = self.state.offset, "Momentum settled");
                }
            }
        }

        let changed = before != (self.state.offset, self.state.velocity, self.state.phase);
        if changed {
            self.commit();
        }
        changed
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Route a pointer event to its handler. Returns true if state changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.point, event.at),
            PointerEventKind::Move => self.pointer_move(event.point, event.at),
            PointerEventKind::Up => self.pointer_up(event.point, event.at),
            PointerEventKind::Enter => self.pointer_enter(),
            PointerEventKind::Leave => self.pointer_leave(event.point, event.at),
            PointerEventKind::Wheel => self.wheel(event.wheel_delta),
        }
    }

    /// Start a drag; cancels any momentum
    pub fn pointer_down(&mut self, point: Point, at: Duration) -> bool {
        if !self.can_mutate() {
            return false;
        }
        let Some(position) = self.axis_position(point) else {
            return false;
        };
        self.state.phase = Phase::Dragging;
        self.state.velocity = 0.0;
        self.state.clear_samples();
        self.state.record_sample(PointerSample { position, at });
        debug!(position, "Drag started");
        self.commit();
        true
    }

    /// Follow the pointer while dragging
    pub fn pointer_move(&mut self, point: Point, at: Duration) -> bool {
        if !self.can_mutate() || !self.state.phase.is_dragging() {
            return false;
        }
        let Some(position) = self.axis_position(point) else {
            return false;
        };
        self.drag_to(position, at);
        self.commit();
        true
    }

    fn drag_to(&mut self, position: f32, at: Duration) {
        if let Some(last) = self.state.last_sample {
            self.advance((position - last.position) * self.config.drag_multiplier);
        }
        self.state.record_sample(PointerSample { position, at });
    }

    /// End a drag and hand off to momentum
    pub fn pointer_up(&mut self, point: Point, at: Duration) -> bool {
        if !self.can_mutate() || !self.state.phase.is_dragging() {
            return false;
        }
        self.release(point, at);
        self.commit();
        true
    }

    fn release(&mut self, point: Point, at: Duration) {
        if let (Some(position), Some(last)) = (self.axis_position(point), self.state.last_sample)
        {
            if position != last.position {
                self.drag_to(position, at);
            }
        }

        let velocity = momentum::release_velocity(
            self.state.prev_sample,
            self.state.last_sample,
            at,
            self.config.max_velocity,
        );
        self.state.clear_samples();

        if velocity.abs() >= self.config.stop_threshold {
            self.state.phase = Phase::Momentum;
            self.state.velocity = velocity;
        } else {
            self.state.phase = Phase::Idle;
            self.state.velocity = 0.0;
        }
        debug!(velocity, phase = ?self.state.phase, "Drag released");
    }

    /// Pointer entered the lane
    pub fn pointer_enter(&mut self) -> bool {
        if !self.can_mutate() || self.state.hovered {
            return false;
        }
        self.state.hovered = true;
        self.commit();
        true
    }

    /// Pointer left the lane; also releases an active drag
    pub fn pointer_leave(&mut self, point: Point, at: Duration) -> bool {
        if !self.can_mutate() {
            return false;
        }
        let dragging = self.state.phase.is_dragging();
        if !dragging && !self.state.hovered {
            return false;
        }
        if dragging {
            self.release(point, at);
        }
        self.state.hovered = false;
        self.commit();
        true
    }

    /// Nudge the lane by wheel notches
    pub fn wheel(&mut self, delta: f32) -> bool {
        if !self.can_mutate() || !delta.is_finite() || delta == 0.0 {
            return false;
        }
        let before = self.state.offset;
        self.advance(delta * self.config.wheel_multiplier);
        if before == self.state.offset {
            return false;
        }
        self.commit();
        true
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Replace the items; the offset is re-wrapped into the new cycle
    pub fn set_items(&mut self, lane: Lane<T>) {
        if self.detached {
            return;
        }
        self.lane = lane;
        if self.lane.can_scroll() {
            self.state.offset = wrap_offset(self.state.offset, self.lane.cycle_length());
        } else {
            let mutations = self.state.mutations;
            self.state = ScrollState::new();
            self.state.mutations = mutations;
        }
        debug!(
            items = self.lane.len(),
            cycle = self.lane.cycle_length(),
            "Lane items replaced"
        );
        self.commit();
    }

    /// Swap in a fresh configuration; scroll state restarts from rest
    ///
    /// The hover flag carries over since the pointer has not moved.
    pub fn reconfigure(&mut self, config: EngineConfig) {
        if self.detached {
            return;
        }
        self.config = config.sanitized();
        let hovered = self.state.hovered;
        let mutations = self.state.mutations;
        self.state = ScrollState::new();
        self.state.hovered = hovered;
        self.state.mutations = mutations;
        debug!(autoplay = self.config.autoplay, "Engine reconfigured");
        self.commit();
    }

    /// Freeze the engine; later steps and pointer events do nothing
    pub fn unmount(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.renderer = None;
        debug!(mutations = self.state.mutations, "Scroll engine unmounted");
    }
}

impl<T: ?Sized> std::fmt::Debug for ScrollEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("config", &self.config)
            .field("items", &self.lane.len())
            .field("state", &self.state)
            .field("detached", &self.detached)
            .finish()
    }
}

#[cfg(test)]
mod tests;

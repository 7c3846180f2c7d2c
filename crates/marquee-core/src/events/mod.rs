//! Pointer and frame event sources
//!
//! The engine never reaches for a global event stream. Embedders hand it a
//! `PointerSource` and a `FrameSource`; each subscription comes back as a
//! `Subscription` guard that deregisters the handler when dropped.

mod hub;

pub use hub::EventHub;

use std::fmt;
use std::time::Duration;

/// A pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Kinds of pointer events a handler can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Enter,
    Leave,
    Wheel,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 6] = [
        PointerEventKind::Down,
        PointerEventKind::Move,
        PointerEventKind::Up,
        PointerEventKind::Enter,
        PointerEventKind::Leave,
        PointerEventKind::Wheel,
    ];
}

/// A pointer event over the lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub point: Point,
    /// Timestamp on the source's monotonic clock
    pub at: Duration,
    /// Wheel notches along the scroll axis; 0 for non-wheel events
    pub wheel_delta: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, point: Point, at: Duration) -> Self {
        Self {
            kind,
            point,
            at,
            wheel_delta: 0.0,
        }
    }

    pub fn wheel(point: Point, at: Duration, delta: f32) -> Self {
        Self {
            kind: PointerEventKind::Wheel,
            point,
            at,
            wheel_delta: delta,
        }
    }
}

/// One display refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Time since the previous tick
    pub dt: Duration,
    /// Timestamp on the source's monotonic clock
    pub now: Duration,
}

pub type PointerHandler = Box<dyn FnMut(&PointerEvent)>;
pub type FrameHandler = Box<dyn FnMut(&FrameTick)>;

/// Guard for a registered handler; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Source of pointer events (the window/document-level stream)
pub trait PointerSource {
    fn subscribe(&self, kind: PointerEventKind, handler: PointerHandler) -> Subscription;
}

/// Source of display-refresh ticks
pub trait FrameSource {
    fn request_frames(&self, handler: FrameHandler) -> Subscription;
}

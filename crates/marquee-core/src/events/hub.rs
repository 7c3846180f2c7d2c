//! In-process event hub
//!
//! Single-threaded dispatcher implementing both `PointerSource` and
//! `FrameSource`. Embedders feed it raw input and clock ticks; tests use it as
//! a fake event stream.
//!
//! Handlers run to completion one at a time. An event emitted from inside a
//! handler is queued and delivered after the current dispatch finishes.
//! Handlers may subscribe or unsubscribe during dispatch; an unsubscribed
//! handler is never called again.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{
    FrameHandler, FrameSource, FrameTick, PointerEvent, PointerEventKind, PointerHandler,
    PointerSource, Subscription,
};

struct Registry<H, E> {
    next_id: u64,
    entries: Vec<(u64, H)>,
    dispatching: bool,
    /// Handlers taken out of `entries` by the running dispatch
    checked_out: usize,
    /// Ids unsubscribed while their entry was checked out for dispatch
    removed: Vec<u64>,
    pending: VecDeque<E>,
}

impl<H, E> Registry<H, E> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            dispatching: false,
            checked_out: 0,
            removed: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn insert(&mut self, handler: H) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    fn remove(&mut self, id: u64) {
        if let Some(pos) = self.entries.iter().position(|(entry, _)| *entry == id) {
            self.entries.remove(pos);
        } else if self.dispatching {
            self.removed.push(id);
        }
    }

    /// Subscribed handlers, including any checked out for dispatch
    fn live(&self) -> usize {
        (self.entries.len() + self.checked_out).saturating_sub(self.removed.len())
    }
}

type Shared<H, E> = Rc<RefCell<Registry<H, E>>>;

fn subscription_for<H: 'static, E: 'static>(registry: &Shared<H, E>, id: u64) -> Subscription {
    let weak: Weak<RefCell<Registry<H, E>>> = Rc::downgrade(registry);
    Subscription::new(move || {
        if let Some(registry) = weak.upgrade() {
            registry.borrow_mut().remove(id);
        }
    })
}

/// Deliver `event` (and anything queued meanwhile) to every live handler.
/// Returns the number of handler invocations.
fn dispatch<H, E>(
    registry: &Shared<H, E>,
    event: E,
    mut deliver: impl FnMut(&mut H, &E) -> bool,
) -> usize {
    let mut entries = {
        let mut reg = registry.borrow_mut();
        if reg.dispatching {
            reg.pending.push_back(event);
            return 0;
        }
        reg.dispatching = true;
        reg.checked_out = reg.entries.len();
        std::mem::take(&mut reg.entries)
    };

    let mut delivered = 0;
    let mut next = Some(event);
    while let Some(event) = next {
        for (id, handler) in entries.iter_mut() {
            if registry.borrow().removed.contains(id) {
                continue;
            }
            if deliver(handler, &event) {
                delivered += 1;
            }
        }
        next = registry.borrow_mut().pending.pop_front();
    }

    let mut reg = registry.borrow_mut();
    reg.dispatching = false;
    reg.checked_out = 0;
    let removed = std::mem::take(&mut reg.removed);
    entries.retain(|(id, _)| !removed.contains(id));
    // Handlers subscribed during dispatch landed in the live list
    entries.append(&mut reg.entries);
    reg.entries = entries;
    delivered
}

/// Single-threaded pointer and frame dispatcher
pub struct EventHub {
    pointer: Shared<(PointerEventKind, PointerHandler), PointerEvent>,
    frames: Shared<FrameHandler, FrameTick>,
    now: Cell<Duration>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            pointer: Rc::new(RefCell::new(Registry::new())),
            frames: Rc::new(RefCell::new(Registry::new())),
            now: Cell::new(Duration::ZERO),
        }
    }

    /// Dispatch a pointer event to handlers subscribed to its kind
    pub fn emit_pointer(&self, event: PointerEvent) -> usize {
        self.now.set(self.now.get().max(event.at));
        dispatch(&self.pointer, event, |(kind, handler), event| {
            if *kind == event.kind {
                handler(event);
                true
            } else {
                false
            }
        })
    }

    /// Advance the hub clock by `dt` and dispatch a frame tick
    pub fn tick(&self, dt: Duration) -> usize {
        let now = self.now.get() + dt;
        self.emit_frame(FrameTick { dt, now })
    }

    /// Dispatch a frame tick carrying its own timestamp
    pub fn emit_frame(&self, tick: FrameTick) -> usize {
        self.now.set(self.now.get().max(tick.now));
        dispatch(&self.frames, tick, |handler, tick| {
            handler(tick);
            true
        })
    }

    /// Current hub clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pointer_listeners(&self) -> usize {
        self.pointer.borrow().live()
    }

    pub fn frame_listeners(&self) -> usize {
        self.frames.borrow().live()
    }

    /// Total registered handlers of both kinds
    pub fn listener_count(&self) -> usize {
        self.pointer_listeners() + self.frame_listeners()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("pointer_listeners", &self.pointer_listeners())
            .field("frame_listeners", &self.frame_listeners())
            .field("now", &self.now.get())
            .finish()
    }
}

impl PointerSource for EventHub {
    fn subscribe(&self, kind: PointerEventKind, handler: PointerHandler) -> Subscription {
        let id = self.pointer.borrow_mut().insert((kind, handler));
        tracing::trace!(?kind, id, "Pointer handler subscribed");
        subscription_for(&self.pointer, id)
    }
}

impl FrameSource for EventHub {
    fn request_frames(&self, handler: FrameHandler) -> Subscription {
        let id = self.frames.borrow_mut().insert(handler);
        tracing::trace!(id, "Frame handler subscribed");
        subscription_for(&self.frames, id)
    }
}

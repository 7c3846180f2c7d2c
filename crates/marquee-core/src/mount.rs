//! Mounting an engine onto event sources
//!
//! `mount` wires a `ScrollEngine` to a pointer stream and a display-refresh
//! stream. Every handler holds only a weak reference to the engine, and every
//! subscription is released when the `MountedEngine` is unmounted or dropped.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::engine::{Lane, ScrollEngine};
use crate::events::{EventHub, FrameSource, PointerEventKind, PointerSource, Subscription};

/// The pointer and frame streams an engine listens to
#[derive(Clone)]
pub struct EventSources {
    pub pointer: Rc<dyn PointerSource>,
    pub frames: Rc<dyn FrameSource>,
}

impl EventSources {
    /// Use one hub for both streams
    pub fn from_hub(hub: &Rc<EventHub>) -> Self {
        Self {
            pointer: Rc::clone(hub) as Rc<dyn PointerSource>,
            frames: Rc::clone(hub) as Rc<dyn FrameSource>,
        }
    }
}

type SharedEngine<T> = Rc<RefCell<ScrollEngine<T>>>;

/// Run `f` against the engine if it is still alive and not already borrowed
fn with_engine<T: ?Sized>(
    weak: &Weak<RefCell<ScrollEngine<T>>>,
    f: impl FnOnce(&mut ScrollEngine<T>),
) {
    let Some(engine) = weak.upgrade() else {
        return;
    };
    let Ok(mut engine) = engine.try_borrow_mut() else {
        warn!("Dropping re-entrant engine event");
        return;
    };
    f(&mut engine);
}

/// An engine attached to its event sources
pub struct MountedEngine<T: ?Sized + 'static> {
    engine: SharedEngine<T>,
    sources: EventSources,
    pointer_subs: Vec<Subscription>,
    frame_sub: Option<Subscription>,
    mounted: bool,
}

/// Attach `engine` to `sources` and render the initial frame
///
/// Pointer kinds are all subscribed up front. Frames are only requested while
/// the lane has something to scroll.
pub fn mount<T: ?Sized + 'static>(engine: ScrollEngine<T>, sources: EventSources) -> MountedEngine<T> {
    let engine = Rc::new(RefCell::new(engine));

    let pointer_subs = PointerEventKind::ALL
        .iter()
        .map(|&kind| {
            let weak = Rc::downgrade(&engine);
            sources.pointer.subscribe(
                kind,
                Box::new(move |event| {
                    with_engine(&weak, |engine| {
                        engine.handle_pointer(event);
                    })
                }),
            )
        })
        .collect();

    let mut mounted = MountedEngine {
        engine,
        sources,
        pointer_subs,
        frame_sub: None,
        mounted: true,
    };
    mounted.sync_frames();
    mounted.engine.borrow_mut().render();
    debug!("Engine mounted");
    mounted
}

impl<T: ?Sized + 'static> MountedEngine<T> {
    /// Subscribe to frames iff the lane can scroll
    fn sync_frames(&mut self) {
        let wants_frames = self.mounted && self.engine.borrow().lane().can_scroll();
        match (wants_frames, self.frame_sub.is_some()) {
            (true, false) => {
                let weak = Rc::downgrade(&self.engine);
                self.frame_sub = Some(self.sources.frames.request_frames(Box::new(
                    move |tick| {
                        with_engine(&weak, |engine| {
                            engine.step(tick.dt);
                        })
                    },
                )));
                debug!("Frame callback scheduled");
            }
            (false, true) => {
                self.frame_sub = None;
                debug!("Frame callback cancelled");
            }
            _ => {}
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True while a frame callback is registered
    pub fn is_animating(&self) -> bool {
        self.frame_sub.is_some()
    }

    /// Borrow the engine
    pub fn engine(&self) -> Ref<'_, ScrollEngine<T>> {
        self.engine.borrow()
    }

    /// Read the engine through a closure
    pub fn with<R>(&self, f: impl FnOnce(&ScrollEngine<T>) -> R) -> R {
        f(&self.engine.borrow())
    }

    /// Mutate the engine through a closure
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut ScrollEngine<T>) -> R) -> R {
        f(&mut self.engine.borrow_mut())
    }

    /// Replace the lane, scheduling or cancelling frames as content changes
    pub fn set_items(&mut self, lane: Lane<T>) {
        if !self.mounted {
            return;
        }
        self.engine.borrow_mut().set_items(lane);
        self.sync_frames();
    }

    /// Hand the engine a fresh configuration
    pub fn reconfigure(&mut self, config: EngineConfig) {
        if !self.mounted {
            return;
        }
        self.engine.borrow_mut().reconfigure(config);
    }

    /// Detach from every source and freeze the engine. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.frame_sub = None;
        self.pointer_subs.clear();
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.unmount(),
            Err(_) => warn!("Engine busy during unmount; subscriptions released"),
        }
        debug!("Engine unmounted");
    }
}

impl<T: ?Sized + 'static> Drop for MountedEngine<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T: ?Sized + 'static> std::fmt::Debug for MountedEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedEngine")
            .field("mounted", &self.mounted)
            .field("pointer_subs", &self.pointer_subs.len())
            .field("animating", &self.frame_sub.is_some())
            .finish()
    }
}

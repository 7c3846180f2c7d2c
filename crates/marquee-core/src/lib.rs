//! Marquee Core Library
//!
//! Scroll engine for a tilted, auto-scrolling, infinitely looping lane of
//! cards. The engine owns offset, velocity and interaction phase; embedders
//! supply items, event sources and a render callback.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod mount;
pub mod paths;

pub use config::{AppConfig, AutoplayDirection, Axis, EngineConfig, LaneSettings, TiltDirection};
pub use engine::{Item, ItemId, Lane, LaneFrame, Phase, Placement, Renderer, ScrollEngine};
pub use error::{MarqueeError, Result};
pub use events::{EventHub, FrameSource, Point, PointerEvent, PointerEventKind, PointerSource};
pub use mount::{mount, EventSources, MountedEngine};

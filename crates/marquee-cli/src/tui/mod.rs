//! Terminal User Interface for Marquee

pub mod app;
mod demo_items;
mod lane_widget;
mod pointer;

// Re-exports
pub use app::App;

//! Engine constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// Animation timing
pub mod timing {
    use super::*;

    /// Frames per second the velocity units are expressed against
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Nominal display refresh interval for embedders without their own clock
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
}

/// Autoplay defaults
pub mod autoplay {
    /// Distance per reference frame when autoplay is on
    pub const DEFAULT_SPEED: f32 = 0.5;
}

/// Drag and momentum physics
pub mod physics {
    /// Per-frame momentum multiplier after a drag is released
    pub const DAMPING: f32 = 0.95;

    /// Momentum below this magnitude (distance per reference frame) stops dead
    pub const STOP_THRESHOLD: f32 = 0.05;

    /// Cap on combined momentum + autoplay velocity
    pub const MAX_VELOCITY: f32 = 60.0;

    /// Pointer delta to offset delta ratio while dragging
    pub const DRAG_MULTIPLIER: f32 = 1.0;

    /// Offset distance per wheel notch
    pub const WHEEL_MULTIPLIER: f32 = 2.0;

    /// A release later than this after the last drag sample means the pointer was held still
    pub const RELEASE_WINDOW: super::Duration = super::Duration::from_millis(100);
}

/// Lane layout
pub mod lane {
    /// Copies of the item sequence always present in the rendered lane
    pub const MIN_COPIES: usize = 2;

    /// Upper bound on rendered copies for tiny cycles in huge viewports
    pub const MAX_COPIES: usize = 1024;
}

/// Tilt transform angles, in degrees
pub mod tilt {
    /// Perspective lean away from the viewer
    pub const ROTATE_X_DEG: f32 = 20.0;

    /// In-plane rotation magnitude; sign follows the tilt direction
    pub const ROTATE_Z_DEG: f32 = 20.0;

    /// Horizontal skew magnitude; sign follows the tilt direction
    pub const SKEW_X_DEG: f32 = 20.0;
}

/// Config file layout
pub mod config {
    /// Config directory name under the home directory
    pub const CONFIG_DIR_NAME: &str = ".marquee";

    /// Config file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Logs subdirectory name
    pub const LOGS_DIR_NAME: &str = "logs";
}

//! Engine configuration
//!
//! `EngineConfig` is fixed for the life of an engine. Changing it means handing
//! the engine a fresh configuration, which also resets its scroll state.

mod file;

pub use file::{load_items, parse_items, AppConfig, LaneSettings};

use serde::{Deserialize, Serialize};

use crate::constants::{autoplay, physics};

/// Axis the lane scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Which way the lane's visual plane leans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltDirection {
    #[default]
    Left,
    Right,
}

impl TiltDirection {
    /// Sign applied to the skew angle
    pub fn sign(self) -> f32 {
        match self {
            TiltDirection::Left => 1.0,
            TiltDirection::Right => -1.0,
        }
    }
}

/// Autoplay travel direction
///
/// `Down` is forward (positive offset) along the scroll axis, `Up` is backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayDirection {
    Up,
    #[default]
    Down,
}

impl AutoplayDirection {
    /// +1 for forward travel, -1 for backward
    pub fn sign(self) -> f32 {
        match self {
            AutoplayDirection::Down => 1.0,
            AutoplayDirection::Up => -1.0,
        }
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            AutoplayDirection::Down => AutoplayDirection::Up,
            AutoplayDirection::Up => AutoplayDirection::Down,
        }
    }
}

/// Write an `f32` as its shortest decimal form rather than the widened `f64`
fn shortest_f32<S: serde::Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    let widened = value.to_string().parse().unwrap_or(f64::from(*value));
    serializer.serialize_f64(widened)
}

/// Per-mount engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scroll axis; picks which pointer coordinate drives drags
    pub axis: Axis,
    /// Apply the static perspective skew to the lane
    pub tilt_enabled: bool,
    /// Sign of the skew
    pub tilt_direction: TiltDirection,
    /// Advance the lane on every frame
    pub autoplay: bool,
    /// Autoplay distance per reference frame
    #[serde(serialize_with = "shortest_f32")]
    pub autoplay_speed: f32,
    /// Autoplay travel direction
    pub autoplay_direction: AutoplayDirection,
    /// Suppress autoplay while the pointer is over the lane
    pub pause_on_hover: bool,
    /// Per-frame momentum multiplier, in (0, 1)
    #[serde(serialize_with = "shortest_f32")]
    pub damping: f32,
    /// Momentum magnitude below which the lane stops
    #[serde(serialize_with = "shortest_f32")]
    pub stop_threshold: f32,
    /// Cap on applied velocity
    #[serde(serialize_with = "shortest_f32")]
    pub max_velocity: f32,
    /// Pointer delta to offset delta ratio while dragging
    #[serde(serialize_with = "shortest_f32")]
    pub drag_multiplier: f32,
    /// Offset distance per wheel notch
    #[serde(serialize_with = "shortest_f32")]
    pub wheel_multiplier: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            tilt_enabled: true,
            tilt_direction: TiltDirection::Left,
            autoplay: false,
            autoplay_speed: autoplay::DEFAULT_SPEED,
            autoplay_direction: AutoplayDirection::Down,
            pause_on_hover: false,
            damping: physics::DAMPING,
            stop_threshold: physics::STOP_THRESHOLD,
            max_velocity: physics::MAX_VELOCITY,
            drag_multiplier: physics::DRAG_MULTIPLIER,
            wheel_multiplier: physics::WHEEL_MULTIPLIER,
        }
    }
}

impl EngineConfig {
    /// Clamp degenerate values into their accepted ranges
    ///
    /// Speed that is negative or non-finite becomes 0. Physics tunables outside
    /// their range fall back to the defaults.
    pub fn sanitized(mut self) -> Self {
        if !self.autoplay_speed.is_finite() || self.autoplay_speed < 0.0 {
            tracing::warn!(speed = self.autoplay_speed, "Clamping autoplay speed to 0");
            self.autoplay_speed = 0.0;
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            tracing::warn!(damping = self.damping, "Damping out of range, using default");
            self.damping = physics::DAMPING;
        }
        if !(self.stop_threshold.is_finite() && self.stop_threshold > 0.0) {
            self.stop_threshold = physics::STOP_THRESHOLD;
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            self.max_velocity = physics::MAX_VELOCITY;
        }
        if !self.drag_multiplier.is_finite() {
            self.drag_multiplier = physics::DRAG_MULTIPLIER;
        }
        if !self.wheel_multiplier.is_finite() {
            self.wheel_multiplier = physics::WHEEL_MULTIPLIER;
        }
        self
    }

    /// Signed autoplay velocity, ignoring hover and drag
    pub fn autoplay_velocity(&self) -> f32 {
        if self.autoplay {
            self.autoplay_speed * self.autoplay_direction.sign()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.tilt_enabled);
        assert_eq!(config.tilt_direction, TiltDirection::Left);
        assert!(!config.autoplay);
        assert_eq!(config.autoplay_speed, 0.5);
        assert_eq!(config.autoplay_direction, AutoplayDirection::Down);
        assert!(!config.pause_on_hover);
    }

    #[test]
    fn test_sanitize_clamps_speed() {
        for speed in [-3.0, f32::NAN, f32::INFINITY] {
            let config = EngineConfig {
                autoplay_speed: speed,
                ..Default::default()
            }
            .sanitized();
            assert_eq!(config.autoplay_speed, 0.0);
        }
    }

    #[test]
    fn test_sanitize_restores_physics_defaults() {
        let config = EngineConfig {
            damping: 1.5,
            stop_threshold: 0.0,
            max_velocity: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.damping, physics::DAMPING);
        assert_eq!(config.stop_threshold, physics::STOP_THRESHOLD);
        assert_eq!(config.max_velocity, physics::MAX_VELOCITY);
    }

    #[test]
    fn test_autoplay_velocity_sign() {
        let mut config = EngineConfig {
            autoplay: true,
            autoplay_speed: 2.0,
            ..Default::default()
        };
        assert_eq!(config.autoplay_velocity(), 2.0);
        config.autoplay_direction = AutoplayDirection::Up;
        assert_eq!(config.autoplay_velocity(), -2.0);
        config.autoplay = false;
        assert_eq!(config.autoplay_velocity(), 0.0);
    }
}

//! Static perspective tilt of the lane's visual plane
//!
//! Purely cosmetic; nothing here feeds back into offset math.

use crate::config::TiltDirection;
use crate::constants::tilt::{ROTATE_X_DEG, ROTATE_Z_DEG, SKEW_X_DEG};

/// Transform a renderer applies to the whole lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    pub rotate_x_deg: f32,
    pub rotate_z_deg: f32,
    pub skew_x_deg: f32,
}

impl TiltTransform {
    /// Transform for a tilt direction
    ///
    /// Left leans the lane with `rotateZ(-20°) skewX(20°)`, right mirrors it.
    pub fn for_direction(direction: TiltDirection) -> Self {
        let sign = direction.sign();
        Self {
            rotate_x_deg: ROTATE_X_DEG,
            rotate_z_deg: -sign * ROTATE_Z_DEG,
            skew_x_deg: sign * SKEW_X_DEG,
        }
    }

    /// Horizontal displacement per unit of vertical distance from the skew
    pub fn shear(&self) -> f32 {
        self.skew_x_deg.to_radians().tan()
    }

    /// CSS-style transform string, as logged on engine creation
    pub fn to_css(&self) -> String {
        format!(
            "rotateX({}deg) rotateZ({}deg) skewX({}deg)",
            self.rotate_x_deg, self.rotate_z_deg, self.skew_x_deg
        )
    }
}

//! Coordinate remapping between capture and replay surfaces.

use crate::error::{CoreError, Result};
use crate::geometry::{Extent, Point};

/// Per-axis scale ratios from capture space into replay space.
///
/// Computed once at replay start and frozen for the session; surface resizes
/// after start produce stale scaling (a documented limitation, not an error).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub width_scale: f64,
    pub height_scale: f64,
}

impl ScaleFactors {
    /// Compute the ratios mapping `capture` coordinates onto `replay`.
    ///
    /// A degenerate capture dimension is a precondition violation and is
    /// rejected before it can surface as `Infinity`/`NaN` coordinates.
    pub fn between(capture: Extent, replay: Extent) -> Result<Self> {
        if !capture.is_positive() {
            return Err(CoreError::InvalidConfiguration(format!(
                "capture viewport {}x{}",
                capture.width, capture.height
            )));
        }
        Ok(Self {
            width_scale: replay.width / capture.width,
            height_scale: replay.height / capture.height,
        })
    }

    /// The 1:1 mapping.
    pub const fn identity() -> Self {
        Self {
            width_scale: 1.0,
            height_scale: 1.0,
        }
    }

    /// Whether coordinates pass through unchanged.
    pub fn is_identity(&self) -> bool {
        self.width_scale == 1.0 && self.height_scale == 1.0
    }

    /// Whether either axis maps onto a smaller surface.
    pub fn is_downscale(&self) -> bool {
        self.width_scale < 1.0 || self.height_scale < 1.0
    }

    /// Remap a capture-space point into replay space.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x * self.width_scale, point.y * self.height_scale)
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::identity()
    }
}

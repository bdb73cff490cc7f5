//! Capture surface configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::geometry::Extent;

/// The surface observed during a capture session.
///
/// `target` is an opaque descriptor re-resolved against the replay
/// environment; `viewport` holds the dimensions the coordinates in the log
/// are relative to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Dimensions of the surface at capture time.
    pub viewport: Extent,
    /// Opaque locator for the analogous surface at replay time.
    pub target: String,
}

impl SurfaceConfig {
    /// Create a configuration for the given target and dimensions.
    pub fn new(target: impl Into<String>, viewport: Extent) -> Self {
        Self {
            viewport,
            target: target.into(),
        }
    }

    /// Reject zero or negative viewport dimensions.
    pub fn validate(&self) -> Result<()> {
        if !self.viewport.is_positive() {
            return Err(CoreError::InvalidConfiguration(format!(
                "viewport {}x{} for target '{}'",
                self.viewport.width, self.viewport.height, self.target
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_positive() {
        let config = SurfaceConfig::new("body", Extent::new(800.0, 600.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let config = SurfaceConfig::new("body", Extent::new(0.0, 600.0));
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let config = SurfaceConfig::new("#app", Extent::new(1024.0, 768.0));
        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["viewport"]["width"], 1024.0);
        assert_eq!(json["viewport"]["height"], 768.0);
        assert_eq!(json["target"], "#app");
    }
}

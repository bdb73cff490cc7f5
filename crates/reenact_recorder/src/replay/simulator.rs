//! Projection of captured events into replay-surface inputs.

use reenact_core::{CoreError, EventPayload, Point, Result, ScaleFactors};

/// A captured payload remapped into replay-surface space.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectedInput {
    /// Key press to synthesize (down followed by up).
    Key { key: String },
    /// Pointer movement at a rescaled coordinate.
    Move { position: Point },
    /// Click activation at a rescaled coordinate.
    Click { position: Point },
}

/// Converts captured payloads into dispatchable inputs.
///
/// Holds the session scale factors, frozen at replay start, and tracks the
/// last projected pointer position for diagnostics.
pub struct InputProjector {
    scale: ScaleFactors,
    position: Option<Point>,
}

impl InputProjector {
    /// Create a projector for one replay session.
    pub fn new(scale: ScaleFactors) -> Self {
        Self {
            scale,
            position: None,
        }
    }

    /// The session scale factors.
    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    /// The last projected pointer position, if any pointer event ran.
    pub fn last_position(&self) -> Option<Point> {
        self.position
    }

    /// Project one payload. Unrecognized kinds are rejected so the caller
    /// can skip the entry and continue.
    pub fn project(&mut self, payload: &EventPayload) -> Result<ProjectedInput> {
        match payload {
            EventPayload::Key { key } => Ok(ProjectedInput::Key { key: key.clone() }),
            EventPayload::PointerMove { x, y } => {
                let position = self.scale.apply(Point::new(*x, *y));
                self.position = Some(position);
                Ok(ProjectedInput::Move { position })
            }
            EventPayload::PointerClick { x, y } => {
                let position = self.scale.apply(Point::new(*x, *y));
                self.position = Some(position);
                Ok(ProjectedInput::Click { position })
            }
            EventPayload::Unknown { kind } => Err(CoreError::UnknownEventKind(kind.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reenact_core::Extent;

    fn doubling() -> InputProjector {
        let scale =
            ScaleFactors::between(Extent::new(100.0, 100.0), Extent::new(200.0, 200.0)).unwrap();
        InputProjector::new(scale)
    }

    #[test]
    fn test_click_is_rescaled() {
        let mut projector = doubling();
        let projected = projector
            .project(&EventPayload::PointerClick { x: 50.0, y: 50.0 })
            .unwrap();
        assert_eq!(
            projected,
            ProjectedInput::Click {
                position: Point::new(100.0, 100.0)
            }
        );
        assert_eq!(projector.last_position(), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_key_passes_through() {
        let mut projector = doubling();
        let projected = projector
            .project(&EventPayload::Key {
                key: "a".to_string(),
            })
            .unwrap();
        assert_eq!(
            projected,
            ProjectedInput::Key {
                key: "a".to_string()
            }
        );
        assert_eq!(projector.last_position(), None);
    }

    #[test]
    fn test_identity_scale_preserves_coordinates() {
        let mut projector = InputProjector::new(ScaleFactors::identity());
        let projected = projector
            .project(&EventPayload::PointerMove { x: 12.5, y: 34.5 })
            .unwrap();
        assert_eq!(
            projected,
            ProjectedInput::Move {
                position: Point::new(12.5, 34.5)
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut projector = doubling();
        let err = projector
            .project(&EventPayload::Unknown {
                kind: "scroll".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownEventKind(kind) if kind == "scroll"));
    }
}

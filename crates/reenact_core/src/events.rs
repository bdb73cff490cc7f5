//! Captured interaction events and their wire form.
//!
//! Events travel as flat `{ "time": n, "type": s, "data": {...} }` objects,
//! where `type` selects the shape of `data`. Internally the payload is a
//! tagged union matched exhaustively at dispatch time.

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::timestamp::Timestamp;

/// Wire name for key-down events.
pub const KIND_KEYBOARD: &str = "keyboard";
/// Wire name for pointer-move events.
pub const KIND_MOUSE: &str = "mouse";
/// Wire name for pointer-click events.
pub const KIND_CLICK: &str = "click";

/// Payload of a captured event.
///
/// `Unknown` is never produced by a recorder; it carries a wire record whose
/// `type` is not one of the three supported kinds, so a single malformed
/// entry can be skipped at dispatch time instead of failing the whole log.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// A key press, identified by its key value.
    Key { key: String },
    /// Pointer movement to an absolute capture-surface coordinate.
    PointerMove { x: f64, y: f64 },
    /// Pointer click at an absolute capture-surface coordinate.
    PointerClick { x: f64, y: f64 },
    /// A record with an unrecognized `type` field.
    Unknown { kind: String },
}

impl EventPayload {
    /// The wire name of this payload's kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::Key { .. } => KIND_KEYBOARD,
            Self::PointerMove { .. } => KIND_MOUSE,
            Self::PointerClick { .. } => KIND_CLICK,
            Self::Unknown { kind } => kind,
        }
    }

    /// The coordinate payload, for pointer kinds.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { x, y } | Self::PointerClick { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// A single timestamped interaction event.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedEvent {
    /// Offset from capture start.
    pub time: Timestamp,
    /// What was captured.
    pub payload: EventPayload,
}

impl CapturedEvent {
    /// Create a new captured event.
    pub fn new(time: Timestamp, payload: EventPayload) -> Self {
        Self { time, payload }
    }
}

#[derive(Serialize, Deserialize)]
struct RawEvent {
    time: Timestamp,
    #[serde(rename = "type")]
    kind: String,
    data: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct KeyData {
    key: String,
}

#[derive(Serialize, Deserialize)]
struct CoordinateData {
    x: f64,
    y: f64,
}

impl Serialize for CapturedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = match &self.payload {
            EventPayload::Key { key } => {
                serde_json::to_value(KeyData { key: key.clone() }).map_err(serde::ser::Error::custom)?
            }
            EventPayload::PointerMove { x, y } | EventPayload::PointerClick { x, y } => {
                serde_json::to_value(CoordinateData { x: *x, y: *y })
                    .map_err(serde::ser::Error::custom)?
            }
            EventPayload::Unknown { .. } => serde_json::Value::Object(Default::default()),
        };
        let raw = RawEvent {
            time: self.time,
            kind: self.payload.kind().to_string(),
            data,
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CapturedEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEvent::deserialize(deserializer)?;
        let payload = match raw.kind.as_str() {
            KIND_KEYBOARD => {
                let data: KeyData = serde_json::from_value(raw.data).map_err(DeError::custom)?;
                EventPayload::Key { key: data.key }
            }
            KIND_MOUSE => {
                let data: CoordinateData =
                    serde_json::from_value(raw.data).map_err(DeError::custom)?;
                EventPayload::PointerMove {
                    x: data.x,
                    y: data.y,
                }
            }
            KIND_CLICK => {
                let data: CoordinateData =
                    serde_json::from_value(raw.data).map_err(DeError::custom)?;
                EventPayload::PointerClick {
                    x: data.x,
                    y: data.y,
                }
            }
            _ => EventPayload::Unknown { kind: raw.kind },
        };
        Ok(Self {
            time: raw.time,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_wire_shape() {
        let event = CapturedEvent::new(
            Timestamp::from_millis(10),
            EventPayload::PointerClick { x: 50.0, y: 60.0 },
        );
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["time"], 10);
        assert_eq!(json["type"], "click");
        assert_eq!(json["data"]["x"], 50.0);
        assert_eq!(json["data"]["y"], 60.0);
    }

    #[test]
    fn test_keyboard_round_trip() {
        let event = CapturedEvent::new(
            Timestamp::from_millis(3),
            EventPayload::Key {
                key: "Enter".to_string(),
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: CapturedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_mouse_round_trip() {
        let json = r#"{"time": 5.3, "type": "mouse", "data": {"x": 1.5, "y": 2.5}}"#;
        let event: CapturedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.time.as_millis(), 5);
        assert_eq!(event.payload, EventPayload::PointerMove { x: 1.5, y: 2.5 });
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let json = r#"{"time": 5, "type": "scroll", "data": {"x": 1, "y": 2}}"#;
        let event: CapturedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Unknown {
                kind: "scroll".to_string()
            }
        );
        assert_eq!(event.payload.kind(), "scroll");
    }

    #[test]
    fn test_known_kind_with_bad_data_fails() {
        let json = r#"{"time": 5, "type": "click", "data": {"key": "a"}}"#;
        assert!(serde_json::from_str::<CapturedEvent>(json).is_err());
    }

    #[test]
    fn test_position_accessor() {
        let move_event = EventPayload::PointerMove { x: 3.0, y: 4.0 };
        assert_eq!(move_event.position(), Some(Point::new(3.0, 4.0)));

        let key_event = EventPayload::Key {
            key: "a".to_string(),
        };
        assert_eq!(key_event.position(), None);
    }
}

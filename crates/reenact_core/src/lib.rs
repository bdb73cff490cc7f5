//! Reenact Core
//!
//! Foundational primitives for interaction capture and replay:
//!
//! - **Event model**: timestamped, tagged interaction events
//! - **Event log**: the capture wire format and its field contracts
//! - **Coordinate scaling**: remapping between capture and replay surfaces
//!
//! # Example
//!
//! ```rust
//! use reenact_core::{EventLog, ScaleFactors, Extent, Point};
//!
//! let log = EventLog::from_json(
//!     r#"{"configuration": {"viewport": {"width": 100.0, "height": 100.0},
//!         "target": "body"},
//!         "events": [{"time": 10, "type": "click", "data": {"x": 50.0, "y": 50.0}}]}"#,
//! ).unwrap();
//!
//! let scale = ScaleFactors::between(
//!     log.configuration.viewport,
//!     Extent::new(200.0, 200.0),
//! ).unwrap();
//! assert_eq!(scale.apply(Point::new(50.0, 50.0)), Point::new(100.0, 100.0));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod log;
pub mod scale;
pub mod timestamp;

pub use config::SurfaceConfig;
pub use error::{CoreError, Result};
pub use events::{CapturedEvent, EventPayload};
pub use geometry::{Extent, Point};
pub use log::EventLog;
pub use scale::ScaleFactors;
pub use timestamp::Timestamp;

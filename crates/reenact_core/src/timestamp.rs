//! Millisecond timestamps relative to capture start.

use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A millisecond offset from the start of a capture session.
///
/// Timestamps are non-negative by construction. On the wire they are plain
/// JSON numbers; fractional values (high-resolution capture clocks emit
/// sub-millisecond offsets) are rounded to the nearest millisecond on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from a millisecond offset.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The zero offset (capture start).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the offset in milliseconds.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Add a millisecond offset, saturating at the numeric bound.
    pub const fn saturating_add(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl From<Duration> for Timestamp {
    fn from(d: Duration) -> Self {
        Self(d.as_millis() as u64)
    }
}

impl From<Timestamp> for Duration {
    fn from(t: Timestamp) -> Self {
        Duration::from_millis(t.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        if !raw.is_finite() {
            return Err(de::Error::custom("event time must be finite"));
        }
        if raw < 0.0 {
            return Err(de::Error::custom("event time must be non-negative"));
        }
        Ok(Self(raw.round() as u64))
    }
}

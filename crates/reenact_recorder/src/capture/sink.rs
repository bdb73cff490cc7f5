//! Persistence interface for finished captures.
//!
//! Download/storage mechanics are out of scope; the recorder only hands a
//! serialized log to whatever sink the host environment provides.

use reenact_core::Result;

/// Receives the serialized wire form of a finished capture.
pub trait CaptureSink: Send + Sync {
    /// Persist one serialized event log.
    fn persist(&self, serialized: &str) -> Result<()>;
}

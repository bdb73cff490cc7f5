//! Replay session clock.

use std::sync::Arc;
use std::time::Duration;

use reenact_core::Timestamp;

use crate::time::TimeSource;

/// Tracks elapsed replay time against a [`TimeSource`].
///
/// The clock records the session start and exposes the `delta` the tick
/// algorithm compares event offsets against. Swapping the time source for a
/// manual one makes a whole session deterministic.
#[derive(Clone)]
pub struct ReplayClock {
    source: Arc<dyn TimeSource>,
    started: Option<Duration>,
}

impl ReplayClock {
    /// Create a clock that has not started yet.
    pub fn new(source: Arc<dyn TimeSource>) -> Self {
        Self {
            source,
            started: None,
        }
    }

    /// Record the session start.
    pub fn start(&mut self) {
        self.started = Some(self.source.now());
    }

    /// Whether the session start has been recorded.
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Time elapsed since the session start; zero before `start`.
    pub fn elapsed(&self) -> Timestamp {
        match self.started {
            Some(start) => Timestamp::from(self.source.now().saturating_sub(start)),
            None => Timestamp::zero(),
        }
    }

    /// Forget the session start.
    pub fn reset(&mut self) {
        self.started = None;
    }
}

//! The captured event log.

use serde::{Deserialize, Serialize};

use crate::config::SurfaceConfig;
use crate::error::{CoreError, Result};
use crate::events::CapturedEvent;
use crate::timestamp::Timestamp;

/// An ordered collection of captured events plus the configuration of the
/// surface they were captured against.
///
/// Logs are produced by a recorder on stop and are immutable afterwards;
/// replay consumes them through a cursor without mutating the event sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    /// Capture-time surface configuration.
    pub configuration: SurfaceConfig,
    /// Events in capture order, times non-decreasing.
    pub events: Vec<CapturedEvent>,
}

impl EventLog {
    /// Create a log from a configuration and an ordered event sequence.
    pub fn new(configuration: SurfaceConfig, events: Vec<CapturedEvent>) -> Self {
        Self {
            configuration,
            events,
        }
    }

    /// Number of events in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Offset of the last event, i.e. the minimum replay duration.
    pub fn duration(&self) -> Timestamp {
        self.events.last().map(|e| e.time).unwrap_or_default()
    }

    /// Examine the log before replay: the configuration must be valid and
    /// event times must be non-decreasing.
    pub fn examine(&self) -> Result<()> {
        self.configuration.validate()?;
        for pair in self.events.windows(2) {
            if pair[1].time < pair[0].time {
                return Err(CoreError::MalformedLog(format!(
                    "event at {} precedes event at {}",
                    pair[1].time, pair[0].time
                )));
            }
        }
        Ok(())
    }

    /// Serialize to the capture wire format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and examine a serialized capture.
    pub fn from_json(json: &str) -> Result<Self> {
        let log: Self = serde_json::from_str(json)?;
        log.examine()?;
        Ok(log)
    }
}

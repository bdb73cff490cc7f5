//! Event capture.
//!
//! A `Recorder` subscribes to the input substrate, accumulates timestamped
//! events relative to its capture start, and finalizes them into an
//! immutable [`EventLog`] on stop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reenact_core::{CapturedEvent, EventLog, Result, SurfaceConfig, Timestamp};
use tracing::{debug, info};

use super::config::RecorderConfig;
use super::sink::CaptureSink;
use super::sources::{InputKind, InputSource, SubscriptionToken};
use crate::surface::{resolve_or_default, Surface, SurfaceResolver};
use crate::time::TimeSource;

/// Captures a user's interaction with a surface as a timestamped event log.
pub struct Recorder {
    config: RecorderConfig,
    source: Arc<dyn InputSource>,
    resolver: Arc<dyn SurfaceResolver>,
    time: Arc<dyn TimeSource>,
    buffer: Arc<Mutex<Vec<CapturedEvent>>>,
    surface: Option<Arc<dyn Surface>>,
    tokens: Vec<SubscriptionToken>,
    started_at: Option<Duration>,
    ended_at: Option<Duration>,
}

impl Recorder {
    /// Create an idle recorder.
    pub fn new(
        config: RecorderConfig,
        source: Arc<dyn InputSource>,
        resolver: Arc<dyn SurfaceResolver>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            source,
            resolver,
            time,
            buffer: Arc::new(Mutex::new(Vec::new())),
            surface: None,
            tokens: Vec::new(),
            started_at: None,
            ended_at: None,
        }
    }

    /// Whether a capture is in progress.
    pub fn is_running(&self) -> bool {
        self.surface.is_some()
    }

    /// Start capturing.
    ///
    /// Resolves the configured target, falling back to the default surface
    /// on a miss (logged, non-fatal), snapshots its dimensions, records the
    /// capture start and subscribes the enabled input classes. Starting an
    /// already-running recorder is a logged no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("capture already running, ignoring start");
            return;
        }

        let surface = resolve_or_default(self.resolver.as_ref(), &self.config.target);
        let t0 = self.time.now();
        self.started_at = Some(t0);
        self.ended_at = None;
        self.buffer.lock().clear();

        let kinds = [
            (InputKind::PointerClick, self.config.clicks),
            (InputKind::PointerMove, self.config.pointer_moves),
            (InputKind::KeyDown, self.config.keys),
        ];
        for (kind, enabled) in kinds {
            if !enabled {
                continue;
            }
            let buffer = Arc::clone(&self.buffer);
            let time = Arc::clone(&self.time);
            let token = self.source.subscribe(
                kind,
                Box::new(move |notice| {
                    // Notices arrive in real-time order, so offsets are
                    // non-negative and non-decreasing.
                    let offset = time.now().saturating_sub(t0);
                    buffer
                        .lock()
                        .push(CapturedEvent::new(Timestamp::from(offset), notice.into_payload()));
                }),
            );
            self.tokens.push(token);
        }

        self.surface = Some(surface);
        info!(
            target_descriptor = %self.config.target,
            "capture started at {}ms",
            t0.as_millis()
        );
    }

    /// Stop capturing and yield the finished log.
    ///
    /// Unsubscribes every input source exactly once and finalizes the
    /// configuration with the final observed dimensions. Returns `None`
    /// when no capture was running; nothing is unsubscribed in that path.
    pub fn stop(&mut self) -> Option<EventLog> {
        let surface = match self.surface.take() {
            Some(surface) => surface,
            None => {
                debug!("stop without an active capture");
                return None;
            }
        };

        for token in self.tokens.drain(..) {
            self.source.unsubscribe(token);
        }

        let t_end = self.time.now();
        self.ended_at = Some(t_end);

        let events = std::mem::take(&mut *self.buffer.lock());
        let configuration = SurfaceConfig::new(self.config.target.clone(), surface.extent());
        info!(
            event_count = events.len(),
            "capture finished at {}ms",
            t_end.as_millis()
        );
        Some(EventLog::new(configuration, events))
    }

    /// Stop capturing and persist the serialized log through a sink.
    pub fn stop_into(&mut self, sink: &dyn CaptureSink) -> Result<Option<EventLog>> {
        match self.stop() {
            Some(log) => {
                sink.persist(&log.to_json()?)?;
                Ok(Some(log))
            }
            None => Ok(None),
        }
    }

    /// The capture window `[t0, tEnd]`, for diagnostics.
    ///
    /// `None` until the first capture completes; the end bound is the stop
    /// time of the most recent capture.
    pub fn capture_duration(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some((Timestamp::from(start), Timestamp::from(end))),
            _ => None,
        }
    }
}

//! The replay engine.
//!
//! A tick-driven scheduler that drains a captured event log in order,
//! remaps coordinates into the replay surface's space and synthesizes the
//! equivalent input events, keeping the transient marker state bounded.

use std::sync::Arc;
use std::time::Duration;

use reenact_core::{
    CapturedEvent, CoreError, EventLog, Result, ScaleFactors, Timestamp,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::clock::ReplayClock;
use super::markers::{MarkerManager, MarkerPolicy};
use super::simulator::{InputProjector, ProjectedInput};
use crate::surface::{resolve_or_default, Surface, SurfaceResolver, SyntheticEvent};
use crate::time::TimeSource;

/// Lifecycle of a replay engine. `Stopped` is terminal; replaying another
/// log takes a `reset()` or a fresh engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Before `start()`.
    Idle,
    /// The tick loop is active.
    Running,
    /// Ended, by explicit `stop()` or by draining the queue.
    Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is not running; the driver should stop ticking.
    NotRunning,
    /// The head event is not due yet.
    Waiting,
    /// Exactly one event was consumed.
    Dispatched,
    /// The queue drained; the engine transitioned to `Stopped`.
    Finished,
}

/// Configuration for a replay session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Interval between scheduling ticks, in milliseconds.
    pub tick_rate_ms: u64,
    /// Capacity of the click-marker window.
    pub click_marker_cap: usize,
    /// Capacity of the path-marker window.
    pub path_marker_cap: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        let policy = MarkerPolicy::default();
        Self {
            tick_rate_ms: 1,
            click_marker_cap: policy.click_cap,
            path_marker_cap: policy.path_cap,
        }
    }
}

impl ReplayConfig {
    /// Create a config for testing (1ms ticks, default caps).
    pub fn testing() -> Self {
        Self::default()
    }

    /// Set the tick interval.
    pub fn with_tick_rate_ms(mut self, rate: u64) -> Self {
        self.tick_rate_ms = rate;
        self
    }

    /// Set both marker capacities.
    pub fn with_marker_caps(mut self, click: usize, path: usize) -> Self {
        self.click_marker_cap = click;
        self.path_marker_cap = path;
        self
    }

    /// The tick interval as a duration.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn marker_policy(&self) -> MarkerPolicy {
        MarkerPolicy {
            click_cap: self.click_marker_cap,
            path_cap: self.path_marker_cap,
        }
    }
}

/// Per-session state, born at `start()` and torn down by `stop()`.
///
/// The event queue is a cursor into an immutable arena: nothing is removed,
/// which keeps the consumed prefix inspectable after the fact.
struct Session {
    events: Vec<CapturedEvent>,
    cursor: usize,
    surface: Arc<dyn Surface>,
    clock: ReplayClock,
    projector: InputProjector,
    markers: MarkerManager,
}

impl Session {
    fn drained(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Dispatch one event. Per-event failures are logged and recovered so a
    /// malformed record degrades the session instead of aborting it.
    fn dispatch(&mut self, event: &CapturedEvent) {
        let projected = match self.projector.project(&event.payload) {
            Ok(projected) => projected,
            Err(err) => {
                error!("skipping event at {}: {err}", event.time);
                return;
            }
        };

        match projected {
            ProjectedInput::Key { key } => {
                self.emit(SyntheticEvent::KeyDown { key: key.clone() });
                self.emit(SyntheticEvent::KeyUp { key });
            }
            ProjectedInput::Move { position } => {
                self.emit(SyntheticEvent::PointerMove { position });
                self.markers.note_move(self.surface.as_ref(), position);
            }
            ProjectedInput::Click { position } => {
                // Activation may miss; the marker is placed regardless so
                // the visual record stays faithful.
                self.emit(SyntheticEvent::Activate { position });
                self.markers.note_click(self.surface.as_ref(), position);
            }
        }
    }

    fn emit(&self, event: SyntheticEvent) {
        if let Err(err) = self.surface.dispatch(event) {
            warn!("dispatch failed: {err}");
        }
    }
}

/// Replays an [`EventLog`] against a resolved surface.
///
/// Each engine instance owns its session state, so independent replays are
/// constructible side by side. The engine never schedules itself: a driver
/// (a real timer or a test loop) calls [`tick`](Self::tick) every
/// `tick_rate`.
pub struct ReplayEngine {
    config: ReplayConfig,
    resolver: Arc<dyn SurfaceResolver>,
    time: Arc<dyn TimeSource>,
    state: EngineState,
    session: Option<Session>,
}

impl ReplayEngine {
    /// Create an idle engine.
    pub fn new(
        config: ReplayConfig,
        resolver: Arc<dyn SurfaceResolver>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            resolver,
            time,
            state: EngineState::Idle,
            session: None,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of events consumed so far this session.
    pub fn dispatched(&self) -> usize {
        self.session.as_ref().map(|s| s.cursor).unwrap_or(0)
    }

    /// Number of events still queued.
    pub fn remaining(&self) -> usize {
        self.session
            .as_ref()
            .map(|s| s.events.len() - s.cursor)
            .unwrap_or(0)
    }

    /// The session scale factors, once started.
    pub fn scale(&self) -> Option<ScaleFactors> {
        self.session.as_ref().map(|s| s.projector.scale())
    }

    /// Begin replaying a log.
    ///
    /// Validates the capture configuration (fatal on degenerate
    /// dimensions), resolves the replay surface with fallback-to-default on
    /// a miss, freezes the session scale factors and starts the clock.
    pub fn start(&mut self, log: EventLog) -> Result<()> {
        if self.state != EngineState::Idle {
            return Err(CoreError::InvalidConfiguration(
                "replay already started; reset() or use a fresh engine".to_string(),
            ));
        }

        log.configuration.validate()?;

        let surface = resolve_or_default(self.resolver.as_ref(), &log.configuration.target);
        let scale = ScaleFactors::between(log.configuration.viewport, surface.extent())?;
        if scale.is_downscale() {
            warn!(
                width_scale = scale.width_scale,
                height_scale = scale.height_scale,
                "replay surface smaller than capture surface"
            );
        }

        let mut clock = ReplayClock::new(Arc::clone(&self.time));
        clock.start();

        info!(
            event_count = log.events.len(),
            target_descriptor = %log.configuration.target,
            "replay started"
        );

        self.session = Some(Session {
            events: log.events,
            cursor: 0,
            surface,
            clock,
            projector: InputProjector::new(scale),
            markers: MarkerManager::new(self.config.marker_policy()),
        });
        self.state = EngineState::Running;
        Ok(())
    }

    /// Run one scheduling check.
    ///
    /// Consumes at most one event per tick, and only once its recorded
    /// offset has elapsed; overdue events drain one per tick in order, so
    /// load shows up as lag, never as reordering or batching. Draining the
    /// queue transitions to `Stopped`, the normal termination path.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != EngineState::Running {
            return TickOutcome::NotRunning;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::NotRunning;
        };

        let delta = session.clock.elapsed();
        let mut dispatched = false;

        if !session.drained() {
            let head = session.events[session.cursor].time;
            if head <= delta {
                let event = session.events[session.cursor].clone();
                session.cursor += 1;
                session.dispatch(&event);
                session.markers.trim(session.surface.as_ref());
                dispatched = true;
            }
        }

        if session.drained() {
            self.state = EngineState::Stopped;
            info!(
                dispatched = session.cursor,
                "replay finished at {delta}"
            );
            return TickOutcome::Finished;
        }

        if dispatched {
            TickOutcome::Dispatched
        } else {
            TickOutcome::Waiting
        }
    }

    /// Stop the session and tear down all live markers.
    ///
    /// Safe to call at any time; once it returns, no further tick
    /// dispatches anything. Calling it again is harmless, and an engine
    /// that never started stays `Idle`.
    pub fn stop(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.markers.clear(session.surface.as_ref());
        if self.state == EngineState::Running {
            info!("replay stopped");
        }
        self.state = EngineState::Stopped;
    }

    /// Return to `Idle`, discarding the finished session.
    pub fn reset(&mut self) {
        self.stop();
        self.session = None;
        self.state = EngineState::Idle;
    }

    /// Head-event offset still waiting to fire, for diagnostics.
    pub fn next_due(&self) -> Option<Timestamp> {
        let session = self.session.as_ref()?;
        session.events.get(session.cursor).map(|e| e.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HeadlessResolver, HeadlessSurface};
    use crate::time::ManualTime;
    use reenact_core::{EventPayload, Extent, Point, SurfaceConfig};

    fn log_with(events: Vec<CapturedEvent>) -> EventLog {
        EventLog::new(
            SurfaceConfig::new("main", Extent::new(100.0, 100.0)),
            events,
        )
    }

    fn click(time: u64, x: f64, y: f64) -> CapturedEvent {
        CapturedEvent::new(
            Timestamp::from_millis(time),
            EventPayload::PointerClick { x, y },
        )
    }

    struct Rig {
        time: Arc<ManualTime>,
        surface: Arc<HeadlessSurface>,
        engine: ReplayEngine,
    }

    fn rig(extent: Extent) -> Rig {
        rig_with_config(extent, ReplayConfig::testing())
    }

    fn rig_with_config(extent: Extent, config: ReplayConfig) -> Rig {
        let time = Arc::new(ManualTime::new());
        let surface = Arc::new(HeadlessSurface::new(extent));
        surface.add_region("root", Point::new(0.0, 0.0), extent);
        let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
        resolver.register("main", surface.clone());
        let engine = ReplayEngine::new(config, resolver, time.clone());
        Rig {
            time,
            surface,
            engine,
        }
    }

    #[test]
    fn test_scenario_rescaled_click() {
        // 100x100 capture replayed on 200x200: a click at (50,50) lands at
        // (100,100) once delta >= 10.
        let mut rig = rig(Extent::new(200.0, 200.0));
        rig.engine
            .start(log_with(vec![click(10, 50.0, 50.0)]))
            .unwrap();

        rig.time.advance_millis(9);
        assert_eq!(rig.engine.tick(), TickOutcome::Waiting);
        assert_eq!(rig.surface.dispatch_count(), 0);

        rig.time.advance_millis(1);
        assert_eq!(rig.engine.tick(), TickOutcome::Finished);
        assert_eq!(
            rig.surface.dispatched(),
            vec![SyntheticEvent::Activate {
                position: Point::new(100.0, 100.0)
            }]
        );
        assert_eq!(rig.engine.state(), EngineState::Stopped);
    }

    #[test]
    fn test_empty_log_stops_on_first_tick() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine.start(log_with(Vec::new())).unwrap();
        assert_eq!(rig.engine.state(), EngineState::Running);

        assert_eq!(rig.engine.tick(), TickOutcome::Finished);
        assert_eq!(rig.engine.state(), EngineState::Stopped);
        assert_eq!(rig.surface.dispatch_count(), 0);
    }

    #[test]
    fn test_one_event_per_tick_even_when_overdue() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine
            .start(log_with(vec![
                click(1, 10.0, 10.0),
                click(2, 20.0, 20.0),
                click(3, 30.0, 30.0),
            ]))
            .unwrap();

        // All three are overdue; each tick still drains exactly one.
        rig.time.advance_millis(50);
        assert_eq!(rig.engine.tick(), TickOutcome::Dispatched);
        assert_eq!(rig.engine.dispatched(), 1);
        assert_eq!(rig.engine.tick(), TickOutcome::Dispatched);
        assert_eq!(rig.engine.tick(), TickOutcome::Finished);

        let dispatched = rig.surface.dispatched();
        assert_eq!(dispatched.len(), 3);
        assert_eq!(
            dispatched[0],
            SyntheticEvent::Activate {
                position: Point::new(10.0, 10.0)
            }
        );
        assert_eq!(
            dispatched[2],
            SyntheticEvent::Activate {
                position: Point::new(30.0, 30.0)
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine
            .start(log_with(vec![
                click(1, 10.0, 10.0),
                CapturedEvent::new(
                    Timestamp::from_millis(2),
                    EventPayload::Unknown {
                        kind: "scroll".to_string(),
                    },
                ),
                click(3, 30.0, 30.0),
            ]))
            .unwrap();

        rig.time.advance_millis(10);
        while rig.engine.tick() == TickOutcome::Dispatched {}

        let dispatched = rig.surface.dispatched();
        assert_eq!(dispatched.len(), 2);
        assert_eq!(
            dispatched[0],
            SyntheticEvent::Activate {
                position: Point::new(10.0, 10.0)
            }
        );
        assert_eq!(
            dispatched[1],
            SyntheticEvent::Activate {
                position: Point::new(30.0, 30.0)
            }
        );
        assert_eq!(rig.engine.state(), EngineState::Stopped);
    }

    #[test]
    fn test_key_event_synthesizes_down_then_up() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine
            .start(log_with(vec![CapturedEvent::new(
                Timestamp::from_millis(1),
                EventPayload::Key {
                    key: "Enter".to_string(),
                },
            )]))
            .unwrap();

        rig.time.advance_millis(1);
        rig.engine.tick();
        assert_eq!(
            rig.surface.dispatched(),
            vec![
                SyntheticEvent::KeyDown {
                    key: "Enter".to_string()
                },
                SyntheticEvent::KeyUp {
                    key: "Enter".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_click_marker_window() {
        // 15 clicks with capacity 10 leave exactly the last 10 markers.
        let mut rig = rig(Extent::new(100.0, 100.0));
        let events = (0..15).map(|i| click(i, i as f64, 0.0)).collect();
        rig.engine.start(log_with(events)).unwrap();

        rig.time.advance_millis(20);
        while rig.engine.tick() == TickOutcome::Dispatched {}

        assert_eq!(rig.surface.markers_with_fill("blue"), 10);
        let survivors = rig.surface.marker_positions("blue");
        assert!(survivors.iter().all(|p| p.x >= 5.0));

        rig.engine.stop();
        assert_eq!(rig.surface.marker_count(), 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine
            .start(log_with(vec![click(5, 10.0, 10.0)]))
            .unwrap();

        rig.engine.stop();
        let dispatched_before = rig.surface.dispatch_count();
        rig.engine.stop();
        rig.time.advance_millis(10);
        assert_eq!(rig.engine.tick(), TickOutcome::NotRunning);
        assert_eq!(rig.surface.dispatch_count(), dispatched_before);
    }

    #[test]
    fn test_invalid_configuration_is_fatal() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        let log = EventLog::new(
            SurfaceConfig::new("main", Extent::new(0.0, 100.0)),
            vec![click(1, 10.0, 10.0)],
        );
        assert!(matches!(
            rig.engine.start(log),
            Err(CoreError::InvalidConfiguration(_))
        ));
        assert_eq!(rig.engine.state(), EngineState::Idle);
        assert_eq!(rig.surface.dispatch_count(), 0);
    }

    #[test]
    fn test_missing_target_falls_back() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        let log = EventLog::new(
            SurfaceConfig::new("#gone", Extent::new(100.0, 100.0)),
            vec![click(1, 10.0, 10.0)],
        );
        rig.engine.start(log).unwrap();
        rig.time.advance_millis(1);
        rig.engine.tick();
        // Dispatched against the default surface.
        assert_eq!(rig.surface.dispatch_count(), 1);
    }

    #[test]
    fn test_activation_miss_still_places_marker() {
        let time = Arc::new(ManualTime::new());
        // No hit regions: every activation misses.
        let surface = Arc::new(HeadlessSurface::new(Extent::new(100.0, 100.0)));
        let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
        resolver.register("main", surface.clone());
        let mut engine = ReplayEngine::new(ReplayConfig::testing(), resolver, time.clone());

        engine.start(log_with(vec![click(1, 10.0, 10.0)])).unwrap();
        time.advance_millis(1);
        engine.tick();

        assert_eq!(surface.markers_with_fill("blue"), 1);
        assert_eq!(engine.state(), EngineState::Stopped);
    }

    #[test]
    fn test_start_twice_requires_reset() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine.start(log_with(Vec::new())).unwrap();
        assert!(rig.engine.start(log_with(Vec::new())).is_err());

        rig.engine.reset();
        assert_eq!(rig.engine.state(), EngineState::Idle);
        assert!(rig.engine.start(log_with(Vec::new())).is_ok());
    }

    #[test]
    fn test_self_termination_leaves_markers_until_stop() {
        let mut rig = rig(Extent::new(100.0, 100.0));
        rig.engine
            .start(log_with(vec![click(1, 10.0, 10.0)]))
            .unwrap();
        rig.time.advance_millis(1);
        assert_eq!(rig.engine.tick(), TickOutcome::Finished);

        // The trail stays visible after the queue drains.
        assert_eq!(rig.surface.markers_with_fill("blue"), 1);
        rig.engine.stop();
        assert_eq!(rig.surface.marker_count(), 0);
    }

    #[test]
    fn test_marker_cap_override() {
        let mut rig = rig_with_config(
            Extent::new(100.0, 100.0),
            ReplayConfig::testing().with_marker_caps(2, 2),
        );
        let events = (0..5).map(|i| click(i, i as f64, 0.0)).collect();
        rig.engine.start(log_with(events)).unwrap();
        rig.time.advance_millis(10);
        while rig.engine.tick() == TickOutcome::Dispatched {}
        assert_eq!(rig.surface.markers_with_fill("blue"), 2);
    }
}

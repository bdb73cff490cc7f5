//! Deterministic replay harness.

use std::sync::Arc;

use reenact_core::{EventLog, Extent, Point, Result};

use super::headless::{HeadlessResolver, HeadlessSurface};
use crate::replay::{ReplayConfig, ReplayEngine, TickOutcome};
use crate::time::ManualTime;

/// Descriptor the harness registers its surface under.
pub const HARNESS_TARGET: &str = "main";

/// Bundles a manual time source, a headless surface and an engine so
/// scenario tests read linearly: advance time, tick, assert.
pub struct ReplayHarness {
    time: Arc<ManualTime>,
    surface: Arc<HeadlessSurface>,
    engine: ReplayEngine,
}

impl ReplayHarness {
    /// Create a harness around a surface of the given extent, covered by a
    /// single full-extent hit region named `"root"`.
    pub fn new(extent: Extent) -> Self {
        Self::with_config(extent, ReplayConfig::testing())
    }

    /// Create a harness with a custom replay configuration.
    pub fn with_config(extent: Extent, config: ReplayConfig) -> Self {
        let time = Arc::new(ManualTime::new());
        let surface = Arc::new(HeadlessSurface::new(extent));
        surface.add_region("root", Point::new(0.0, 0.0), extent);

        let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
        resolver.register(HARNESS_TARGET, surface.clone());

        let engine = ReplayEngine::new(config, resolver, time.clone());
        Self {
            time,
            surface,
            engine,
        }
    }

    /// The replay surface.
    pub fn surface(&self) -> &Arc<HeadlessSurface> {
        &self.surface
    }

    /// The engine under test.
    pub fn engine(&self) -> &ReplayEngine {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut ReplayEngine {
        &mut self.engine
    }

    /// Start replaying a log.
    pub fn start(&mut self, log: EventLog) -> Result<()> {
        self.engine.start(log)
    }

    /// Move the session clock forward.
    pub fn advance(&self, millis: u64) {
        self.time.advance_millis(millis);
    }

    /// Run one scheduling check.
    pub fn tick(&mut self) -> TickOutcome {
        self.engine.tick()
    }

    /// Advance then tick, the common test step.
    pub fn advance_and_tick(&mut self, millis: u64) -> TickOutcome {
        self.advance(millis);
        self.tick()
    }

    /// Tick repeatedly, advancing `step_millis` between checks, until the
    /// engine leaves the running state. Returns the number of ticks.
    pub fn run_until_stopped(&mut self, step_millis: u64) -> u64 {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match self.tick() {
                TickOutcome::Finished | TickOutcome::NotRunning => return ticks,
                TickOutcome::Waiting | TickOutcome::Dispatched => self.advance(step_millis),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::EngineState;
    use reenact_core::{CapturedEvent, EventPayload, SurfaceConfig, Timestamp};

    #[test]
    fn test_harness_runs_a_log() {
        let mut harness = ReplayHarness::new(Extent::new(100.0, 100.0));
        let log = EventLog::new(
            SurfaceConfig::new(HARNESS_TARGET, Extent::new(100.0, 100.0)),
            vec![CapturedEvent::new(
                Timestamp::from_millis(2),
                EventPayload::PointerClick { x: 5.0, y: 5.0 },
            )],
        );
        harness.start(log).unwrap();
        harness.run_until_stopped(1);

        assert_eq!(harness.engine().state(), EngineState::Stopped);
        assert_eq!(harness.surface().activations("root"), 1);
    }
}

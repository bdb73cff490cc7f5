//! Real-timer tick driver.

use std::time::Duration;

use super::engine::{ReplayEngine, TickOutcome};

/// Drives an engine's tick loop against wall-clock time.
///
/// One tick always completes before the next is issued; the loop ends when
/// the engine reports it is no longer running. Deterministic tests skip the
/// driver and call [`ReplayEngine::tick`] directly with a manual time
/// source.
#[derive(Clone, Copy, Debug)]
pub struct IntervalDriver {
    rate: Duration,
}

impl IntervalDriver {
    /// Create a driver ticking at the given interval.
    pub fn new(rate: Duration) -> Self {
        Self { rate }
    }

    /// Create a driver from the engine's configured tick rate.
    pub fn for_engine(engine: &ReplayEngine) -> Self {
        Self::new(engine.config().tick_rate())
    }

    /// The tick interval.
    pub fn rate(&self) -> Duration {
        self.rate
    }

    /// Tick the engine until it finishes or stops, sleeping `rate` between
    /// scheduling checks. Returns the number of ticks issued.
    pub fn drive(&self, engine: &mut ReplayEngine) -> u64 {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match engine.tick() {
                TickOutcome::Finished | TickOutcome::NotRunning => return ticks,
                TickOutcome::Waiting | TickOutcome::Dispatched => {
                    std::thread::sleep(self.rate);
                }
            }
        }
    }
}

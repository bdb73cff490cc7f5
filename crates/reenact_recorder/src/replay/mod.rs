//! Replay engine for captured sessions.
//!
//! This module provides:
//! - `ReplayClock` - Elapsed-time tracking over a swappable time source
//! - `InputProjector` - Remap captured payloads into replay-surface inputs
//! - `MarkerManager` - Bounded bookkeeping for transient visual markers
//! - `ReplayEngine` - The tick-driven scheduler
//! - `IntervalDriver` - Wall-clock driver for the tick loop
//!
//! # Example
//!
//! ```ignore
//! use reenact_recorder::replay::{IntervalDriver, ReplayConfig, ReplayEngine};
//!
//! let mut engine = ReplayEngine::new(ReplayConfig::default(), resolver, time);
//! engine.start(log)?;
//!
//! // Drive against real time...
//! IntervalDriver::for_engine(&engine).drive(&mut engine);
//!
//! // ...or tick deterministically from a test.
//! while engine.tick() != TickOutcome::Finished {}
//! ```

mod clock;
mod driver;
mod engine;
mod markers;
mod simulator;

pub use clock::ReplayClock;
pub use driver::IntervalDriver;
pub use engine::{EngineState, ReplayConfig, ReplayEngine, TickOutcome};
pub use markers::{MarkerManager, MarkerPolicy, DEFAULT_MARKER_CAP};
pub use simulator::{InputProjector, ProjectedInput};

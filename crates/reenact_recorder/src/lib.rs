//! Reenact Recorder
//!
//! Capture and replay infrastructure: record a user's interaction with a
//! surface as a timestamped event log, then replay that log against a
//! possibly differently-sized surface, synthesizing equivalent input events
//! at rescaled coordinates with bounded visual feedback markers.
//!
//! The event-listening substrate, marker rendering primitives and log
//! persistence are collaborator interfaces ([`capture::InputSource`],
//! [`surface::Surface`], [`capture::CaptureSink`]); the [`testing`] module
//! ships headless implementations of all three.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use reenact_core::{Extent, Point};
//! use reenact_recorder::capture::{Recorder, RecorderConfig};
//! use reenact_recorder::replay::{ReplayConfig, ReplayEngine, TickOutcome};
//! use reenact_recorder::testing::{HeadlessResolver, HeadlessSurface, ScriptedInput};
//! use reenact_recorder::time::ManualTime;
//!
//! // Record a short session against a headless surface.
//! let input = Arc::new(ScriptedInput::new());
//! let surface = Arc::new(HeadlessSurface::new(Extent::new(100.0, 100.0)));
//! surface.add_region("root", Point::new(0.0, 0.0), Extent::new(100.0, 100.0));
//! let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
//! resolver.register("body", surface);
//! let time = Arc::new(ManualTime::new());
//!
//! let mut recorder = Recorder::new(
//!     RecorderConfig::default(),
//!     input.clone(),
//!     resolver.clone(),
//!     time.clone(),
//! );
//! recorder.start();
//! time.advance_millis(10);
//! input.emit_click(Point::new(50.0, 50.0));
//! let log = recorder.stop().unwrap();
//!
//! // Replay it, ticking deterministically.
//! let mut engine = ReplayEngine::new(ReplayConfig::default(), resolver, time.clone());
//! engine.start(log).unwrap();
//! time.advance_millis(10);
//! while engine.tick() == TickOutcome::Dispatched {}
//! ```

pub mod capture;
pub mod replay;
pub mod surface;
pub mod testing;
pub mod time;

pub use capture::{CaptureSink, InputKind, InputNotice, InputSource, Recorder, RecorderConfig};
pub use replay::{
    EngineState, IntervalDriver, MarkerPolicy, ReplayConfig, ReplayEngine, TickOutcome,
};
pub use surface::{MarkerId, MarkerStyle, Surface, SurfaceResolver, SyntheticEvent};
pub use time::{ManualTime, MonotonicTime, TimeSource};

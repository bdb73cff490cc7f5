//! Event capture.
//!
//! This module provides:
//! - `Recorder` - Subscribe to input sources and accumulate an event log
//! - `RecorderConfig` - Which input classes to capture, and where
//! - `InputSource` - The subscription contract with the input substrate
//! - `CaptureSink` - The persistence contract for finished logs

mod config;
mod recorder;
mod sink;
mod sources;

pub use config::RecorderConfig;
pub use recorder::Recorder;
pub use sink::CaptureSink;
pub use sources::{InputHandler, InputKind, InputNotice, InputSource, SubscriptionToken};

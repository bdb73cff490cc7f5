//! Test doubles for capture and replay.
//!
//! This module provides:
//! - `HeadlessSurface` / `HeadlessResolver` - In-memory surfaces with hit
//!   regions, a dispatch journal and marker storage
//! - `ScriptedInput` - Hand-driven input source
//! - `MemorySink` - In-memory capture persistence
//! - `ReplayHarness` - Manual clock + headless surface + engine in one

mod harness;
mod headless;
mod script;

pub use harness::{ReplayHarness, HARNESS_TARGET};
pub use headless::{HeadlessResolver, HeadlessSurface};
pub use script::{MemorySink, ScriptedInput};

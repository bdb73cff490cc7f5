//! Scripted Capture and Replay Demo
//!
//! This example demonstrates the full pipeline against headless surfaces:
//! - Record a scripted interaction into an event log
//! - Hand the log over in its serialized wire form
//! - Replay it against a surface twice the size, driven by a real timer
//!
//! Run with: cargo run -p reenact_recorder --example scripted_session

use std::sync::Arc;

use reenact_core::{EventLog, Extent, Point, Result, SurfaceConfig};
use reenact_recorder::capture::{Recorder, RecorderConfig};
use reenact_recorder::replay::{IntervalDriver, ReplayConfig, ReplayEngine};
use reenact_recorder::testing::{HeadlessResolver, HeadlessSurface, ScriptedInput};
use reenact_recorder::time::{ManualTime, MonotonicTime};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let json = record_session()?;
    println!("captured log: {json}");

    replay_session(&json)?;
    Ok(())
}

/// Record a short scripted interaction on a 100x100 surface.
fn record_session() -> Result<String> {
    let input = Arc::new(ScriptedInput::new());
    let surface = Arc::new(HeadlessSurface::new(Extent::new(100.0, 100.0)));
    let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
    resolver.register("body", surface);
    let time = Arc::new(ManualTime::new());

    let mut recorder = Recorder::new(
        RecorderConfig::default(),
        input.clone(),
        resolver,
        time.clone(),
    );
    recorder.start();

    time.advance_millis(5);
    input.emit_move(Point::new(20.0, 20.0));
    time.advance_millis(5);
    input.emit_move(Point::new(40.0, 40.0));
    time.advance_millis(5);
    input.emit_click(Point::new(50.0, 50.0));
    time.advance_millis(5);
    input.emit_key("Enter");

    let log = recorder
        .stop()
        .expect("recorder was started, a log must come back");
    log.to_json()
}

/// Replay the serialized log on a 200x200 surface with a 1ms tick timer.
fn replay_session(json: &str) -> Result<()> {
    let log = EventLog::from_json(json)?;
    // Re-target the log at the replay environment's surface name.
    let log = EventLog::new(
        SurfaceConfig::new("replay-root", log.configuration.viewport),
        log.events,
    );

    let surface = Arc::new(HeadlessSurface::new(Extent::new(200.0, 200.0)));
    surface.add_region("button", Point::new(80.0, 80.0), Extent::new(40.0, 40.0));
    let resolver = Arc::new(HeadlessResolver::new(surface.clone()));
    resolver.register("replay-root", surface.clone());

    let time = Arc::new(MonotonicTime::new());
    let mut engine = ReplayEngine::new(ReplayConfig::default(), resolver, time);
    engine.start(log)?;

    IntervalDriver::for_engine(&engine).drive(&mut engine);

    println!(
        "replayed {} events: {} activations of 'button', {} live markers",
        engine.dispatched(),
        surface.activations("button"),
        surface.marker_count(),
    );

    engine.stop();
    println!("markers after teardown: {}", surface.marker_count());
    Ok(())
}

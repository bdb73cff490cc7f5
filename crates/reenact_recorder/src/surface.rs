//! Surface abstraction: the interactive region events are captured from and
//! synthesized against.
//!
//! The rendering substrate is out of scope; this module only specifies the
//! interface the recorder and replay engine depend on, plus the shared
//! descriptor-resolution policy.

use std::sync::Arc;

use reenact_core::{Extent, Point, Result};
use slotmap::new_key_type;
use tracing::warn;

new_key_type! {
    /// Handle to a live visual marker on a surface.
    pub struct MarkerId;
}

/// Visual style of a marker dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Fill color name.
    pub fill: &'static str,
    /// Dot radius in replay-surface pixels.
    pub radius: f64,
}

impl MarkerStyle {
    /// The single pointer-position marker.
    pub const POINTER: MarkerStyle = MarkerStyle {
        fill: "red",
        radius: 15.0,
    };
    /// Trail dots left behind pointer movement.
    pub const PATH: MarkerStyle = MarkerStyle {
        fill: "black",
        radius: 5.0,
    };
    /// Dots marking synthesized clicks.
    pub const CLICK: MarkerStyle = MarkerStyle {
        fill: "blue",
        radius: 15.0,
    };
}

/// An input event synthesized during replay.
#[derive(Clone, Debug, PartialEq)]
pub enum SyntheticEvent {
    /// Key pressed.
    KeyDown { key: String },
    /// Key released.
    KeyUp { key: String },
    /// Pointer moved to a replay-surface coordinate.
    PointerMove { position: Point },
    /// Primary activation of the topmost element at a coordinate.
    Activate { position: Point },
}

/// The interactive region replayed events are applied to.
///
/// Implementations provide interior mutability; the engine shares surfaces
/// as `Arc<dyn Surface>` and calls through `&self`.
pub trait Surface: Send + Sync {
    /// Current dimensions of the surface.
    fn extent(&self) -> Extent;

    /// Apply a synthesized event. `Activate` fails with `NoTargetAtPoint`
    /// when no element exists at the coordinate.
    fn dispatch(&self, event: SyntheticEvent) -> Result<()>;

    /// Place a marker dot and return its handle.
    fn create_marker(&self, position: Point, style: MarkerStyle) -> MarkerId;

    /// Reposition an existing marker.
    fn move_marker(&self, id: MarkerId, position: Point);

    /// Remove a marker from the surface.
    fn destroy_marker(&self, id: MarkerId);
}

/// Resolves opaque surface descriptors to live surfaces.
pub trait SurfaceResolver: Send + Sync {
    /// Look up a surface by its descriptor.
    fn resolve(&self, descriptor: &str) -> Option<Arc<dyn Surface>>;

    /// The well-known fallback surface.
    fn default_surface(&self) -> Arc<dyn Surface>;
}

/// Resolve a descriptor, falling back to the default surface on a miss.
///
/// The miss is logged, never fatal; the recorder and the replay engine share
/// this policy so captured sessions still replay against a restructured
/// environment.
pub fn resolve_or_default(resolver: &dyn SurfaceResolver, descriptor: &str) -> Arc<dyn Surface> {
    match resolver.resolve(descriptor) {
        Some(surface) => surface,
        None => {
            warn!("target '{descriptor}' not found, falling back to the default surface");
            resolver.default_surface()
        }
    }
}

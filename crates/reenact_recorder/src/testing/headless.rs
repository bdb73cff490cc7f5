//! Headless surface doubles for testing.
//!
//! Provides a way to exercise capture and replay without a real rendering
//! substrate: a fixed-extent surface with named hit regions, a journal of
//! every dispatched synthetic event, and in-memory marker storage.

use std::sync::Arc;

use parking_lot::Mutex;
use reenact_core::{CoreError, Extent, Point, Result};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::surface::{MarkerId, MarkerStyle, Surface, SurfaceResolver, SyntheticEvent};

#[derive(Clone, Debug)]
struct Region {
    name: String,
    origin: Point,
    extent: Extent,
}

impl Region {
    fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.origin.x + self.extent.width
            && point.y <= self.origin.y + self.extent.height
    }
}

#[derive(Clone, Copy, Debug)]
struct MarkerDot {
    position: Point,
    style: MarkerStyle,
}

#[derive(Default)]
struct Inner {
    markers: SlotMap<MarkerId, MarkerDot>,
    journal: Vec<SyntheticEvent>,
    regions: Vec<Region>,
    activations: FxHashMap<String, usize>,
}

/// An in-memory surface for tests.
///
/// Activations resolve against named rectangular regions, most recently
/// added on top; a click outside every region fails with `NoTargetAtPoint`.
pub struct HeadlessSurface {
    extent: Extent,
    inner: Mutex<Inner>,
}

impl HeadlessSurface {
    /// Create a surface with the given dimensions and no hit regions.
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Add a named rectangular hit region.
    pub fn add_region(&self, name: impl Into<String>, origin: Point, extent: Extent) {
        self.inner.lock().regions.push(Region {
            name: name.into(),
            origin,
            extent,
        });
    }

    /// Every synthetic event dispatched so far, in order.
    pub fn dispatched(&self) -> Vec<SyntheticEvent> {
        self.inner.lock().journal.clone()
    }

    /// Number of dispatched synthetic events.
    pub fn dispatch_count(&self) -> usize {
        self.inner.lock().journal.len()
    }

    /// How many times a region was activated.
    pub fn activations(&self, name: &str) -> usize {
        self.inner.lock().activations.get(name).copied().unwrap_or(0)
    }

    /// Total live markers.
    pub fn marker_count(&self) -> usize {
        self.inner.lock().markers.len()
    }

    /// Live markers with the given fill color.
    pub fn markers_with_fill(&self, fill: &str) -> usize {
        self.inner
            .lock()
            .markers
            .values()
            .filter(|dot| dot.style.fill == fill)
            .count()
    }

    /// Positions of live markers with the given fill color.
    pub fn marker_positions(&self, fill: &str) -> Vec<Point> {
        self.inner
            .lock()
            .markers
            .values()
            .filter(|dot| dot.style.fill == fill)
            .map(|dot| dot.position)
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn dispatch(&self, event: SyntheticEvent) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.journal.push(event.clone());

        if let SyntheticEvent::Activate { position } = event {
            // Topmost wins: later regions cover earlier ones.
            let hit = inner
                .regions
                .iter()
                .rev()
                .find(|region| region.contains(position))
                .map(|region| region.name.clone());
            match hit {
                Some(name) => {
                    *inner.activations.entry(name).or_insert(0) += 1;
                }
                None => {
                    return Err(CoreError::NoTargetAtPoint {
                        x: position.x,
                        y: position.y,
                    });
                }
            }
        }
        Ok(())
    }

    fn create_marker(&self, position: Point, style: MarkerStyle) -> MarkerId {
        self.inner.lock().markers.insert(MarkerDot { position, style })
    }

    fn move_marker(&self, id: MarkerId, position: Point) {
        if let Some(dot) = self.inner.lock().markers.get_mut(id) {
            dot.position = position;
        }
    }

    fn destroy_marker(&self, id: MarkerId) {
        self.inner.lock().markers.remove(id);
    }
}

/// Descriptor-keyed lookup over headless surfaces, with a required default.
pub struct HeadlessResolver {
    default: Arc<HeadlessSurface>,
    registry: Mutex<FxHashMap<String, Arc<HeadlessSurface>>>,
}

impl HeadlessResolver {
    /// Create a resolver whose fallback is `default`.
    pub fn new(default: Arc<HeadlessSurface>) -> Self {
        Self {
            default,
            registry: Mutex::new(FxHashMap::default()),
        }
    }

    /// Register a surface under a descriptor.
    pub fn register(&self, descriptor: impl Into<String>, surface: Arc<HeadlessSurface>) {
        self.registry.lock().insert(descriptor.into(), surface);
    }
}

impl SurfaceResolver for HeadlessResolver {
    fn resolve(&self, descriptor: &str) -> Option<Arc<dyn Surface>> {
        self.registry
            .lock()
            .get(descriptor)
            .cloned()
            .map(|surface| surface as Arc<dyn Surface>)
    }

    fn default_surface(&self) -> Arc<dyn Surface> {
        self.default.clone()
    }
}

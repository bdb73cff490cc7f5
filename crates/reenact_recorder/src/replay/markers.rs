//! Bounded bookkeeping for replay markers.

use std::collections::VecDeque;

use reenact_core::Point;

use crate::surface::{MarkerId, MarkerStyle, Surface};

/// Default capacity of each bounded marker pool.
pub const DEFAULT_MARKER_CAP: usize = 10;

/// Capacity limits for the transient marker pools.
///
/// Click and path markers are bounded independently; each pool keeps a
/// trailing window of the most recent entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerPolicy {
    /// Maximum live click markers.
    pub click_cap: usize,
    /// Maximum live path markers.
    pub path_cap: usize,
}

impl Default for MarkerPolicy {
    fn default() -> Self {
        Self {
            click_cap: DEFAULT_MARKER_CAP,
            path_cap: DEFAULT_MARKER_CAP,
        }
    }
}

impl MarkerPolicy {
    /// Use the same capacity for both pools.
    pub fn uniform(cap: usize) -> Self {
        Self {
            click_cap: cap,
            path_cap: cap,
        }
    }
}

/// Owns the visual markers created during a replay session.
///
/// The pointer-position marker is a singleton updated in place; path and
/// click markers are FIFO windows evicted oldest-first once over capacity.
/// Markers are only ever destroyed here: by eviction or by `clear`.
pub struct MarkerManager {
    policy: MarkerPolicy,
    pointer: Option<MarkerId>,
    path: VecDeque<MarkerId>,
    clicks: VecDeque<MarkerId>,
}

impl MarkerManager {
    /// Create an empty manager with the given capacities.
    pub fn new(policy: MarkerPolicy) -> Self {
        Self {
            policy,
            pointer: None,
            path: VecDeque::new(),
            clicks: VecDeque::new(),
        }
    }

    /// Record a pointer move: ensure the position marker exists (created on
    /// the first move, repositioned afterwards) and leave a path dot behind.
    pub fn note_move(&mut self, surface: &dyn Surface, position: Point) {
        match self.pointer {
            Some(id) => surface.move_marker(id, position),
            None => {
                self.pointer = Some(surface.create_marker(position, MarkerStyle::POINTER));
            }
        }
        self.path
            .push_back(surface.create_marker(position, MarkerStyle::PATH));
        Self::evict_over(&mut self.path, self.policy.path_cap, surface);
    }

    /// Record a click marker.
    pub fn note_click(&mut self, surface: &dyn Surface, position: Point) {
        self.clicks
            .push_back(surface.create_marker(position, MarkerStyle::CLICK));
        Self::evict_over(&mut self.clicks, self.policy.click_cap, surface);
    }

    /// Evict both pools down to capacity, oldest first.
    pub fn trim(&mut self, surface: &dyn Surface) {
        Self::evict_over(&mut self.clicks, self.policy.click_cap, surface);
        Self::evict_over(&mut self.path, self.policy.path_cap, surface);
    }

    /// Destroy every live marker, including the pointer marker.
    pub fn clear(&mut self, surface: &dyn Surface) {
        if let Some(id) = self.pointer.take() {
            surface.destroy_marker(id);
        }
        for id in self.path.drain(..) {
            surface.destroy_marker(id);
        }
        for id in self.clicks.drain(..) {
            surface.destroy_marker(id);
        }
    }

    fn evict_over(pool: &mut VecDeque<MarkerId>, cap: usize, surface: &dyn Surface) {
        while pool.len() > cap {
            if let Some(oldest) = pool.pop_front() {
                surface.destroy_marker(oldest);
            }
        }
    }

    /// Number of live click markers.
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Number of live path markers.
    pub fn path_count(&self) -> usize {
        self.path.len()
    }

    /// Whether the pointer-position marker exists.
    pub fn has_pointer(&self) -> bool {
        self.pointer.is_some()
    }
}

pub mod arbitrator;
pub mod mapper;
pub mod media;
pub mod pin;
pub mod scheduler;
pub mod tween;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

/// Geometry of the pinned scroll region, in document pixels.
///
/// `anchor_offset` is the document scroll offset at which pinning engages,
/// `intro_distance` is the leading stretch reserved for the entrance
/// animation, and `main_distance` is the stretch over which the slide index
/// advances. A region is reconstructed whole on every geometry recomputation;
/// it is never mutated in place, so readers can never observe a
/// half-updated layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    pub anchor_offset: f32,
    pub intro_distance: f32,
    pub main_distance: f32,
}

impl ScrollRegion {
    /// Full pinned scroll distance: intro phase plus the index-tracked phase.
    pub fn total_distance(&self) -> f32 {
        self.intro_distance + self.main_distance
    }
}

/// The carousel's authoritative state, owned exclusively by the
/// [`arbitrator::NavigationArbitrator`]. No other component writes
/// `active_index` directly.
#[derive(Debug, Clone)]
pub struct CarouselState {
    /// Which slide is visible. Always `< slide_count` after construction.
    pub active_index: usize,
    /// Slides whose media has finished loading.
    pub loaded: BTreeSet<usize>,
    /// True during a rapid-scroll burst; renderers drop transition easing.
    pub is_fast_scrolling: bool,
    /// True from an explicit slide selection until its programmatic scroll
    /// completes; scroll-driven proposals are discarded while set.
    pub is_navigating: bool,
}

impl CarouselState {
    pub fn new(start_index: usize) -> Self {
        Self {
            active_index: start_index,
            loaded: BTreeSet::new(),
            is_fast_scrolling: false,
            is_navigating: false,
        }
    }
}

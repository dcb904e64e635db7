use super::ScrollRegion;

/// Distance from the viewport top at which the container pins, in logical
/// pixels (header height plus top padding).
pub const HEADER_OFFSET: f32 = 100.0;
/// Scroll distance reserved for the entrance animation on wide viewports.
pub const INTRO_DISTANCE: f32 = 300.0;
/// Each slide owns this fraction of a viewport height of scroll distance.
pub const PER_SLIDE_FRACTION: f32 = 0.8;
/// Viewport width at which the wide variant takes over.
pub const WIDE_BREAKPOINT: f32 = 768.0;

/// Pin geometry variant, selected exclusively by viewport width. Only one
/// variant is active at a time; crossing the breakpoint tears the binding
/// down and recreates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Wide,
    Narrow,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        if width >= WIDE_BREAKPOINT {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    /// The narrow variant skips the entrance animation entirely.
    fn intro_distance(self) -> f32 {
        match self {
            Self::Wide => INTRO_DISTANCE,
            Self::Narrow => 0.0,
        }
    }
}

/// Viewport geometry snapshot, refreshed by the host every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct PinBinding {
    region: ScrollRegion,
    breakpoint: Breakpoint,
}

/// Owns the pinned-region lifecycle: creates and destroys the scroll-linked
/// binding, adapts to the viewport breakpoint, and rebuilds geometry on
/// layout change.
///
/// Every operation is a no-op when the container geometry is absent (not yet
/// laid out, or torn down mid-operation); that is expected during teardown
/// and never raises.
#[derive(Debug, Default)]
pub struct PinController {
    binding: Option<PinBinding>,
}

impl PinController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.binding.is_some()
    }

    pub fn region(&self) -> Option<&ScrollRegion> {
        self.binding.as_ref().map(|b| &b.region)
    }

    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.binding.as_ref().map(|b| b.breakpoint)
    }

    /// Create the scroll-linked binding for a container whose top edge sits
    /// at `container_top` in document coordinates. Idempotent: an existing
    /// binding is torn down first.
    pub fn activate(&mut self, container_top: Option<f32>, viewport: Viewport, slide_count: usize) {
        let Some(top) = container_top else {
            return;
        };
        self.deactivate();

        let breakpoint = Breakpoint::for_width(viewport.width);
        let region = build_region(top, viewport, slide_count, breakpoint);
        self.binding = Some(PinBinding { region, breakpoint });
    }

    /// Remove the binding and restore normal document flow. Safe to call at
    /// any time, including before the first activation.
    pub fn deactivate(&mut self) {
        self.binding = None;
    }

    /// Shutdown hook for the hosting page-transition mechanism: leaves no
    /// half-unpinned state behind.
    pub fn teardown(&mut self) {
        self.deactivate();
    }

    /// Rebuild geometry after a resize, orientation change, or content
    /// reflow. Atomic from the caller's perspective: the old binding is
    /// replaced by a freshly built one in a single step, and an inactive
    /// controller stays inactive.
    pub fn recompute_geometry(
        &mut self,
        container_top: Option<f32>,
        viewport: Viewport,
        slide_count: usize,
    ) {
        if self.binding.is_none() {
            return;
        }
        self.activate(container_top, viewport, slide_count);
    }

    /// Whether `width` selects a different variant than the active binding.
    pub fn breakpoint_changed(&self, width: f32) -> bool {
        self.binding
            .is_some_and(|b| b.breakpoint != Breakpoint::for_width(width))
    }

    /// Normalized progress through the pinned region at `scroll_offset`, or
    /// `None` while the region is unpinned (before the anchor, past release,
    /// or no active binding).
    pub fn progress(&self, scroll_offset: f32) -> Option<f32> {
        let region = &self.binding.as_ref()?.region;
        let total = region.total_distance();
        if total <= 0.0 {
            return None;
        }
        let travelled = scroll_offset - region.anchor_offset;
        if !(0.0..=total).contains(&travelled) {
            return None;
        }
        Some(travelled / total)
    }

    /// Bounds test for the wheel speed limiter: true while the viewport sits
    /// anywhere inside the pinned range.
    pub fn in_pin_area(&self, scroll_offset: f32) -> bool {
        let Some(binding) = &self.binding else {
            return false;
        };
        let travelled = scroll_offset - binding.region.anchor_offset;
        (0.0..=binding.region.total_distance()).contains(&travelled)
    }
}

fn build_region(
    container_top: f32,
    viewport: Viewport,
    slide_count: usize,
    breakpoint: Breakpoint,
) -> ScrollRegion {
    ScrollRegion {
        anchor_offset: container_top - HEADER_OFFSET,
        intro_distance: breakpoint.intro_distance(),
        main_distance: slide_count as f32 * viewport.height * PER_SLIDE_FRACTION,
    }
}

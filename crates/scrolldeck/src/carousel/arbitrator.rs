use std::time::Instant;

use crate::analytics::{AnalyticsEmitter, TransitionEvent, Trigger};

use super::tween::ScrollTween;
use super::{CarouselState, ScrollRegion};

/// Top-level orchestrator of the carousel.
///
/// Owns [`CarouselState`] and arbitrates between the two drivers of
/// navigation: passive scrolling (proposals from the scheduler) and explicit
/// tab clicks. At any instant exactly one driver may mutate `active_index`;
/// the `is_navigating` gate plus structural tween cancellation prevent a
/// lagging scroll-driven update from overwriting a click's target.
pub struct NavigationArbitrator {
    state: CarouselState,
    labels: Vec<String>,
    tween: Option<ScrollTween>,
    emitter: Box<dyn AnalyticsEmitter>,
}

impl NavigationArbitrator {
    pub fn new(labels: Vec<String>, start_index: usize, emitter: Box<dyn AnalyticsEmitter>) -> Self {
        let start = start_index.min(labels.len().saturating_sub(1));
        Self {
            state: CarouselState::new(start),
            labels,
            tween: None,
            emitter,
        }
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn slide_count(&self) -> usize {
        self.labels.len()
    }

    /// True while a programmatic scroll is in flight.
    pub fn is_settling(&self) -> bool {
        self.tween.is_some()
    }

    /// Target offset of the in-flight programmatic scroll, if any.
    pub fn scroll_target(&self) -> Option<f32> {
        self.tween.map(|t| t.target())
    }

    /// Explicit navigation from a tab click.
    ///
    /// Cancels any in-flight programmatic scroll by replacing the tween (so
    /// a stale completion can never fire), commits the target index
    /// immediately so the UI reflects intent before the animation finishes,
    /// and starts a new scroll toward the slide's document offset.
    pub fn select_slide(
        &mut self,
        target: usize,
        region: &ScrollRegion,
        current_offset: f32,
        now: Instant,
    ) {
        if target >= self.labels.len() {
            return;
        }

        self.tween = None;

        let from = self.state.active_index;
        self.state.active_index = target;
        self.state.is_navigating = true;

        let fraction = target as f32 / self.labels.len() as f32;
        let target_offset =
            region.anchor_offset + region.intro_distance + fraction * region.main_distance;
        self.tween = Some(ScrollTween::new(current_offset, target_offset, now));

        self.emit(from, target, Trigger::Click);
    }

    /// Scroll-driven proposal from the update scheduler. Returns whether the
    /// proposal was committed.
    ///
    /// Discarded silently while navigating, no matter how many arrive; a
    /// proposal equal to the active index commits nothing and emits nothing.
    pub fn receive_scroll_proposal(&mut self, index: usize) -> bool {
        if self.state.is_navigating {
            return false;
        }
        if index >= self.labels.len() || index == self.state.active_index {
            return false;
        }

        let from = self.state.active_index;
        self.state.active_index = index;
        self.emit(from, index, Trigger::Scroll);
        true
    }

    /// Advance the programmatic scroll. Returns the document offset to apply
    /// this frame, or `None` when no scroll is in flight.
    ///
    /// Completion clears `is_navigating`, returning arbitration to the
    /// scroll-driven mode.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let tween = self.tween.as_ref()?;
        let offset = tween.value_at(now);
        if tween.is_complete(now) {
            self.tween = None;
            self.state.is_navigating = false;
        }
        Some(offset)
    }

    /// Fast-scroll classification proposed by the scheduler.
    pub fn set_fast_scrolling(&mut self, fast: bool) {
        self.state.is_fast_scrolling = fast;
    }

    /// Load-completion signal from the media cache.
    pub fn mark_loaded(&mut self, index: usize) {
        if index < self.labels.len() {
            self.state.loaded.insert(index);
        }
    }

    /// Replace the slide collection after a deck reload. The active index is
    /// clamped; load state for removed slides is dropped. Navigation in
    /// flight is cancelled since its target offset belonged to the old deck.
    pub fn reset_slides(&mut self, labels: Vec<String>) {
        self.tween = None;
        self.state.is_navigating = false;
        self.labels = labels;
        let last = self.labels.len().saturating_sub(1);
        self.state.active_index = self.state.active_index.min(last);
        let count = self.labels.len();
        self.state.loaded.retain(|i| *i < count);
    }

    fn emit(&self, from: usize, to: usize, trigger: Trigger) {
        let event = TransitionEvent {
            from_label: self.labels.get(from).cloned().unwrap_or_default(),
            to_label: self.labels.get(to).cloned().unwrap_or_default(),
            to_index: to,
            trigger,
        };
        self.emitter.emit(event);
    }
}

//! End-to-end scenarios driving the full pipeline the way the frame loop
//! does: pin progress, index mapping, frame batching, then arbitration.
//!
//! Geometry throughout: 6 slides in a 1280x1000 viewport with the container
//! top at 520. That pins at offset 420, runs a 300px intro, then 800px per
//! slide for 4800px of tracked travel.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::analytics::{TransitionEvent, Trigger};

use super::super::arbitrator::NavigationArbitrator;
use super::super::mapper::map_index;
use super::super::pin::{PinController, Viewport};
use super::super::scheduler::UpdateScheduler;
use super::arbitrator;

const SLIDES: usize = 6;
const ANCHOR: f32 = 420.0;
const INTRO: f32 = 300.0;
const PER_SLIDE: f32 = 800.0;

struct Harness {
    pin: PinController,
    scheduler: UpdateScheduler,
    arb: NavigationArbitrator,
    events: Arc<Mutex<Vec<TransitionEvent>>>,
}

impl Harness {
    fn new() -> Self {
        let mut pin = PinController::new();
        pin.activate(
            Some(520.0),
            Viewport {
                width: 1280.0,
                height: 1000.0,
            },
            SLIDES,
        );
        let (arb, events) = arbitrator(SLIDES, 0);
        Self {
            pin,
            scheduler: UpdateScheduler::new(0),
            arb,
            events,
        }
    }

    /// One frame of the scroll-driven pipeline at the given offset.
    fn frame(&mut self, offset: f32, now: Instant) {
        if let Some(region) = self.pin.region().copied() {
            if let Some(progress) = self.pin.progress(offset) {
                if let Some(index) = map_index(progress, &region, SLIDES) {
                    self.scheduler.propose(index);
                }
            }
        }
        if let Some(proposal) = self.scheduler.flush(now) {
            if self.arb.receive_scroll_proposal(proposal.index) {
                self.scheduler.record_commit(proposal.index, now);
            }
        }
        self.arb.set_fast_scrolling(self.scheduler.is_fast_scrolling());
    }

    /// Document offset 1px inside slide `k`'s interval.
    fn inside_slide(k: usize) -> f32 {
        ANCHOR + INTRO + k as f32 * PER_SLIDE + 1.0
    }
}

#[test]
fn unhurried_scroll_visits_every_slide_in_order() {
    let mut h = Harness::new();
    let t0 = Instant::now();

    let mut offset = 0.0;
    let mut frame_no = 0u64;
    while offset < ANCHOR + INTRO + SLIDES as f32 * PER_SLIDE + 400.0 {
        h.frame(offset, t0 + Duration::from_millis(16 * frame_no));
        offset += 40.0;
        frame_no += 1;
    }

    assert_eq!(h.arb.active_index(), SLIDES - 1);
    assert!(!h.arb.state().is_fast_scrolling);

    let events = h.events.lock().unwrap();
    let visited: Vec<usize> = events.iter().map(|e| e.to_index).collect();
    assert_eq!(visited, vec![1, 2, 3, 4, 5]);
    assert!(events.iter().all(|e| e.trigger == Trigger::Scroll));
}

#[test]
fn intro_stretch_commits_nothing() {
    let mut h = Harness::new();
    let t0 = Instant::now();

    let mut offset = 0.0;
    let mut frame_no = 0u64;
    while offset < ANCHOR + INTRO {
        h.frame(offset, t0 + Duration::from_millis(16 * frame_no));
        offset += 20.0;
        frame_no += 1;
    }

    assert_eq!(h.arb.active_index(), 0);
    assert!(h.events.lock().unwrap().is_empty());
}

#[test]
fn each_slide_interval_maps_to_its_own_index() {
    let h = Harness::new();
    let region = h.pin.region().copied().unwrap();

    for k in 0..SLIDES {
        let offset = Harness::inside_slide(k);
        let progress = h.pin.progress(offset).unwrap();
        assert_eq!(map_index(progress, &region, SLIDES), Some(k), "slide {k}");
    }
}

#[test]
fn click_mid_scroll_wins_and_fires_a_single_event() {
    let mut h = Harness::new();
    let t0 = Instant::now();

    // Passive scroll lands on slide 2.
    h.frame(Harness::inside_slide(2), t0);
    assert_eq!(h.arb.active_index(), 2);

    // Click on slide 4 while sitting mid-region.
    let region = h.pin.region().copied().unwrap();
    let click_at = t0 + Duration::from_millis(100);
    h.arb
        .select_slide(4, &region, Harness::inside_slide(2), click_at);
    h.scheduler.record_commit(4, click_at);

    // Scroll keeps moving under the animation; none of it lands.
    for (i, k) in [2usize, 3, 3].iter().enumerate() {
        let now = click_at + Duration::from_millis(16 * (i as u64 + 1));
        h.frame(Harness::inside_slide(*k), now);
        assert_eq!(h.arb.active_index(), 4);
    }

    // Animation completes; the committed slide is still the clicked one.
    let done = click_at + Duration::from_millis(900);
    h.arb.tick(done);
    assert!(!h.arb.state().is_navigating);
    assert_eq!(h.arb.active_index(), 4);

    // Settled on slide 4's own interval, nothing further fires.
    h.frame(Harness::inside_slide(4), done);

    let events = h.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].trigger, Trigger::Scroll);
    assert_eq!(events[0].to_index, 2);
    assert_eq!(events[1].trigger, Trigger::Click);
    assert_eq!(events[1].to_index, 4);
}

#[test]
fn fast_jump_sets_and_then_clears_the_flag() {
    let mut h = Harness::new();
    let t0 = Instant::now();

    // One flick deep into the region: a five-slide jump.
    h.frame(Harness::inside_slide(5), t0);
    assert_eq!(h.arb.active_index(), 5);
    assert!(h.arb.state().is_fast_scrolling);

    // Holding still through the quiet period settles the flag.
    h.frame(Harness::inside_slide(5), t0 + Duration::from_millis(100));
    assert!(h.arb.state().is_fast_scrolling);
    h.frame(Harness::inside_slide(5), t0 + Duration::from_millis(200));
    assert!(!h.arb.state().is_fast_scrolling);
}

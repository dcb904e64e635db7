mod scenarios;
mod scheduler;

use std::sync::{Arc, Mutex};

use crate::analytics::{AnalyticsEmitter, TransitionEvent};

use super::ScrollRegion;
use super::arbitrator::NavigationArbitrator;

/// Emitter that appends every event to a shared log.
struct RecordingEmitter {
    events: Arc<Mutex<Vec<TransitionEvent>>>,
}

impl AnalyticsEmitter for RecordingEmitter {
    fn emit(&self, event: TransitionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Assert two offsets match within float tolerance.
fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

/// Helper to create `n` slide labels ("Slide 1".."Slide n").
fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Slide {i}")).collect()
}

/// Helper to create a region anchored at offset 100.
fn region(intro: f32, main: f32) -> ScrollRegion {
    ScrollRegion {
        anchor_offset: 100.0,
        intro_distance: intro,
        main_distance: main,
    }
}

/// Arbitrator over `n` slides with a recording emitter attached.
fn arbitrator(
    n: usize,
    start: usize,
) -> (NavigationArbitrator, Arc<Mutex<Vec<TransitionEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let arb = NavigationArbitrator::new(
        labels(n),
        start,
        Box::new(RecordingEmitter {
            events: events.clone(),
        }),
    );
    (arb, events)
}

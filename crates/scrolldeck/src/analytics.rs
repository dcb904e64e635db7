use std::sync::mpsc::{Sender, channel};

/// Event name shared by scroll-driven and click-driven slide transitions.
pub const EVENT_NAME: &str = "feature_tab_switched";
/// Stable location tag so the same event can be captured from other surfaces.
pub const LOCATION: &str = "snapshot_showcase";

/// Which driver produced a slide transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Scroll,
    Click,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Click => "click",
        }
    }
}

/// One slide transition as seen by analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub from_label: String,
    pub to_label: String,
    pub to_index: usize,
    pub trigger: Trigger,
}

/// Sink for transition events. Fire-and-forget: implementations must never
/// block the caller or let a delivery failure escape as a panic.
pub trait AnalyticsEmitter {
    fn emit(&self, event: TransitionEvent);
}

/// Discards every event. Used when analytics is configured off.
pub struct NullEmitter;

impl AnalyticsEmitter for NullEmitter {
    fn emit(&self, _event: TransitionEvent) {}
}

/// Posts events to an HTTP capture endpoint from a background thread.
///
/// The UI thread only pushes onto a channel; serialization and the request
/// happen on the worker, and delivery failures are dropped silently.
pub struct HttpEmitter {
    tx: Sender<TransitionEvent>,
}

impl HttpEmitter {
    pub fn new(endpoint: String) -> Self {
        let (tx, rx) = channel::<TransitionEvent>();
        std::thread::spawn(move || {
            for event in rx {
                let payload = serde_json::json!({
                    "event": EVENT_NAME,
                    "properties": {
                        "from_tab": event.from_label,
                        "to_tab": event.to_label,
                        "to_tab_index": event.to_index,
                        "trigger": event.trigger.as_str(),
                        "location": LOCATION,
                    },
                });
                let _ = ureq::post(&endpoint).send_json(&payload);
            }
        });
        Self { tx }
    }
}

impl AnalyticsEmitter for HttpEmitter {
    fn emit(&self, event: TransitionEvent) {
        // If the worker is gone the event is dropped, not surfaced.
        let _ = self.tx.send(event);
    }
}

use std::time::Instant;

/// Duration of the programmatic scroll triggered by a tab click, in seconds.
pub const SCROLL_TWEEN_DURATION: f32 = 0.8;

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// A time-bounded animated scroll from one document offset to another.
///
/// The arbitrator owns at most one `ScrollTween`; replacing or dropping it
/// is cancellation, so a superseded tween's completion can never run. There
/// is no timeout: a new explicit selection is the only cancellation trigger.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    from: f32,
    to: f32,
    start: Instant,
    duration: f32,
}

impl ScrollTween {
    pub fn new(from: f32, to: f32, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration: SCROLL_TWEEN_DURATION,
        }
    }

    /// The document offset this tween settles at.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Eased offset at `now`, clamped to the target once the duration has
    /// elapsed.
    pub fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start).as_secs_f32() >= self.duration
    }
}

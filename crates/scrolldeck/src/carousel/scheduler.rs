use std::time::{Duration, Instant};

/// Index jump size at or above which a proposal counts as fast-scroll.
pub const FAST_THRESHOLD: usize = 3;
/// Commits closer together than this also count as fast-scroll.
pub const MIN_INTERVAL: Duration = Duration::from_millis(50);
/// Quiet time with no qualifying proposal before the fast flag clears.
pub const QUIET_PERIOD: Duration = Duration::from_millis(150);

/// An index proposal that survived frame batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub index: usize,
    /// True when the proposal qualified as fast-scroll (large jump or
    /// rapid succession).
    pub fast: bool,
}

/// Rate-limits and classifies index proposals between the mapper and the
/// arbitrator.
///
/// Any number of raw proposals may arrive per rendering frame during fast
/// wheel input; [`UpdateScheduler::flush`] forwards at most one per frame,
/// carrying the most recent value. Proposals equal to the last committed
/// index are dropped before they reach the arbitrator.
///
/// All time enters through explicit `Instant` parameters, so the debounce
/// behavior is testable without sleeping.
#[derive(Debug)]
pub struct UpdateScheduler {
    pending: Option<usize>,
    committed: usize,
    last_commit: Option<Instant>,
    fast_until: Option<Instant>,
}

impl UpdateScheduler {
    pub fn new(initial_index: usize) -> Self {
        Self {
            pending: None,
            committed: initial_index,
            last_commit: None,
            fast_until: None,
        }
    }

    /// Record a raw proposal from the mapper. The latest value within a
    /// frame wins.
    pub fn propose(&mut self, index: usize) {
        self.pending = Some(index);
    }

    /// Called exactly once per rendering frame. Expires the fast flag, then
    /// returns at most one classified proposal.
    pub fn flush(&mut self, now: Instant) -> Option<Proposal> {
        if self.fast_until.is_some_and(|t| now >= t) {
            self.fast_until = None;
        }

        let index = self.pending.take()?;
        if index == self.committed {
            return None;
        }

        let jump = index.abs_diff(self.committed) >= FAST_THRESHOLD;
        let rapid = self
            .last_commit
            .is_some_and(|t| now.duration_since(t) < MIN_INTERVAL);
        let fast = jump || rapid;
        if fast {
            // Any new fast proposal restarts the quiet-period timer.
            self.fast_until = Some(now + QUIET_PERIOD);
        }

        Some(Proposal { index, fast })
    }

    /// Record that the arbitrator committed `index`, whether the commit came
    /// through [`flush`](Self::flush) or bypassed the scheduler entirely
    /// (explicit slide selection).
    pub fn record_commit(&mut self, index: usize, now: Instant) {
        self.committed = index;
        self.last_commit = Some(now);
    }

    /// True while inside a fast-scroll burst (cleared by
    /// [`flush`](Self::flush) after the quiet period elapses).
    pub fn is_fast_scrolling(&self) -> bool {
        self.fast_until.is_some()
    }
}

//! Frame batching, rate limiting, and fast-scroll classification. All time
//! flows through explicit `Instant`s, so nothing here sleeps.

use std::time::{Duration, Instant};

use super::super::scheduler::{Proposal, QUIET_PERIOD, UpdateScheduler};

#[test]
fn last_proposal_in_a_frame_wins() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    scheduler.propose(1);
    scheduler.propose(2);
    scheduler.propose(4);
    assert_eq!(
        scheduler.flush(t0),
        Some(Proposal {
            index: 4,
            fast: true
        })
    );
}

#[test]
fn flush_without_proposals_yields_nothing() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    assert_eq!(scheduler.flush(t0), None);
}

#[test]
fn proposal_equal_to_committed_is_dropped() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(2);
    scheduler.propose(2);
    assert_eq!(scheduler.flush(t0), None);
}

#[test]
fn pending_is_consumed_by_flush() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    scheduler.propose(1);
    assert!(scheduler.flush(t0).is_some());
    assert_eq!(scheduler.flush(t0), None);
}

#[test]
fn single_step_is_not_fast() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    scheduler.propose(1);
    let proposal = scheduler.flush(t0).unwrap();
    assert!(!proposal.fast);
    assert!(!scheduler.is_fast_scrolling());
}

#[test]
fn large_jump_is_fast() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    scheduler.propose(3);
    let proposal = scheduler.flush(t0).unwrap();
    assert!(proposal.fast);
    assert!(scheduler.is_fast_scrolling());
}

#[test]
fn backward_jump_is_fast_too() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(5);
    scheduler.propose(1);
    assert!(scheduler.flush(t0).unwrap().fast);
}

#[test]
fn rapid_succession_is_fast_even_for_single_steps() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);

    scheduler.propose(1);
    assert!(!scheduler.flush(t0).unwrap().fast);
    scheduler.record_commit(1, t0);

    // Next commit lands 20ms later, under the 50ms minimum interval.
    scheduler.propose(2);
    let proposal = scheduler.flush(t0 + Duration::from_millis(20)).unwrap();
    assert!(proposal.fast);
}

#[test]
fn unhurried_single_steps_stay_slow() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);

    scheduler.propose(1);
    assert!(!scheduler.flush(t0).unwrap().fast);
    scheduler.record_commit(1, t0);

    scheduler.propose(2);
    let proposal = scheduler.flush(t0 + Duration::from_millis(500)).unwrap();
    assert!(!proposal.fast);
}

#[test]
fn fast_flag_clears_after_the_quiet_period() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);
    scheduler.propose(4);
    assert!(scheduler.flush(t0).unwrap().fast);

    // One tick before the deadline the burst is still on.
    scheduler.flush(t0 + QUIET_PERIOD - Duration::from_millis(1));
    assert!(scheduler.is_fast_scrolling());

    scheduler.flush(t0 + QUIET_PERIOD);
    assert!(!scheduler.is_fast_scrolling());
}

#[test]
fn new_fast_proposal_restarts_the_quiet_period() {
    let t0 = Instant::now();
    let mut scheduler = UpdateScheduler::new(0);

    scheduler.propose(4);
    assert!(scheduler.flush(t0).unwrap().fast);
    scheduler.record_commit(4, t0);

    // A second burst 100ms in pushes the deadline out to t0 + 250ms.
    let t1 = t0 + Duration::from_millis(100);
    scheduler.propose(8);
    assert!(scheduler.flush(t1).unwrap().fast);
    scheduler.record_commit(8, t1);

    // The original deadline (t0 + 150ms) passes without clearing the flag.
    scheduler.flush(t0 + Duration::from_millis(200));
    assert!(scheduler.is_fast_scrolling());

    scheduler.flush(t1 + QUIET_PERIOD);
    assert!(!scheduler.is_fast_scrolling());
}

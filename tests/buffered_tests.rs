// Prefetch buffer tests: burst pulls, drain-triggered refills, peeking,
// and early upstream release.

mod common;

use common::observable;
use seq_engine::{source, Error};

// =============================================================================
// Test 1: the upstream is pulled in bursts of the buffer size
// =============================================================================
#[test]
fn pulls_in_bursts() {
    let (seq, counters) = observable(vec![1, 2, 3, 4]);
    let mut buffered = seq.buffered(2).unwrap();

    assert_eq!(buffered.next().unwrap(), 1);
    assert_eq!(counters.pulled.get(), 2);
    assert_eq!(buffered.next().unwrap(), 2);
    assert_eq!(counters.pulled.get(), 2);
    assert_eq!(buffered.next().unwrap(), 3);
    assert_eq!(counters.pulled.get(), 4);
    assert_eq!(buffered.next().unwrap(), 4);
    assert_eq!(counters.pulled.get(), 4);
}

// =============================================================================
// Test 2: the refill that drains the upstream releases it early
// =============================================================================
#[test]
fn drain_refill_releases_upstream() {
    let (seq, counters) = observable(vec![1, 2, 3, 4]);
    let mut buffered = seq.buffered(2).unwrap();

    buffered.next().unwrap();
    buffered.next().unwrap();
    assert_eq!(counters.released.get(), 0);
    // this refill pulls the last upstream elements
    buffered.next().unwrap();
    assert_eq!(counters.released.get(), 1);
    // the final element is served from the buffer alone
    assert_eq!(buffered.next().unwrap(), 4);
}

// =============================================================================
// Test 3: peek fills but does not consume
// =============================================================================
#[test]
fn peek_does_not_consume() {
    let mut buffered = source::of([1, 2, 3]).buffered(2).unwrap();
    assert_eq!(buffered.peek().unwrap(), Some(&1));
    assert_eq!(buffered.peek().unwrap(), Some(&1));
    assert_eq!(buffered.next().unwrap(), 1);
    assert_eq!(buffered.peek().unwrap(), Some(&2));
}

// =============================================================================
// Test 4: a zero-size buffer is rejected
// =============================================================================
#[test]
fn zero_size_rejected() {
    assert!(matches!(
        source::of([1, 2, 3]).buffered(0),
        Err(Error::InvalidArgument(_))
    ));
}

// =============================================================================
// Test 5: converting back into a sequence keeps prefetching
// =============================================================================
#[test]
fn into_seq_round_trip() {
    let result = source::of([1, 2, 3, 4, 5])
        .buffered(2)
        .unwrap()
        .into_seq()
        .map(|x| x * 10)
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(result, vec![10, 20, 30, 40, 50]);
}

// =============================================================================
// Test 6: exhausting the buffer fails like any other sequence
// =============================================================================
#[test]
fn exhausted_buffer_fails() {
    let mut buffered = source::of([1]).buffered(3).unwrap();
    assert_eq!(buffered.next().unwrap(), 1);
    assert!(matches!(buffered.next(), Err(Error::Exhausted)));
    assert_eq!(buffered.peek().unwrap(), None);
}

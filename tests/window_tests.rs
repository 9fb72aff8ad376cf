// Windowing tests: fixed-size chunks, sorted-run grouping, and
// overlapping sliding windows.

use seq_engine::{source, Error, Sequence};

fn materialize<T: 'static>(windows: Sequence<Sequence<T>>) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    for window in windows.into_iter().unwrap() {
        out.push(window.unwrap().collect_vec().unwrap());
    }
    out
}

// =============================================================================
// Test 1: grouped chunks with a shorter final chunk
// =============================================================================
#[test]
fn grouped_chunks() {
    let chunks = materialize(source::of([1, 2, 3, 4, 5, 6, 7, 8]).grouped(3).unwrap());
    assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
}

// =============================================================================
// Test 2: grouped with size 0 is rejected
// =============================================================================
#[test]
fn grouped_zero_rejected() {
    assert!(matches!(
        source::of([1, 2, 3]).grouped(0),
        Err(Error::InvalidArgument(_))
    ));
}

// =============================================================================
// Test 3: grouped_by bundles comparator-equal runs
// =============================================================================
#[test]
fn grouped_by_bundles_runs() {
    let input = source::of(["a", "a", "b", "d", "e", "E"]);
    let groups = materialize(
        input
            .grouped_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()))
            .unwrap(),
    );
    assert_eq!(
        groups,
        vec![vec!["a", "a"], vec!["b"], vec!["d"], vec!["e", "E"]]
    );
}

// =============================================================================
// Test 4: grouped_by rejects unsorted input
// =============================================================================
#[test]
fn grouped_by_rejects_unsorted() {
    let windows = source::of([1, 3, 2]).grouped_by(i32::cmp).unwrap();
    let mut result = Ok(());
    for window in windows.into_iter().unwrap() {
        match window {
            Ok(mut group) => {
                group.collect_vec().unwrap();
            }
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }
    assert!(matches!(result, Err(Error::Unsorted(_))));
}

// =============================================================================
// Test 5: sliding with step == window tiles the input
// =============================================================================
#[test]
fn sliding_tiles() {
    let windows = materialize(
        source::of([1, 2, 3, 4, 5, 6, 7, 8])
            .sliding(3, 3)
            .unwrap(),
    );
    assert_eq!(windows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
}

// =============================================================================
// Test 6: sliding with overlap
// =============================================================================
#[test]
fn sliding_overlaps() {
    let windows = materialize(
        source::of([1, 2, 3, 4, 5, 6, 7, 8])
            .sliding(4, 2)
            .unwrap(),
    );
    assert_eq!(
        windows,
        vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 5, 6],
            vec![5, 6, 7, 8],
            vec![7, 8]
        ]
    );
}

// =============================================================================
// Test 7: sliding with a step larger than the window skips elements
// =============================================================================
#[test]
fn sliding_step_exceeds_window() {
    let windows = materialize(source::of([1, 2, 3, 4, 5]).sliding(2, 4).unwrap());
    assert_eq!(windows, vec![vec![1, 2], vec![5]]);
}

// =============================================================================
// Test 8: sliding over a too-short input is one partial window
// =============================================================================
#[test]
fn sliding_short_input() {
    let windows = materialize(source::of([1, 2]).sliding(5, 1).unwrap());
    assert_eq!(windows, vec![vec![1, 2]]);
}

// =============================================================================
// Test 9: sliding rejects zero window or step
// =============================================================================
#[test]
fn sliding_zero_rejected() {
    assert!(matches!(
        source::of([1, 2, 3]).sliding(0, 1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        source::of([1, 2, 3]).sliding(1, 0),
        Err(Error::InvalidArgument(_))
    ));
}

// Source factory tests: collections, ranges, generators, file-backed
// lines and characters, and token scanning.

use seq_engine::{source, Error};

// =============================================================================
// Test 1: collection factories
// =============================================================================
#[test]
fn collection_factories() {
    assert_eq!(source::of([1, 2, 3]).collect_vec().unwrap(), vec![1, 2, 3]);
    assert_eq!(source::from_vec(vec![4, 5]).collect_vec().unwrap(), vec![4, 5]);
    assert_eq!(source::singleton(7).collect_vec().unwrap(), vec![7]);
    assert!(source::empty::<i32>().collect_vec().unwrap().is_empty());
    assert_eq!(
        source::from_iter(0..4).collect_vec().unwrap(),
        vec![0, 1, 2, 3]
    );
}

// =============================================================================
// Test 2: half-open and closed ranges
// =============================================================================
#[test]
fn ranges() {
    assert_eq!(
        source::range(2, 6).unwrap().collect_vec().unwrap(),
        vec![2, 3, 4, 5]
    );
    assert_eq!(
        source::closed_range(2, 6).unwrap().collect_vec().unwrap(),
        vec![2, 3, 4, 5, 6]
    );
    assert_eq!(
        source::closed_range(3, 3).unwrap().collect_vec().unwrap(),
        vec![3]
    );
}

// =============================================================================
// Test 3: empty ranges are rejected
// =============================================================================
#[test]
fn empty_ranges_rejected() {
    assert!(matches!(source::range(5, 5), Err(Error::InvalidArgument(_))));
    assert!(matches!(source::range(5, 2), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        source::closed_range(5, 4),
        Err(Error::InvalidArgument(_))
    ));
}

// =============================================================================
// Test 4: counter ascends without end
// =============================================================================
#[test]
fn counter_ascends() {
    let result = source::counter(10).take(3).unwrap().collect_vec().unwrap();
    assert_eq!(result, vec![10, 11, 12]);
}

// =============================================================================
// Test 5: counter stops cleanly at the numeric limit
// =============================================================================
#[test]
fn counter_stops_at_limit() {
    let result = source::counter(i64::MAX - 1).collect_vec().unwrap();
    assert_eq!(result, vec![i64::MAX - 1, i64::MAX]);
}

// =============================================================================
// Test 6: iterate applies the generator repeatedly
// =============================================================================
#[test]
fn iterate_generates() {
    let powers = source::iterate(1, |x| x * 2)
        .take(5)
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(powers, vec![1, 2, 4, 8, 16]);
}

// =============================================================================
// Test 7: from_nested lifts nested vectors
// =============================================================================
#[test]
fn from_nested_lifts() {
    let flat = source::from_nested(vec![vec![1, 2], vec![], vec![3]])
        .flat_map(|inner| inner)
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(flat, vec![1, 2, 3]);
}

// =============================================================================
// Test 8: file lines strip terminators
// =============================================================================
#[test]
fn file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.txt");
    std::fs::write(&path, "alpha\nbeta\r\ngamma").unwrap();

    let lines = source::lines(&path).unwrap().collect_vec().unwrap();
    assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
}

// =============================================================================
// Test 9: file characters decode multi-byte utf-8
// =============================================================================
#[test]
fn file_chars() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chars.txt");
    std::fs::write(&path, "hé→").unwrap();

    let chars = source::chars(&path).unwrap().collect_vec().unwrap();
    assert_eq!(chars, vec!['h', 'é', '→']);
}

// =============================================================================
// Test 10: invalid utf-8 surfaces as corruption
// =============================================================================
#[test]
fn invalid_utf8_is_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, [0x61, 0xff, 0x62]).unwrap();

    let mut chars = source::chars(&path).unwrap();
    assert_eq!(chars.next().unwrap(), 'a');
    assert!(matches!(chars.next(), Err(Error::Corruption(_))));
}

// =============================================================================
// Test 10b: a multi-byte character cut off at EOF is corruption too
// =============================================================================
#[test]
fn truncated_utf8_is_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.txt");
    // 'é' is 0xc3 0xa9; drop the continuation byte
    std::fs::write(&path, [0x61, 0xc3]).unwrap();

    let mut chars = source::chars(&path).unwrap();
    assert_eq!(chars.next().unwrap(), 'a');
    assert!(matches!(chars.next(), Err(Error::Corruption(_))));
}

// =============================================================================
// Test 11: in-memory character sequence
// =============================================================================
#[test]
fn chars_of_string() {
    let chars = source::chars_of("ab→").collect_vec().unwrap();
    assert_eq!(chars, vec!['a', 'b', '→']);
}

// =============================================================================
// Test 12: single-character token scanning
// =============================================================================
#[test]
fn tokens_single_char_delim() {
    let tokens = source::tokens_of_str("a,b,,c", ",")
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(tokens, vec!["a", "b", "", "c"]);
}

// =============================================================================
// Test 13: multi-character delimiters and trailing delimiters
// =============================================================================
#[test]
fn tokens_multi_char_delim() {
    let tokens = source::tokens_of_str("ab--cd--", "--")
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(tokens, vec!["ab", "cd"]);
}

// =============================================================================
// Test 14: an unterminated tail is still a token
// =============================================================================
#[test]
fn tokens_unterminated_tail() {
    let tokens = source::tokens_of_str("ab--cd", "--")
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(tokens, vec!["ab", "cd"]);
}

// =============================================================================
// Test 15: an empty delimiter is rejected
// =============================================================================
#[test]
fn tokens_empty_delim_rejected() {
    assert!(matches!(
        source::tokens_of_str("abc", ""),
        Err(Error::InvalidArgument(_))
    ));
}

// =============================================================================
// Test 16: token scanning straight from a file
// =============================================================================
#[test]
fn tokens_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.txt");
    std::fs::write(&path, "one;two;three").unwrap();

    let tokens = source::tokens_of_file(&path, ";")
        .unwrap()
        .collect_vec()
        .unwrap();
    assert_eq!(tokens, vec!["one", "two", "three"]);
}

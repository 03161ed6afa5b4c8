//! Tests for partition planning.

use crate::partition::plan_partitions;
use proptest::prelude::*;
use std::io::Cursor;
use std::ops::Range;

fn plan(input: &[u8], workers: usize) -> Vec<Range<u64>> {
  let mut cursor = Cursor::new(input.to_vec());
  plan_partitions(&mut cursor, input.len() as u64, workers).unwrap()
}

fn assert_line_aligned(input: &[u8], ranges: &[Range<u64>]) {
  let mut expected_start = 0;
  for range in ranges {
    assert_eq!(range.start, expected_start, "ranges must be contiguous");
    assert!(range.end > range.start, "ranges must be non-empty");
    if range.start > 0 {
      assert_eq!(input[range.start as usize - 1], b'\n');
    }
    expected_start = range.end;
  }
  assert_eq!(expected_start, input.len() as u64);
}

#[test]
fn test_empty_input_has_no_partitions() {
  assert!(plan(b"", 4).is_empty());
}

#[test]
fn test_single_worker_covers_everything() {
  assert_eq!(plan(b"a;1.0\nb;2.0\n", 1), vec![0..12]);
}

#[test]
fn test_zero_workers_treated_as_one() {
  assert_eq!(plan(b"a;1.0\n", 0), vec![0..6]);
}

#[test]
fn test_boundaries_move_past_newline() {
  let input = b"aaaa;1.0\nb;2.0\ncc;3.0\nd;4.0\n";
  let ranges = plan(input, 3);
  assert_line_aligned(input, &ranges);
  assert!(ranges.len() > 1);
}

#[test]
fn test_more_workers_than_lines() {
  let input = b"a;1.0\nb;2.0\n";
  let ranges = plan(input, 16);
  assert_line_aligned(input, &ranges);
  assert!(ranges.len() <= 2);
}

#[test]
fn test_one_long_line() {
  let input = b"very long station name;1.0";
  assert_eq!(plan(input, 4), vec![0..input.len() as u64]);
}

proptest! {
  #[test]
  fn test_ranges_are_contiguous_and_aligned(
    lines in prop::collection::vec("[a-z]{1,20};-?[0-9]{1,2}\\.[0-9]\n", 1..50),
    workers in 1usize..12,
    drop_last_newline in prop::bool::ANY,
  ) {
    let mut input = lines.concat().into_bytes();
    if drop_last_newline {
      input.pop();
    }
    let ranges = plan(&input, workers);
    prop_assert!(ranges.len() <= workers);
    assert_line_aligned(&input, &ranges);
  }
}

//! Tests for the aggregation map.

use crate::aggregation::AggregationMap;
use crate::value::Measurement;
use proptest::prelude::*;

fn m(tenths: i64) -> Measurement {
  Measurement::from_tenths(tenths)
}

#[test]
fn test_update_creates_then_mutates() {
  let mut map = AggregationMap::new();
  assert!(map.is_empty());

  map.update(b"Hamburg", m(120));
  map.update(b"Hamburg", m(140));
  map.update(b"Berlin", m(55));

  assert_eq!(map.len(), 2);
  assert_eq!(map.total_count(), 3);
  let hamburg = map.get(b"Hamburg").unwrap();
  assert_eq!(hamburg.count(), 2);
  assert_eq!(hamburg.min(), m(120));
  assert_eq!(hamburg.max(), m(140));
  assert!(map.get(b"Paris").is_none());
}

#[test]
fn test_keys_are_raw_bytes() {
  let mut map = AggregationMap::new();
  map.update("São Paulo".as_bytes(), m(1));
  map.update(b"Sao Paulo", m(2));
  assert_eq!(map.len(), 2);
}

#[test]
fn test_sorted_is_bytewise() {
  let mut map = AggregationMap::new();
  for key in ["b", "a", "B", "ab", "Ä"] {
    map.update(key.as_bytes(), m(0));
  }
  let keys: Vec<&[u8]> = map.sorted().into_iter().map(|(k, _)| k).collect();
  let expected: Vec<&[u8]> = vec![&b"B"[..], &b"a"[..], &b"ab"[..], &b"b"[..], "Ä".as_bytes()];
  assert_eq!(keys, expected);
}

#[test]
fn test_merge_disjoint_and_shared() {
  let mut left = AggregationMap::new();
  left.update(b"a", m(10));
  left.update(b"b", m(20));

  let mut right = AggregationMap::new();
  right.update(b"b", m(-20));
  right.update(b"c", m(5));

  left.merge(right);
  assert_eq!(left.len(), 3);
  let b = left.get(b"b").unwrap();
  assert_eq!(b.count(), 2);
  assert_eq!(b.min(), m(-20));
  assert_eq!(b.max(), m(20));
  assert_eq!(b.sum_tenths(), 0);
}

#[test]
fn test_merge_into_empty() {
  let mut empty = AggregationMap::new();
  let mut other = AggregationMap::new();
  other.update(b"x", m(1));
  empty.merge(other);
  assert_eq!(empty.len(), 1);
}

proptest! {
  #[test]
  fn test_split_merge_equals_single_map(
    records in prop::collection::vec((0u8..6, -999i64..=999), 0..200),
    split in 0usize..200,
  ) {
    let split = split.min(records.len());
    let mut whole = AggregationMap::new();
    let mut left = AggregationMap::new();
    let mut right = AggregationMap::new();
    for (i, (key, value)) in records.iter().enumerate() {
      let key = [b'k', b'0' + key];
      whole.update(&key, m(*value));
      if i < split {
        left.update(&key, m(*value));
      } else {
        right.update(&key, m(*value));
      }
    }
    left.merge(right);
    prop_assert_eq!(left.sorted(), whole.sorted());
  }
}

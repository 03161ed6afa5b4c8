//! Tests for summary rendering.

use crate::aggregation::AggregationMap;
use crate::format::{render_entry, render_summary};
use crate::stats::RunningStats;
use crate::value::Measurement;

fn m(tenths: i64) -> Measurement {
  Measurement::from_tenths(tenths)
}

#[test]
fn test_empty_map() {
  assert_eq!(render_summary(&AggregationMap::new()), "{}");
}

#[test]
fn test_sorted_and_joined() {
  let mut map = AggregationMap::new();
  map.update(b"Hamburg", m(120));
  map.update(b"Hamburg", m(140));
  map.update(b"Berlin", m(55));
  assert_eq!(
    render_summary(&map),
    "{Berlin=5.5/5.5/5.5, Hamburg=12.0/13.0/14.0}"
  );
}

#[test]
fn test_negative_values() {
  let mut map = AggregationMap::new();
  map.update(b"Yakutsk", m(-5));
  map.update(b"Yakutsk", m(-400));
  assert_eq!(render_summary(&map), "{Yakutsk=-40.0/-20.2/-0.5}");
}

#[test]
fn test_mean_tie_rounds_up() {
  let mut map = AggregationMap::new();
  map.update(b"x", m(2));
  map.update(b"x", m(3));
  assert_eq!(render_summary(&map), "{x=0.2/0.3/0.3}");
}

#[test]
fn test_render_entry() {
  let mut out = String::new();
  render_entry(&mut out, b"Oslo", &RunningStats::new(m(33)));
  assert_eq!(out, "Oslo=3.3/3.3/3.3");
}

#[test]
fn test_every_number_has_one_fractional_digit() {
  let mut map = AggregationMap::new();
  for (i, v) in [-999, -10, -1, 0, 1, 10, 999, 1234].iter().enumerate() {
    map.update(format!("k{}", i).as_bytes(), m(*v));
  }
  let summary = render_summary(&map);
  let body = &summary[1..summary.len() - 1];
  for entry in body.split(", ") {
    let (_, numbers) = entry.split_once('=').unwrap();
    for number in numbers.split('/') {
      let (_, fraction) = number.split_once('.').unwrap();
      assert_eq!(fraction.len(), 1, "in {}", entry);
    }
  }
}

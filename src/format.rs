//! Result formatting.
//!
//! Renders `{k1=min/mean/max, k2=min/mean/max, ...}` with keys in byte-wise
//! ascending order and every number printed with exactly one fractional digit.
//! Means are rounded half up (see [`RunningStats::mean`]).
//!
//! [`RunningStats::mean`]: crate::stats::RunningStats::mean

use crate::aggregation::AggregationMap;
use crate::stats::RunningStats;
use std::fmt::Write;

/// Renders the final summary line for `map`.
///
/// # Example
///
/// ```rust
/// use stationweave::aggregation::AggregationMap;
/// use stationweave::format::render_summary;
/// use stationweave::value::Measurement;
///
/// let mut map = AggregationMap::new();
/// map.update(b"Oslo", Measurement::from_tenths(33));
/// assert_eq!(render_summary(&map), "{Oslo=3.3/3.3/3.3}");
/// ```
pub fn render_summary(map: &AggregationMap) -> String {
  let entries = map.sorted();
  let mut out = String::with_capacity(2 + entries.len() * 32);
  out.push('{');
  for (i, (key, stats)) in entries.into_iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    render_entry(&mut out, key, stats);
  }
  out.push('}');
  out
}

/// Appends one `key=min/mean/max` entry.
pub fn render_entry(out: &mut String, key: &[u8], stats: &RunningStats) {
  out.push_str(&String::from_utf8_lossy(key));
  // Writing into a String cannot fail.
  let _ = write!(out, "={}/{}/{}", stats.min(), stats.mean(), stats.max());
}

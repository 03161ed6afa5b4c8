//! # Aggregation Map
//!
//! One [`RunningStats`] per distinct key. Keys are copied into the map once,
//! on first sight; every later update looks the key up by borrowed bytes and
//! mutates the entry in place, so the hot path never allocates.
//!
//! Maps built independently (one per partition) are combined with
//! [`AggregationMap::merge`].

use crate::stats::RunningStats;
use crate::value::Measurement;
use rustc_hash::FxHashMap;

/// Running statistics keyed by raw key bytes.
#[derive(Debug, Clone, Default)]
pub struct AggregationMap {
  entries: FxHashMap<Box<[u8]>, RunningStats>,
}

impl AggregationMap {
  /// Creates an empty map.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty map sized for `keys` distinct keys.
  pub fn with_capacity(keys: usize) -> Self {
    Self {
      entries: FxHashMap::with_capacity_and_hasher(keys, Default::default()),
    }
  }

  /// Records one measurement for `key`.
  #[inline]
  pub fn update(&mut self, key: &[u8], value: Measurement) {
    match self.entries.get_mut(key) {
      Some(stats) => stats.update(value),
      None => {
        self.entries.insert(key.into(), RunningStats::new(value));
      }
    }
  }

  /// Folds another map into this one, consuming it.
  pub fn merge(&mut self, other: AggregationMap) {
    for (key, stats) in other.entries {
      match self.entries.get_mut(&key) {
        Some(existing) => existing.merge(&stats),
        None => {
          self.entries.insert(key, stats);
        }
      }
    }
  }

  /// Statistics for `key`, if it has been seen.
  pub fn get(&self, key: &[u8]) -> Option<&RunningStats> {
    self.entries.get(key)
  }

  /// Number of distinct keys.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True if no record has been aggregated.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Total number of measurements across all keys.
  pub fn total_count(&self) -> u64 {
    self.entries.values().map(RunningStats::count).sum()
  }

  /// Iterates entries in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (&[u8], &RunningStats)> {
    self.entries.iter().map(|(key, stats)| (&**key, stats))
  }

  /// Entries sorted by key, byte-wise ascending.
  pub fn sorted(&self) -> Vec<(&[u8], &RunningStats)> {
    let mut entries: Vec<_> = self.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
  }
}

//! Per-key running statistics.

use crate::value::Measurement;

/// Count, min, max and sum of every measurement seen for one key.
///
/// Always created from a first measurement, so `count >= 1` and
/// `min <= max` hold for every live instance. The sum is exact (tenths in an
/// `i128`), so merging and averaging never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningStats {
  count: u64,
  min: Measurement,
  max: Measurement,
  sum: i128,
}

impl RunningStats {
  /// Seeds the statistics from the first measurement of a key.
  pub fn new(value: Measurement) -> Self {
    Self {
      count: 1,
      min: value,
      max: value,
      sum: value.tenths() as i128,
    }
  }

  /// Folds one more measurement in.
  #[inline]
  pub fn update(&mut self, value: Measurement) {
    self.count += 1;
    self.sum += value.tenths() as i128;
    self.min = self.min.min(value);
    self.max = self.max.max(value);
  }

  /// Combines statistics gathered independently for the same key.
  ///
  /// Associative and commutative, so partial results can be merged in any
  /// order.
  pub fn merge(&mut self, other: &RunningStats) {
    self.count += other.count;
    self.sum += other.sum;
    self.min = self.min.min(other.min);
    self.max = self.max.max(other.max);
  }

  /// Number of measurements folded in.
  pub fn count(&self) -> u64 {
    self.count
  }

  /// Smallest measurement seen.
  pub fn min(&self) -> Measurement {
    self.min
  }

  /// Largest measurement seen.
  pub fn max(&self) -> Measurement {
    self.max
  }

  /// Exact sum in tenths.
  pub fn sum_tenths(&self) -> i128 {
    self.sum
  }

  /// Sum as a float.
  pub fn sum(&self) -> f64 {
    self.sum as f64 / 10.0
  }

  /// Mean rounded to one decimal, ties rounded up toward positive infinity.
  ///
  /// Computed as `floor((2 * sum + count) / (2 * count))` in tenths, so
  /// `0.25` becomes `0.3` and `-0.25` becomes `-0.2`.
  pub fn mean(&self) -> Measurement {
    let count = self.count as i128;
    let tenths = (2 * self.sum + count).div_euclid(2 * count);
    // The mean lies between min and max, both of which fit an i64.
    Measurement::from_tenths(tenths as i64)
  }
}

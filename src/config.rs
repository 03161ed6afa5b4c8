//! Run configuration.

use crate::chunk_reader::DEFAULT_CHUNK_SIZE;
use crate::error::ErrorStrategy;

/// Configuration for a run.
///
/// # Example
///
/// ```rust
/// use stationweave::config::EngineConfig;
/// use stationweave::error::ErrorStrategy;
///
/// let config = EngineConfig::default()
///   .with_chunk_size(64 * 1024)
///   .with_error_strategy(ErrorStrategy::Skip)
///   .with_workers(4);
/// assert_eq!(config.chunk_size, 64 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
  /// Bytes requested per read. Zero is treated as one.
  pub chunk_size: usize,
  /// What to do with records that fail to parse.
  pub error_strategy: ErrorStrategy,
  /// Number of partitions for the parallel runner. Zero means one per
  /// available core.
  pub workers: usize,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      chunk_size: DEFAULT_CHUNK_SIZE,
      error_strategy: ErrorStrategy::Stop,
      workers: 1,
    }
  }
}

impl EngineConfig {
  /// Sets the chunk size.
  pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
    self.chunk_size = chunk_size;
    self
  }

  /// Sets the error strategy.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the number of partition workers.
  pub fn with_workers(mut self, workers: usize) -> Self {
    self.workers = workers;
    self
  }

  /// Worker count with `0` resolved to the available parallelism.
  pub fn effective_workers(&self) -> usize {
    match self.workers {
      0 => std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1),
      n => n,
    }
  }
}

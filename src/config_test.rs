//! Tests for run configuration.

use crate::chunk_reader::DEFAULT_CHUNK_SIZE;
use crate::config::EngineConfig;
use crate::error::ErrorStrategy;

#[test]
fn test_defaults() {
  let config = EngineConfig::default();
  assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
  assert_eq!(config.error_strategy, ErrorStrategy::Stop);
  assert_eq!(config.workers, 1);
  assert_eq!(config.effective_workers(), 1);
}

#[test]
fn test_builders() {
  let config = EngineConfig::default()
    .with_chunk_size(7)
    .with_error_strategy(ErrorStrategy::Skip)
    .with_workers(3);
  assert_eq!(config.chunk_size, 7);
  assert_eq!(config.error_strategy, ErrorStrategy::Skip);
  assert_eq!(config.effective_workers(), 3);
}

#[test]
fn test_zero_workers_uses_available_parallelism() {
  let config = EngineConfig::default().with_workers(0);
  assert!(config.effective_workers() >= 1);
}

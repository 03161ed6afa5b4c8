//! # Engine
//!
//! Drives one pipeline over a byte source:
//!
//! ```text
//! ChunkReader -> Tokenizer -> parse_measurement -> AggregationMap -> render_summary
//! ```
//!
//! Everything runs on the calling thread with blocking reads. The map is owned
//! by the call and handed back in an [`Aggregation`]; nothing outlives the run.
//!
//! ## Usage
//!
//! ```rust
//! use stationweave::config::EngineConfig;
//! use stationweave::engine::run;
//!
//! let input = "Hamburg;12.0\nHamburg;14.0\nBerlin;5.5\n";
//! let summary = run(input.as_bytes(), &EngineConfig::default())?;
//! assert_eq!(summary, "{Berlin=5.5/5.5/5.5, Hamburg=12.0/13.0/14.0}");
//! # Ok::<(), stationweave::error::EngineError>(())
//! ```

use crate::aggregation::AggregationMap;
use crate::chunk_reader::ChunkReader;
use crate::config::EngineConfig;
use crate::error::{EngineError, ErrorStrategy, ParseError, ParseErrorKind};
use crate::format::render_summary;
use crate::tokenizer::{RecordSink, Tokenizer};
use crate::value::parse_measurement;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Counters describing one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
  /// Bytes read from the source.
  pub bytes: u64,
  /// Non-empty chunks read.
  pub chunks: u64,
  /// Records aggregated.
  pub records: u64,
  /// Records dropped under [`ErrorStrategy::Skip`].
  pub skipped: u64,
}

impl ScanReport {
  /// Adds another scan's counters to this one.
  pub fn merge(&mut self, other: &ScanReport) {
    self.bytes += other.bytes;
    self.chunks += other.chunks;
    self.records += other.records;
    self.skipped += other.skipped;
  }
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
  /// Statistics per key.
  pub map: AggregationMap,
  /// Scan counters.
  pub report: ScanReport,
}

impl Aggregation {
  /// Folds another partial aggregation into this one.
  pub fn merge(&mut self, other: Aggregation) {
    self.map.merge(other.map);
    self.report.merge(&other.report);
  }

  /// Renders the summary line.
  pub fn summary(&self) -> String {
    render_summary(&self.map)
  }
}

/// Sink that parses values, applies the error strategy and updates the map.
struct Aggregator {
  map: AggregationMap,
  strategy: ErrorStrategy,
  records: u64,
  skipped: u64,
}

impl Aggregator {
  fn reject(&mut self, error: ParseError) -> Result<(), EngineError> {
    match self.strategy {
      ErrorStrategy::Stop => Err(error.into()),
      ErrorStrategy::Skip => {
        warn!(
          offset = error.offset,
          token = %error.token,
          reason = %error.kind,
          "skipping malformed record"
        );
        self.skipped += 1;
        Ok(())
      }
    }
  }
}

impl RecordSink for Aggregator {
  #[inline]
  fn record(&mut self, key: &[u8], value: &[u8], offset: u64) -> Result<(), EngineError> {
    if key.is_empty() {
      return self.reject(ParseError::new(ParseErrorKind::EmptyKey, offset, value));
    }
    match parse_measurement(value) {
      Ok(measurement) => {
        self.map.update(key, measurement);
        self.records += 1;
        Ok(())
      }
      Err(kind) => self.reject(ParseError::new(kind, offset, value)),
    }
  }

  fn malformed(&mut self, error: ParseError) -> Result<(), EngineError> {
    self.reject(error)
  }
}

/// Aggregates every record of `source`.
///
/// # Errors
///
/// - [`EngineError::Io`] if a read fails.
/// - [`EngineError::Parse`] on the first malformed record under
///   [`ErrorStrategy::Stop`].
pub fn aggregate<R: Read>(source: R, config: &EngineConfig) -> Result<Aggregation, EngineError> {
  aggregate_at(source, 0, config)
}

/// Like [`aggregate`], for a source that starts at byte `base_offset` of a
/// larger input. Only affects offsets reported in errors.
pub fn aggregate_at<R: Read>(
  source: R,
  base_offset: u64,
  config: &EngineConfig,
) -> Result<Aggregation, EngineError> {
  aggregate_cancellable(source, base_offset, config, &AtomicBool::new(false))
}

/// Like [`aggregate_at`], checking `cancel` before each chunk.
///
/// # Errors
///
/// Returns [`EngineError::Cancelled`] as soon as `cancel` is observed set.
pub fn aggregate_cancellable<R: Read>(
  source: R,
  base_offset: u64,
  config: &EngineConfig,
  cancel: &AtomicBool,
) -> Result<Aggregation, EngineError> {
  debug!(
    base_offset,
    chunk_size = config.chunk_size,
    strategy = %config.error_strategy,
    "starting scan"
  );

  let mut reader = ChunkReader::with_chunk_size(source, config.chunk_size);
  let mut tokenizer = Tokenizer::with_base_offset(base_offset);
  let mut aggregator = Aggregator {
    map: AggregationMap::with_capacity(1024),
    strategy: config.error_strategy,
    records: 0,
    skipped: 0,
  };

  while let Some(chunk) = reader.next_chunk()? {
    if cancel.load(Ordering::Relaxed) {
      debug!(base_offset, bytes = reader.bytes_read(), "scan cancelled");
      return Err(EngineError::Cancelled);
    }
    tokenizer.feed(chunk, &mut aggregator)?;
  }
  tokenizer.finish(&mut aggregator)?;

  let report = ScanReport {
    bytes: reader.bytes_read(),
    chunks: reader.chunks_read(),
    records: aggregator.records,
    skipped: aggregator.skipped,
  };
  info!(
    bytes = report.bytes,
    chunks = report.chunks,
    records = report.records,
    skipped = report.skipped,
    keys = aggregator.map.len(),
    "scan complete"
  );

  Ok(Aggregation {
    map: aggregator.map,
    report,
  })
}

/// Aggregates `source` and renders the summary line.
///
/// No partial output is ever produced: on error nothing is returned but the
/// error.
pub fn run<R: Read>(source: R, config: &EngineConfig) -> Result<String, EngineError> {
  aggregate(source, config).map(|aggregation| aggregation.summary())
}

/// Opens `path` and runs it on the calling thread.
pub fn run_file(path: impl AsRef<Path>, config: &EngineConfig) -> Result<String, EngineError> {
  let file = File::open(path.as_ref())?;
  run(file, config)
}

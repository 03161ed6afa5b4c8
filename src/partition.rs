//! # Partitioned Execution
//!
//! Splits a file into contiguous byte ranges and runs one independent
//! ChunkReader/Tokenizer/AggregationMap pipeline per range on a blocking
//! worker task. Workers share nothing but a cancel flag each; their maps are
//! merged at the end.
//!
//! Every range boundary is moved forward to just past a `\n`, so no line is
//! ever split between two workers. Because [`RunningStats::merge`] is
//! associative and commutative, the merged result does not depend on how many
//! ranges there are or in which order the workers finish.
//!
//! [`RunningStats::merge`]: crate::stats::RunningStats::merge
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stationweave::config::EngineConfig;
//! use stationweave::partition::run_partitioned;
//!
//! # async fn example() -> Result<(), stationweave::error::EngineError> {
//! let config = EngineConfig::default().with_workers(8);
//! let summary = run_partitioned("measurements.txt", &config).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

use crate::config::EngineConfig;
use crate::engine::{Aggregation, aggregate_cancellable, run_file};
use crate::error::EngineError;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const ALIGN_BUFFER: usize = 4096;

/// Splits `[0, len)` into at most `workers` line-aligned ranges.
///
/// Nominal boundaries are evenly spaced; each is moved forward to the byte
/// after the next `\n` at or after it (looking one byte back, so a boundary
/// that already follows a newline stays put). Empty ranges are dropped.
///
/// # Errors
///
/// Returns any I/O error from seeking or reading `source`.
pub fn plan_partitions<S: Read + Seek>(
  source: &mut S,
  len: u64,
  workers: usize,
) -> io::Result<Vec<Range<u64>>> {
  let workers = workers.max(1) as u64;
  let mut ranges = Vec::with_capacity(workers as usize);
  let mut start = 0;

  for i in 1..=workers {
    let end = if i == workers {
      len
    } else {
      let nominal = len * i / workers;
      align_to_line(source, nominal.max(start), len)?
    };
    if end > start {
      ranges.push(start..end);
      start = end;
    }
  }

  Ok(ranges)
}

// First offset >= `offset` that begins a line.
fn align_to_line<S: Read + Seek>(source: &mut S, offset: u64, len: u64) -> io::Result<u64> {
  if offset == 0 || offset >= len {
    return Ok(offset.min(len));
  }

  let mut cursor = offset - 1;
  source.seek(SeekFrom::Start(cursor))?;
  let mut buffer = [0u8; ALIGN_BUFFER];
  loop {
    let n = match source.read(&mut buffer) {
      Ok(0) => return Ok(len),
      Ok(n) => n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    };
    if let Some(i) = buffer[..n].iter().position(|&b| b == b'\n') {
      return Ok((cursor + i as u64 + 1).min(len));
    }
    cursor += n as u64;
  }
}

/// Aggregates one byte range of the file at `path`, giving up before the next
/// chunk once `cancel` is set.
pub fn aggregate_range(
  path: &Path,
  range: Range<u64>,
  config: &EngineConfig,
  cancel: &AtomicBool,
) -> Result<Aggregation, EngineError> {
  let mut file = File::open(path)?;
  file.seek(SeekFrom::Start(range.start))?;
  aggregate_cancellable(file.take(range.end - range.start), range.start, config, cancel)
}

/// Aggregates `path` across `config.effective_workers()` partitions.
///
/// When a worker fails, every worker scanning a later range is cancelled;
/// workers on earlier ranges keep going, since they may hold an earlier
/// failure. The error returned is the one from the lowest range, which is the
/// error a single-threaded [`run`](crate::engine::run) would report.
///
/// # Errors
///
/// Returns the first error in input order, or [`EngineError::Worker`] if a
/// worker task panicked.
pub async fn aggregate_partitioned(
  path: impl AsRef<Path>,
  config: &EngineConfig,
) -> Result<Aggregation, EngineError> {
  let path: PathBuf = path.as_ref().to_path_buf();
  let workers = config.effective_workers();

  let plan_path = path.clone();
  let ranges = tokio::task::spawn_blocking(move || -> io::Result<Vec<Range<u64>>> {
    let mut file = File::open(&plan_path)?;
    let len = file.metadata()?.len();
    plan_partitions(&mut file, len, workers)
  })
  .await
  .map_err(|e| EngineError::Worker(e.to_string()))??;

  debug!(workers, partitions = ranges.len(), "planned partitions");

  let cancels: Vec<Arc<AtomicBool>> = ranges
    .iter()
    .map(|_| Arc::new(AtomicBool::new(false)))
    .collect();
  let mut tasks = JoinSet::new();
  for (index, range) in ranges.into_iter().enumerate() {
    let path = path.clone();
    let config = config.clone();
    let cancel = Arc::clone(&cancels[index]);
    tasks.spawn_blocking(move || (index, aggregate_range(&path, range, &config, &cancel)));
  }

  let mut total = Aggregation::default();
  let mut failed: Option<(usize, EngineError)> = None;
  while let Some(joined) = tasks.join_next().await {
    let (index, result) = match joined {
      Ok(outcome) => outcome,
      Err(e) => {
        cancel_from(&cancels, 0);
        return Err(EngineError::Worker(e.to_string()));
      }
    };
    match result {
      Ok(partial) => total.merge(partial),
      Err(EngineError::Cancelled) => {}
      Err(error) => {
        if failed.as_ref().is_none_or(|(earliest, _)| index < *earliest) {
          warn!(partition = index, error = %error, "partition failed, cancelling later partitions");
          cancel_from(&cancels, index + 1);
          failed = Some((index, error));
        }
      }
    }
  }

  if let Some((_, error)) = failed {
    return Err(error);
  }

  info!(
    records = total.report.records,
    skipped = total.report.skipped,
    keys = total.map.len(),
    "partitions merged"
  );
  Ok(total)
}

fn cancel_from(cancels: &[Arc<AtomicBool>], first: usize) {
  for cancel in cancels.iter().skip(first) {
    cancel.store(true, Ordering::Relaxed);
  }
}

/// Aggregates `path` across partitions and renders the summary line.
pub async fn run_partitioned(
  path: impl AsRef<Path>,
  config: &EngineConfig,
) -> Result<String, EngineError> {
  aggregate_partitioned(path, config)
    .await
    .map(|aggregation| aggregation.summary())
}

/// Runs `path` from async code.
///
/// One worker runs the single-threaded pipeline on a blocking task; any other
/// worker count goes through [`run_partitioned`].
pub async fn run_file_async(
  path: impl AsRef<Path>,
  config: &EngineConfig,
) -> Result<String, EngineError> {
  if config.workers != 1 {
    return run_partitioned(path, config).await;
  }
  let path = path.as_ref().to_path_buf();
  let config = config.clone();
  tokio::task::spawn_blocking(move || run_file(&path, &config))
    .await
    .map_err(|e| EngineError::Worker(e.to_string()))?
}

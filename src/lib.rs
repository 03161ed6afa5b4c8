//! # StationWeave
//!
//! Single-pass min/mean/max aggregation over very large `key;value`
//! measurement files.
//!
//! The input is read in fixed-size raw chunks, scanned byte-wise into
//! `(key, value)` records that may straddle chunk boundaries, parsed with a
//! narrow fixed-point grammar and folded into one running-statistics entry per
//! key. At end of input the keys are sorted and rendered as
//! `{k1=min/mean/max, k2=min/mean/max, ...}`.
//!
//! ## Key Features
//!
//! - **Chunked reads**: one reusable buffer, no per-line `String`
//! - **Boundary-safe tokenizer**: tokens split across chunks are stitched
//!   together in a scratch buffer, whole tokens are borrowed in place
//! - **Exact arithmetic**: values are tenths in integers, sums never drift
//! - **Partitioned runs**: one private pipeline per byte range, merged at the end
//!
//! ## Quick Start
//!
//! ```rust
//! use stationweave::{EngineConfig, run};
//!
//! let summary = run("Oslo;3.3".as_bytes(), &EngineConfig::default())?;
//! assert_eq!(summary, "{Oslo=3.3/3.3/3.3}");
//! # Ok::<(), stationweave::EngineError>(())
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Per-key statistics map.
pub mod aggregation;
/// Fixed-size chunked reads.
pub mod chunk_reader;
/// Run configuration.
pub mod config;
/// Single-threaded pipeline entry points.
pub mod engine;
/// Error types and error strategy.
pub mod error;
/// Summary rendering.
pub mod format;
/// Partitioned parallel runs.
pub mod partition;
/// Running statistics for one key.
pub mod stats;
/// Line and field scanner.
pub mod tokenizer;
/// Value grammar and fixed-point measurements.
pub mod value;

pub use aggregation::AggregationMap;
pub use config::EngineConfig;
pub use engine::{Aggregation, ScanReport, aggregate, run, run_file};
pub use error::{EngineError, ErrorStrategy, ParseError, ParseErrorKind};
pub use partition::{run_file_async, run_partitioned};
pub use stats::RunningStats;
pub use value::Measurement;

#[cfg(test)]
mod aggregation_test;
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod format_test;
#[cfg(test)]
mod partition_test;

//! # Tokenizer
//!
//! Turns a stream of chunks into `(key, value)` records, one per line.
//!
//! ## State machine
//!
//! - **Key** (initial): bytes belong to the key until `;`.
//! - **Value**: bytes belong to the value until `\n`. A `\r` right before the
//!   `\n` is dropped.
//!
//! ## Chunk boundaries
//!
//! A token that lies entirely inside the current chunk is handed to the sink as
//! a slice of the chunk. Only a token cut by the end of a chunk is copied, into
//! a scratch buffer that is cleared (never freed) after each record, and the
//! next chunk's bytes are appended to it. Extra memory is therefore bounded by
//! one line, whatever the chunk size.
//!
//! ## End of input
//!
//! [`Tokenizer::finish`] emits a final record for a last line without
//! terminator. A trailing key with no `;` is discarded.

use crate::error::{EngineError, ParseError, ParseErrorKind};
use std::ops::Range;
use tracing::debug;

const DELIMITER: u8 = b';';
const NEWLINE: u8 = b'\n';

/// Receives records as the tokenizer completes them.
pub trait RecordSink {
  /// Called once per complete `key;value` line.
  ///
  /// `offset` is the absolute byte offset of the start of the line.
  fn record(&mut self, key: &[u8], value: &[u8], offset: u64) -> Result<(), EngineError>;

  /// Called for a non-blank line that has no `;`.
  fn malformed(&mut self, error: ParseError) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
  Key,
  Value,
}

/// Incremental `key;value` line scanner.
#[derive(Debug)]
pub struct Tokenizer {
  state: ScanState,
  key: Vec<u8>,
  value: Vec<u8>,
  /// Absolute offset of the first byte of the next chunk.
  position: u64,
  /// Absolute offset of the line being scanned.
  line_start: u64,
}

impl Default for Tokenizer {
  fn default() -> Self {
    Self::new()
  }
}

impl Tokenizer {
  /// Creates a tokenizer for a stream starting at byte 0.
  pub fn new() -> Self {
    Self::with_base_offset(0)
  }

  /// Creates a tokenizer for a stream that starts at `offset` in a larger
  /// input, so reported offsets stay absolute.
  pub fn with_base_offset(offset: u64) -> Self {
    Self {
      state: ScanState::Key,
      key: Vec::with_capacity(128),
      value: Vec::with_capacity(16),
      position: offset,
      line_start: offset,
    }
  }

  /// Scans one chunk, handing every completed line to `sink`.
  ///
  /// # Errors
  ///
  /// Stops at and returns the first error raised by the sink.
  pub fn feed<S>(&mut self, chunk: &[u8], sink: &mut S) -> Result<(), EngineError>
  where
    S: RecordSink + ?Sized,
  {
    let mut pos = 0;
    // Key bytes borrowed from this chunk while the value is being scanned.
    let mut key_span: Option<Range<usize>> = None;

    while pos < chunk.len() {
      let rest = &chunk[pos..];
      match self.state {
        ScanState::Key => match rest.iter().position(|&b| b == DELIMITER || b == NEWLINE) {
          Some(i) if rest[i] == DELIMITER => {
            if self.key.is_empty() {
              key_span = Some(pos..pos + i);
            } else {
              self.key.extend_from_slice(&rest[..i]);
            }
            self.state = ScanState::Value;
            pos += i + 1;
          }
          Some(i) => {
            self.key.extend_from_slice(&rest[..i]);
            let line = trim_cr(&self.key);
            if !line.is_empty() {
              sink.malformed(ParseError::new(
                ParseErrorKind::MissingDelimiter,
                self.line_start,
                line,
              ))?;
            }
            self.key.clear();
            pos += i + 1;
            self.line_start = self.position + pos as u64;
          }
          None => {
            self.key.extend_from_slice(rest);
            pos = chunk.len();
          }
        },
        ScanState::Value => match rest.iter().position(|&b| b == NEWLINE) {
          Some(i) => {
            let pending = !self.value.is_empty();
            if pending {
              self.value.extend_from_slice(&rest[..i]);
            }
            let key = match &key_span {
              Some(span) => &chunk[span.clone()],
              None => self.key.as_slice(),
            };
            let value = if pending {
              self.value.as_slice()
            } else {
              &rest[..i]
            };
            sink.record(key, trim_cr(value), self.line_start)?;

            key_span = None;
            self.key.clear();
            self.value.clear();
            self.state = ScanState::Key;
            pos += i + 1;
            self.line_start = self.position + pos as u64;
          }
          None => {
            self.value.extend_from_slice(rest);
            pos = chunk.len();
          }
        },
      }
    }

    if let Some(span) = key_span {
      self.key.extend_from_slice(&chunk[span]);
    }
    self.position += chunk.len() as u64;
    Ok(())
  }

  /// Flushes the last line at end of input.
  ///
  /// A pending `key;value` without terminator becomes a final record (an
  /// empty value is still handed over and rejected by the sink). A pending key
  /// with no `;` is dropped. The tokenizer is reset afterwards.
  pub fn finish<S>(&mut self, sink: &mut S) -> Result<(), EngineError>
  where
    S: RecordSink + ?Sized,
  {
    let result = match self.state {
      ScanState::Value => sink.record(&self.key, trim_cr(&self.value), self.line_start),
      ScanState::Key => {
        if !trim_cr(&self.key).is_empty() {
          debug!(
            offset = self.line_start,
            len = self.key.len(),
            "discarding trailing key without value"
          );
        }
        Ok(())
      }
    };
    self.key.clear();
    self.value.clear();
    self.state = ScanState::Key;
    self.line_start = self.position;
    result
  }

  /// Total bytes fed so far, including the base offset.
  pub fn position(&self) -> u64 {
    self.position
  }

  /// Bytes currently held for an unfinished line.
  pub fn pending_len(&self) -> usize {
    self.key.len() + self.value.len()
  }
}

#[inline]
fn trim_cr(token: &[u8]) -> &[u8] {
  match token {
    [rest @ .., b'\r'] => rest,
    _ => token,
  }
}

//! # Chunk Reader
//!
//! Pulls fixed-size raw byte blocks from any [`Read`] source. Chunk boundaries
//! carry no meaning: a chunk may end in the middle of a key, a value or a
//! `\r\n` pair. The [`Tokenizer`](crate::tokenizer::Tokenizer) deals with that.
//!
//! One buffer is allocated up front and reused for every read.

use std::io::{self, ErrorKind, Read};
use tracing::trace;

/// Default chunk size: 12 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 12 * 1024 * 1024;

/// Sequential fixed-size reader over a byte source.
#[derive(Debug)]
pub struct ChunkReader<R> {
  source: R,
  buffer: Vec<u8>,
  bytes_read: u64,
  chunks: u64,
}

impl<R: Read> ChunkReader<R> {
  /// Creates a reader with the default 12 MiB chunk size.
  pub fn new(source: R) -> Self {
    Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
  }

  /// Creates a reader with a custom chunk size. Zero is clamped to one byte.
  pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
    Self {
      source,
      buffer: vec![0; chunk_size.max(1)],
      bytes_read: 0,
      chunks: 0,
    }
  }

  /// Reads the next chunk.
  ///
  /// Returns `Ok(None)` at end of input. The final chunk may be shorter than
  /// the chunk size. Interrupted reads are retried; any other I/O failure is
  /// returned as is.
  pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
    loop {
      match self.source.read(&mut self.buffer) {
        Ok(0) => return Ok(None),
        Ok(n) => {
          self.bytes_read += n as u64;
          self.chunks += 1;
          trace!(chunk = self.chunks, len = n, "read chunk");
          return Ok(Some(&self.buffer[..n]));
        }
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => return Err(e),
      }
    }
  }

  /// Configured chunk size in bytes.
  pub fn chunk_size(&self) -> usize {
    self.buffer.len()
  }

  /// Total bytes read so far.
  pub fn bytes_read(&self) -> u64 {
    self.bytes_read
  }

  /// Number of non-empty chunks read so far.
  pub fn chunks_read(&self) -> u64 {
    self.chunks
  }
}

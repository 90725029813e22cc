//! Streaming decoder over a [`Read`] source.

use crate::config::StreamConfig;
use crate::decoder::{SymbolStream, decoded_length};
use crate::encoder::{QUANTUM_BYTES, QUANTUM_SYMBOLS};
use crate::error::StickyError;
use std::io::{self, Read};
use tracing::{debug, trace, warn};

/// A decoding reader that wraps an inner reader.
///
/// Symbols are pulled from the inner reader in chunks sized to the caller's
/// buffer (capped by [`StreamConfig::decode_chunk`]), decoded, and handed
/// out. Decoded bytes that do not fit the caller's buffer are kept and served
/// by the next `read` without touching the inner reader.
///
/// Read failures and corrupt input are reported only after every byte
/// decoded before them has been returned. Corrupt input surfaces as
/// [`io::ErrorKind::InvalidData`]; the symbol offset within the whole stream
/// can be recovered with [`Error::corrupt_offset_of`](crate::Error::corrupt_offset_of).
///
/// # Example
///
/// ```rust
/// use clockwork_base32::ClockworkReader;
/// use std::io::Read;
///
/// let mut reader = ClockworkReader::new(&b"91JPRV3F5GG7EVVJDHJ22"[..]);
/// let mut decoded = String::new();
/// reader.read_to_string(&mut decoded).unwrap();
/// assert_eq!(decoded, "Hello, world!");
/// ```
#[derive(Debug)]
pub struct ClockworkReader<R: Read> {
    inner: R,
    chunk_limit: usize,
    stream: SymbolStream,
    /// Symbols read from the inner reader but not decoded yet.
    pending: Vec<u8>,
    /// Decoded bytes not yet returned, starting at `out_pos`.
    out: Vec<u8>,
    out_pos: usize,
    eof: bool,
    /// Failure waiting for `out` to drain.
    deferred: Option<io::Error>,
    /// Failure already reported.
    failed: Option<StickyError>,
}

impl<R: Read> ClockworkReader<R> {
    /// Create a new decoding reader with the default chunk limit.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, StreamConfig::DEFAULT)
    }

    /// Create a new decoding reader with a custom configuration.
    pub fn with_config(reader: R, config: StreamConfig) -> Self {
        let chunk_limit = config.decode_chunk_len();
        Self {
            inner: reader,
            chunk_limit,
            stream: SymbolStream::default(),
            pending: Vec::with_capacity(chunk_limit),
            out: Vec::new(),
            out_pos: 0,
            eof: false,
            deferred: None,
            failed: None,
        }
    }

    /// Get a reference to the inner reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the inner reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the reader and return the inner reader.
    ///
    /// Symbols already pulled from it and decoded bytes not yet returned are
    /// lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pull symbols until at least one whole group is pending, the source
    /// ends, or the source fails.
    fn fill(&mut self, wanted: usize) {
        let target = (wanted.div_ceil(QUANTUM_BYTES) * QUANTUM_SYMBOLS)
            .clamp(QUANTUM_SYMBOLS, self.chunk_limit)
            .max(self.pending.len());

        while self.pending.len() < QUANTUM_SYMBOLS && !self.eof && self.deferred.is_none() {
            let start = self.pending.len();
            self.pending.resize(target, 0);
            match self.inner.read(&mut self.pending[start..]) {
                Ok(0) => {
                    self.pending.truncate(start);
                    self.eof = true;
                    debug!(
                        symbols = self.stream.offset() + start as u64,
                        "clockwork reader reached end of input"
                    );
                }
                Ok(n) => {
                    self.pending.truncate(start + n);
                    trace!(
                        n,
                        pending = self.pending.len(),
                        "clockwork reader pulled symbols"
                    );
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    self.pending.truncate(start);
                }
                Err(err) => {
                    self.pending.truncate(start);
                    self.defer(err);
                }
            }
        }
    }

    fn defer(&mut self, err: io::Error) {
        warn!(error = %err, "clockwork reader failed");
        self.deferred = Some(err);
    }

    /// Decode pending symbols, into `buf` when they fit and into `out`
    /// otherwise. Returns the number of bytes placed in `buf`.
    fn decode_pending(&mut self, buf: &mut [u8]) -> usize {
        let at_eof = self.eof;
        let was_padded = self.stream.is_padded();
        let capacity = decoded_length(self.pending.len());
        let direct = capacity <= buf.len();

        let outcome = if direct {
            self.stream.decode_chunk(&self.pending, buf, at_eof)
        } else {
            self.out.resize(capacity, 0);
            self.stream
                .decode_chunk(&self.pending, &mut self.out, at_eof)
        };

        self.pending.drain(..outcome.consumed);
        if let Some(err) = outcome.error {
            self.pending.clear();
            self.defer(err.into());
        }
        if !was_padded && self.stream.is_padded() {
            debug!(
                offset = self.stream.offset(),
                "clockwork reader reached padding"
            );
        }

        if direct {
            return outcome.written;
        }

        self.out.truncate(outcome.written);
        let n = outcome.written.min(buf.len());
        buf[..n].copy_from_slice(&self.out[..n]);
        self.out_pos = n;
        n
    }
}

impl<R: Read> Read for ClockworkReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.out_pos < self.out.len() {
                let n = (self.out.len() - self.out_pos).min(buf.len());
                buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }

            if let Some(sticky) = &self.failed {
                return Err(sticky.to_io_error());
            }
            if let Some(err) = self.deferred.take() {
                self.failed = Some(StickyError::record(&err));
                return Err(err);
            }
            if self.eof && self.pending.is_empty() {
                return Ok(0);
            }

            self.fill(buf.len());
            let n = self.decode_pending(buf);
            if n > 0 {
                return Ok(n);
            }
        }
    }
}

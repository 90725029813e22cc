//! Streaming encoder over a [`Write`] sink.

use crate::config::StreamConfig;
use crate::encoder::{QUANTUM_BYTES, QUANTUM_SYMBOLS, encode_to_slice};
use crate::error::StickyError;
use std::io::{self, Write};
use tracing::{debug, warn};

/// An encoding writer that wraps an inner writer.
///
/// Bytes written to this writer are encoded as Clockwork Base32 and passed
/// to the inner writer in whole 8-symbol groups. Up to four bytes that do not
/// yet form a quantum are held back until more data arrives or
/// [`finish`](Self::finish) is called.
///
/// Dropping the writer without calling `finish` loses the encoding of those
/// held-back bytes.
///
/// If the inner writer fails, the failure is returned as is and recorded.
/// Every later `write`, `flush` or `finish` reports the same failure again
/// without touching the inner writer. A `write` that already passed some of
/// its input to the inner writer returns that count instead, and the failure
/// is reported by the next call.
///
/// # Example
///
/// ```rust
/// use clockwork_base32::ClockworkWriter;
/// use std::io::Write;
///
/// let mut writer = ClockworkWriter::new(Vec::new());
/// writer.write_all(b"foo\x00bar").unwrap();
/// writer.finish().unwrap();
/// assert_eq!(writer.into_inner(), b"CSQPY032C5S0");
/// ```
#[derive(Debug)]
pub struct ClockworkWriter<W: Write> {
    inner: W,
    /// Raw bytes that do not form a full quantum yet.
    pending: [u8; QUANTUM_BYTES],
    pending_len: usize,
    /// Symbol scratch buffer, a whole number of groups long.
    out: Vec<u8>,
    finished: bool,
    error: Option<StickyError>,
}

impl<W: Write> ClockworkWriter<W> {
    /// Create a new encoding writer with the default buffer size.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, StreamConfig::DEFAULT)
    }

    /// Create a new encoding writer with a custom configuration.
    pub fn with_config(writer: W, config: StreamConfig) -> Self {
        Self {
            inner: writer,
            pending: [0; QUANTUM_BYTES],
            pending_len: 0,
            out: vec![0; config.encode_buffer_len()],
            finished: false,
            error: None,
        }
    }

    /// Encode the final partial quantum, if any, and flush the inner writer.
    ///
    /// Calling `finish` again after it succeeded does nothing. Writing after
    /// `finish` fails.
    pub fn finish(&mut self) -> io::Result<()> {
        self.check()?;
        if self.finished {
            return Ok(());
        }

        let tail = self.pending_len;
        if tail > 0 {
            let len = encode_to_slice(&self.pending[..tail], &mut self.out);
            self.forward(len)?;
            self.pending_len = 0;
        }
        self.flush_inner()?;

        self.finished = true;
        debug!(tail, "clockwork writer finished");
        Ok(())
    }

    /// Whether [`finish`](Self::finish) has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the inner writer.
    ///
    /// Writing to it directly interleaves raw bytes with the encoded output.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the inner writer.
    ///
    /// Bytes still held back are discarded; call [`finish`](Self::finish)
    /// first.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn check(&self) -> io::Result<()> {
        match &self.error {
            Some(sticky) => Err(sticky.to_io_error()),
            None => Ok(()),
        }
    }

    fn record(&mut self, err: &io::Error) {
        warn!(error = %err, "clockwork writer sink failed");
        self.error = Some(StickyError::record(err));
    }

    /// Write the first `len` symbols of the scratch buffer to the sink.
    fn forward(&mut self, len: usize) -> io::Result<()> {
        if let Err(err) = self.inner.write_all(&self.out[..len]) {
            self.record(&err);
            return Err(err);
        }
        Ok(())
    }

    fn flush_inner(&mut self) -> io::Result<()> {
        if let Err(err) = self.inner.flush() {
            self.record(&err);
            return Err(err);
        }
        Ok(())
    }
}

impl<W: Write> Write for ClockworkWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        if self.finished {
            return Err(io::Error::other("write to a finished clockwork writer"));
        }

        let mut input = buf;

        // Complete the quantum left over from the previous call
        if self.pending_len > 0 {
            let take = (QUANTUM_BYTES - self.pending_len).min(input.len());
            let mut block = self.pending;
            block[self.pending_len..self.pending_len + take].copy_from_slice(&input[..take]);

            if self.pending_len + take < QUANTUM_BYTES {
                self.pending = block;
                self.pending_len += take;
                return Ok(buf.len());
            }

            encode_to_slice(&block, &mut self.out);
            self.forward(QUANTUM_SYMBOLS)?;
            self.pending_len = 0;
            input = &input[take..];
        }

        // Whole quanta, one scratch buffer at a time
        let batch = self.out.len() / QUANTUM_SYMBOLS * QUANTUM_BYTES;
        while input.len() >= QUANTUM_BYTES {
            let n = (input.len() - input.len() % QUANTUM_BYTES).min(batch);
            let len = encode_to_slice(&input[..n], &mut self.out);
            if let Err(err) = self.forward(len) {
                // Report what reached the sink, the recorded failure comes next call
                let consumed = buf.len() - input.len();
                if consumed == 0 {
                    return Err(err);
                }
                return Ok(consumed);
            }
            input = &input[n..];
        }

        self.pending[..input.len()].copy_from_slice(input);
        self.pending_len = input.len();
        Ok(buf.len())
    }

    /// Flush the inner writer.
    ///
    /// Held-back bytes stay pending: emitting them would end the message.
    fn flush(&mut self) -> io::Result<()> {
        self.check()?;
        self.flush_inner()
    }
}

//! Async I/O support for Clockwork Base32.
//!
//! These functions drive the codec between a Tokio [`AsyncRead`] and
//! [`AsyncWrite`] pair. They follow the same rules as
//! [`ClockworkWriter`](crate::ClockworkWriter) and
//! [`ClockworkReader`](crate::ClockworkReader): partial quanta are held back
//! until end of input, padding is accepted as a trailing run, and corrupt
//! input is reported with its offset in the whole stream.
//!
//! # Example
//!
//! ```rust,ignore
//! use clockwork_base32::async_io::encode_async;
//!
//! let mut input: &[u8] = b"Hello, world!";
//! let mut output = Vec::new();
//! let written = encode_async(&mut input, &mut output).await?;
//! assert_eq!(output, b"91JPRV3F5GG7EVVJDHJ22");
//! ```
//!
//! # Feature Flag
//!
//! This module is only available when the `async-io` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! clockwork-base32 = { version = "0.1.0", features = ["async-io"] }
//! ```

use crate::decoder::{SymbolStream, decoded_length};
use crate::encoder::{QUANTUM_BYTES, QUANTUM_SYMBOLS, encode_to_slice, encoded_length};
use crate::error::Result;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Default buffer size for async operations (32KB).
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Encode everything from `input` into `output`.
///
/// Returns the number of symbols written. The output is flushed at the end.
pub async fn encode_async<R, W>(input: &mut R, output: &mut W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    encode_async_with_buffer(input, output, DEFAULT_BUFFER_SIZE).await
}

/// Encode with a custom read buffer size (in raw bytes).
pub async fn encode_async_with_buffer<R, W>(
    input: &mut R,
    output: &mut W,
    buffer_size: usize,
) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let buffer_size = buffer_size.max(QUANTUM_BYTES);
    // Room for a carried partial quantum in front of each read
    let mut raw = vec![0u8; QUANTUM_BYTES + buffer_size];
    let mut symbols = vec![0u8; encoded_length(raw.len())];
    let mut carry = 0;
    let mut total = 0;

    loop {
        let n = input.read(&mut raw[carry..carry + buffer_size]).await?;
        if n == 0 {
            break;
        }

        let available = carry + n;
        let whole = available - available % QUANTUM_BYTES;
        if whole > 0 {
            let len = encode_to_slice(&raw[..whole], &mut symbols);
            output.write_all(&symbols[..len]).await?;
            total += len;
        }

        raw.copy_within(whole..available, 0);
        carry = available - whole;
    }

    if carry > 0 {
        let len = encode_to_slice(&raw[..carry], &mut symbols);
        output.write_all(&symbols[..len]).await?;
        total += len;
    }
    output.flush().await?;

    debug!(symbols = total, "clockwork async encode finished");
    Ok(total)
}

/// Decode everything from `input` into `output`.
///
/// Returns the number of bytes written. Bytes decoded before a failure are
/// written out before the failure is returned.
pub async fn decode_async<R, W>(input: &mut R, output: &mut W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    decode_async_with_buffer(input, output, DEFAULT_BUFFER_SIZE).await
}

/// Decode with a custom read buffer size (in symbols).
pub async fn decode_async_with_buffer<R, W>(
    input: &mut R,
    output: &mut W,
    buffer_size: usize,
) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let buffer_size = buffer_size.max(QUANTUM_SYMBOLS);
    // Less than one group is ever carried between reads
    let mut symbols = vec![0u8; QUANTUM_SYMBOLS + buffer_size];
    let mut bytes = vec![0u8; decoded_length(symbols.len())];
    let mut stream = SymbolStream::default();
    let mut pending = 0;
    let mut total = 0;

    loop {
        let n = input
            .read(&mut symbols[pending..pending + buffer_size])
            .await?;
        let at_eof = n == 0;
        let available = pending + n;

        let outcome = stream.decode_chunk(&symbols[..available], &mut bytes, at_eof);
        if outcome.written > 0 {
            output.write_all(&bytes[..outcome.written]).await?;
            total += outcome.written;
        }
        if let Some(err) = outcome.error {
            output.flush().await?;
            return Err(err);
        }

        symbols.copy_within(outcome.consumed..available, 0);
        pending = available - outcome.consumed;
        if at_eof {
            break;
        }
    }
    output.flush().await?;

    debug!(
        symbols = stream.offset(),
        bytes = total,
        "clockwork async decode finished"
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_async_encode() {
        let mut input = Cursor::new(b"Hello, world!".to_vec());
        let mut output = Vec::new();
        let written = encode_async(&mut input, &mut output).await.unwrap();
        assert_eq!(written, 21);
        assert_eq!(output, b"91JPRV3F5GG7EVVJDHJ22");
    }

    #[tokio::test]
    async fn test_async_small_buffers() {
        let data: Vec<u8> = (0..=255).cycle().take(1001).collect();

        for buffer_size in [1, 5, 7, 8, 13, 64] {
            let mut input = Cursor::new(data.clone());
            let mut encoded = Vec::new();
            encode_async_with_buffer(&mut input, &mut encoded, buffer_size)
                .await
                .unwrap();
            assert_eq!(encoded, encode(&data), "buffer {buffer_size}");

            let mut input = Cursor::new(encoded);
            let mut decoded = Vec::new();
            let written = decode_async_with_buffer(&mut input, &mut decoded, buffer_size)
                .await
                .unwrap();
            assert_eq!(written, data.len());
            assert_eq!(decoded, data, "buffer {buffer_size}");
        }
    }

    #[tokio::test]
    async fn test_async_decode_corrupt() {
        let mut input = Cursor::new(b"CSQPYRK1CSQPYRK*".to_vec());
        let mut output = Vec::new();
        let err = decode_async_with_buffer(&mut input, &mut output, 8)
            .await
            .unwrap_err();
        assert_eq!(err.offset(), Some(15));
        assert_eq!(output, b"fooba");
    }

    #[tokio::test]
    async fn test_async_decode_padding() {
        let mut input = Cursor::new(b"csqpyrg=".to_vec());
        let mut output = Vec::new();
        decode_async(&mut input, &mut output).await.unwrap();
        assert_eq!(output, b"foob");
    }
}

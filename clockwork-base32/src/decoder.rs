//! Clockwork Base32 decoding.
//!
//! Symbols are consumed in groups of up to eight. A group of `j` symbols
//! yields `floor(5 * j / 8)` bytes, so the final group may carry a trailing
//! symbol whose bits are all discarded (`"CR0"` decodes like `"CR"`). A lone
//! trailing symbol carries less than a byte and is rejected as truncated.
//!
//! Padding (`=`) is optional. The first padding symbol ends the data and may
//! only be followed by more padding.

use crate::alphabet::{DECODE_TABLE, INVALID, PADDING};
use crate::encoder::QUANTUM_SYMBOLS;
use crate::error::{Error, Result};

/// Upper bound on the number of bytes decoded from `n` symbols.
///
/// Exact for unpadded input that decodes successfully.
///
/// ```rust
/// use clockwork_base32::decoded_length;
///
/// assert_eq!(decoded_length(2), 1);
/// assert_eq!(decoded_length(8), 5);
/// assert_eq!(decoded_length(10), 6);
/// ```
pub const fn decoded_length(n: usize) -> usize {
    n * 5 / 8
}

/// Position of the first padding symbol, or `input.len()`.
pub(crate) fn padding_start(input: &[u8]) -> usize {
    input
        .iter()
        .position(|&b| b == PADDING)
        .unwrap_or(input.len())
}

/// Check that `input[start..]` is nothing but padding.
pub(crate) fn check_padding(input: &[u8], start: usize) -> Result<()> {
    if input[start..].iter().all(|&b| b == PADDING) {
        Ok(())
    } else {
        Err(Error::corrupt_input(start as u64))
    }
}

/// Failure inside [`decode_groups`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Corrupt {
    /// Bytes written by the groups before the failing one.
    written: usize,
    /// Offset of the offending symbol, relative to the input slice.
    offset: usize,
}

/// Decode symbol groups from `input` into `output`.
///
/// `output` must hold at least `decoded_length(input.len())` bytes.
fn decode_groups(input: &[u8], output: &mut [u8]) -> std::result::Result<usize, Corrupt> {
    debug_assert!(output.len() >= decoded_length(input.len()));

    let mut written = 0;
    for (index, group) in input.chunks(QUANTUM_SYMBOLS).enumerate() {
        let base = index * QUANTUM_SYMBOLS;

        let mut bits = 0u64;
        for (i, &symbol) in group.iter().enumerate() {
            let value = DECODE_TABLE[symbol as usize];
            if value == INVALID {
                return Err(Corrupt {
                    written,
                    offset: base + i,
                });
            }
            bits |= u64::from(value) << (35 - 5 * i);
        }

        let n = decoded_length(group.len());
        if n == 0 {
            // A single symbol holds 5 bits, not enough for a byte
            return Err(Corrupt {
                written,
                offset: base,
            });
        }

        let frame = (bits << 24).to_be_bytes();
        output[written..written + n].copy_from_slice(&frame[..n]);
        written += n;
    }

    Ok(written)
}

/// Decode `input` into the front of `output`, returning the number of bytes
/// written.
///
/// # Panics
///
/// Panics if `output` is shorter than `decoded_length(input.len())`.
pub fn decode_to_slice(input: &[u8], output: &mut [u8]) -> Result<usize> {
    assert!(
        output.len() >= decoded_length(input.len()),
        "output buffer too small: need {} bytes, have {}",
        decoded_length(input.len()),
        output.len()
    );

    let end = padding_start(input);
    let written = decode_groups(&input[..end], output)
        .map_err(|corrupt| Error::corrupt_input(corrupt.offset as u64))?;
    check_padding(input, end)?;
    Ok(written)
}

/// Decode Clockwork Base32 symbols into raw bytes.
///
/// Decoding is case-insensitive, treats `O` as `0` and `I`/`L` as `1`, and
/// accepts optional trailing `=` padding.
///
/// ```rust
/// assert_eq!(clockwork_base32::decode("csqpyrkle8").unwrap(), b"foobar");
///
/// let err = clockwork_base32::decode("CSQG*").unwrap_err();
/// assert_eq!(err.offset(), Some(4));
/// ```
pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>> {
    let input = input.as_ref();
    let mut output = vec![0u8; decoded_length(input.len())];
    let written = decode_to_slice(input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Result of feeding one chunk to a [`SymbolStream`].
#[derive(Debug)]
pub(crate) struct ChunkOutcome {
    /// Symbols consumed from the front of the chunk.
    pub(crate) consumed: usize,
    /// Bytes written to the output.
    pub(crate) written: usize,
    /// Failure found after `written` bytes. The stream is unusable afterwards.
    pub(crate) error: Option<Error>,
}

/// Incremental decoding state for a symbol stream that arrives in chunks.
///
/// Tracks the absolute offset of the next symbol so corrupt input is
/// reported relative to the whole stream, and remembers where padding began.
#[derive(Debug, Default)]
pub(crate) struct SymbolStream {
    offset: u64,
    padding_at: Option<u64>,
}

impl SymbolStream {
    /// Absolute offset of the next symbol to be consumed.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether padding has been seen, i.e. the data part is complete.
    pub(crate) fn is_padded(&self) -> bool {
        self.padding_at.is_some()
    }

    /// Decode the decodable prefix of `input` into `output`.
    ///
    /// Whole groups are always decoded. The trailing partial group is decoded
    /// only at end of stream or when padding follows it; otherwise it is left
    /// unconsumed for the next chunk. `output` must hold at least
    /// `decoded_length(input.len())` bytes.
    pub(crate) fn decode_chunk(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        at_eof: bool,
    ) -> ChunkOutcome {
        if let Some(padding_at) = self.padding_at {
            self.offset += input.len() as u64;
            let error = input
                .iter()
                .any(|&b| b != PADDING)
                .then(|| Error::corrupt_input(padding_at));
            return ChunkOutcome {
                consumed: input.len(),
                written: 0,
                error,
            };
        }

        let end = padding_start(input);
        let padded = end < input.len();
        let take = if padded || at_eof {
            end
        } else {
            end - end % QUANTUM_SYMBOLS
        };

        let mut outcome = match decode_groups(&input[..take], output) {
            Ok(written) => ChunkOutcome {
                consumed: take,
                written,
                error: None,
            },
            Err(corrupt) => ChunkOutcome {
                consumed: take,
                written: corrupt.written,
                error: Some(Error::corrupt_input(self.offset + corrupt.offset as u64)),
            },
        };

        if padded && outcome.error.is_none() {
            let padding_at = self.offset + end as u64;
            self.padding_at = Some(padding_at);
            outcome.consumed = input.len();
            if check_padding(input, end).is_err() {
                outcome.error = Some(Error::corrupt_input(padding_at));
            }
        }

        self.offset += outcome.consumed as u64;
        outcome
    }
}

//! Clockwork Base32 encoding.
//!
//! Every 5 raw bytes form a 40-bit big-endian quantum that is split into
//! eight 5-bit fields, most significant first. A trailing partial quantum of
//! `k` bytes is zero-filled on the right and only `encoded_length(k)` symbols
//! are emitted.

use crate::alphabet::ALPHABET;

/// Raw bytes per quantum.
pub(crate) const QUANTUM_BYTES: usize = 5;

/// Symbols per quantum.
pub(crate) const QUANTUM_SYMBOLS: usize = 8;

/// Number of symbols produced for `n` raw bytes.
///
/// ```rust
/// use clockwork_base32::encoded_length;
///
/// assert_eq!(encoded_length(0), 0);
/// assert_eq!(encoded_length(1), 2);
/// assert_eq!(encoded_length(5), 8);
/// assert_eq!(encoded_length(6), 10);
/// ```
pub const fn encoded_length(n: usize) -> usize {
    (n * 8 + 4) / 5
}

/// Encode one quantum of 1-5 bytes into `encoded_length(block.len())` symbols.
#[inline]
fn encode_quantum(block: &[u8], out: &mut [u8]) {
    let mut frame = [0u8; 8];
    frame[..block.len()].copy_from_slice(block);
    let bits = u64::from_be_bytes(frame) >> 24;

    for (i, symbol) in out.iter_mut().enumerate() {
        *symbol = ALPHABET[((bits >> (35 - 5 * i)) & 0x1F) as usize];
    }
}

/// Encode `input` into the front of `output`, returning the number of
/// symbols written.
///
/// # Panics
///
/// Panics if `output` is shorter than `encoded_length(input.len())`.
pub fn encode_to_slice(input: &[u8], output: &mut [u8]) -> usize {
    let len = encoded_length(input.len());
    assert!(
        output.len() >= len,
        "output buffer too small: need {len} symbols, have {}",
        output.len()
    );

    for (block, out) in input
        .chunks(QUANTUM_BYTES)
        .zip(output[..len].chunks_mut(QUANTUM_SYMBOLS))
    {
        encode_quantum(block, out);
    }

    len
}

/// Encode raw bytes into Clockwork Base32 symbols.
///
/// ```rust
/// assert_eq!(clockwork_base32::encode(b"foobar"), b"CSQPYRK1E8");
/// ```
pub fn encode<T: AsRef<[u8]>>(input: T) -> Vec<u8> {
    let input = input.as_ref();
    let mut output = vec![0u8; encoded_length(input.len())];
    encode_to_slice(input, &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_length() {
        let expected = [0, 2, 4, 5, 7, 8, 10, 12, 13, 15, 16];
        for (n, &len) in expected.iter().enumerate() {
            assert_eq!(encoded_length(n), len, "length of {n} bytes");
        }
    }

    #[test]
    fn test_encode_partial_quanta() {
        assert_eq!(encode(b""), b"");
        assert_eq!(encode(b"f"), b"CR");
        assert_eq!(encode(b"fo"), b"CSQG");
        assert_eq!(encode(b"foo"), b"CSQPY");
        assert_eq!(encode(b"foob"), b"CSQPYRG");
        assert_eq!(encode(b"fooba"), b"CSQPYRK1");
        assert_eq!(encode(b"foobar"), b"CSQPYRK1E8");
    }

    #[test]
    fn test_encode_extremes() {
        assert_eq!(encode([0u8; 5]), b"00000000");
        assert_eq!(encode([0xFFu8; 5]), b"ZZZZZZZZ");
        // Low bits of the last symbol are zero-filled
        assert_eq!(encode([0xFFu8]), b"ZW");
    }

    #[test]
    fn test_encode_to_slice_leaves_tail_untouched() {
        let mut output = [b'-'; 12];
        let written = encode_to_slice(b"Hello", &mut output);
        assert_eq!(written, 8);
        assert_eq!(&output[..8], &encode(b"Hello")[..]);
        assert_eq!(&output[8..], b"----");
    }

    #[test]
    #[should_panic(expected = "output buffer too small")]
    fn test_encode_to_slice_short_output() {
        let mut output = [0u8; 3];
        encode_to_slice(b"ab", &mut output);
    }
}

//! The Clockwork Base32 alphabet and its decode table.
//!
//! The decode table is computed at compile time from [`ALPHABET`] and the
//! alias list, so the two can never drift apart.

use crate::decoder::{check_padding, padding_start};
use crate::error::{Error, Result};

/// The 32 output symbols, indexed by 5-bit value.
///
/// Digits `0`-`9` followed by the uppercase letters without `I`, `L`, `O`
/// and `U`.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Padding symbol. Accepted as a trailing run when decoding, never emitted.
pub const PADDING: u8 = b'=';

/// Decode table marker for bytes without a value.
pub(crate) const INVALID: u8 = 0xFF;

/// Glyphs that decode like another symbol: (alias, canonical symbol).
const ALIASES: [(u8, u8); 3] = [(b'O', b'0'), (b'I', b'1'), (b'L', b'1')];

/// Byte -> 5-bit value, or [`INVALID`].
pub(crate) const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];

    let mut i = 0;
    while i < ALPHABET.len() {
        let symbol = ALPHABET[i];
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }

    let mut i = 0;
    while i < ALIASES.len() {
        let (alias, canonical) = ALIASES[i];
        let value = table[canonical as usize];
        table[alias as usize] = value;
        table[alias.to_ascii_lowercase() as usize] = value;
        i += 1;
    }

    table
}

/// Look up the 5-bit value of an input byte.
#[inline]
pub fn value_of(symbol: u8) -> Option<u8> {
    match DECODE_TABLE[symbol as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Rewrite a symbol sequence into its canonical form.
///
/// Lowercase letters are uppercased, `O`/`I`/`L` are replaced by `0`/`1`/`1`
/// and trailing padding is dropped. Fails on the same offsets as
/// [`decode`](crate::decode), except that a lone trailing symbol is kept.
///
/// ```rust
/// assert_eq!(clockwork_base32::canonicalize("csqpyrkle8").unwrap(), "CSQPYRK1E8");
/// ```
pub fn canonicalize<T: AsRef<[u8]>>(input: T) -> Result<String> {
    let input = input.as_ref();
    let end = padding_start(input);

    let mut out = String::with_capacity(end);
    for (offset, &symbol) in input[..end].iter().enumerate() {
        let value = value_of(symbol).ok_or_else(|| Error::corrupt_input(offset as u64))?;
        out.push(ALPHABET[value as usize] as char);
    }
    check_padding(input, end)?;
    Ok(out)
}

//! # Clockwork Base32
//!
//! Pure Rust implementation of Clockwork Base32, a variant of RFC 4648
//! Base32 with a human-friendly alphabet and lenient decoding.
//!
//! ## Features
//!
//! - **Human-friendly alphabet**: `0-9` and the uppercase letters without
//!   `I`, `L`, `O` and `U`
//! - **Lenient decoding**: case-insensitive, `O` reads as `0`, `I` and `L`
//!   read as `1`, trailing `=` padding is optional
//! - **No padding on output**: a partial quantum simply emits fewer symbols
//! - **Streaming**: [`ClockworkWriter`] and [`ClockworkReader`] adapt any
//!   [`std::io::Write`] / [`std::io::Read`] with bounded memory
//! - **Async** (feature `async-io`): Tokio drivers in [`async_io`]
//!
//! ## Encoding Quantum
//!
//! ```text
//! bytes    ┌────────┬────────┬────────┬────────┬────────┐
//!          │ byte 0 │ byte 1 │ byte 2 │ byte 3 │ byte 4 │   40 bits
//!          └────────┴────────┴────────┴────────┴────────┘
//! symbols  ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!          │  0  │  1  │  2  │  3  │  4  │  5  │  6  │  7  │ 8 × 5 bits
//!          └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//! ```
//!
//! A trailing quantum of 1, 2, 3 or 4 bytes encodes to 2, 4, 5 or 7 symbols.
//!
//! ## Example
//!
//! ```rust
//! use clockwork_base32::{decode_string, encode_to_string};
//!
//! let encoded = encode_to_string("Hello, 世界");
//! assert_eq!(encoded, "91JPRV3F5GGE9E4PWYARR");
//!
//! let decoded = decode_string(&encoded).unwrap();
//! assert_eq!(decoded, "Hello, 世界".as_bytes());
//!
//! // Lowercase and look-alike glyphs decode the same way
//! assert_eq!(decode_string("csqpyrkie8").unwrap(), b"foobar");
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use clockwork_base32::{ClockworkReader, ClockworkWriter};
//! use std::io::{Read, Write};
//!
//! let mut writer = ClockworkWriter::new(Vec::new());
//! writer.write_all(b"any + old & data").unwrap();
//! // Must finish to emit the final partial quantum
//! writer.finish().unwrap();
//! let encoded = writer.into_inner();
//! assert_eq!(encoded, b"C5Q7J81B41QPRS104RG68RBMC4");
//!
//! let mut decoded = Vec::new();
//! ClockworkReader::new(&encoded[..]).read_to_end(&mut decoded).unwrap();
//! assert_eq!(decoded, b"any + old & data");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod alphabet;
mod config;
mod decoder;
mod encoder;
mod error;
mod reader;
mod writer;

#[cfg(feature = "async-io")]
pub mod async_io;

pub use alphabet::{ALPHABET, PADDING, canonicalize, value_of};
pub use config::StreamConfig;
pub use decoder::{decode, decode_to_slice, decoded_length};
pub use encoder::{encode, encode_to_slice, encoded_length};
pub use error::{Error, Result};
pub use reader::ClockworkReader;
pub use writer::ClockworkWriter;

/// Encode raw bytes into a Clockwork Base32 string.
///
/// # Example
///
/// ```rust
/// use clockwork_base32::encode_to_string;
///
/// assert_eq!(encode_to_string(b"Hello, world!"), "91JPRV3F5GG7EVVJDHJ22");
/// ```
pub fn encode_to_string<T: AsRef<[u8]>>(input: T) -> String {
    encode(input).into_iter().map(char::from).collect()
}

/// Decode a Clockwork Base32 string into raw bytes.
///
/// This is equivalent to `decode(input.as_bytes())`.
///
/// # Example
///
/// ```rust
/// use clockwork_base32::decode_string;
///
/// let data = decode_string("EDQPTS90CHGQ8R90EXMQ8T1000G62VK443QVQFR").unwrap();
/// assert_eq!(data, "some data with \0 and \u{feff}".as_bytes());
/// ```
pub fn decode_string(input: &str) -> Result<Vec<u8>> {
    decode(input.as_bytes())
}

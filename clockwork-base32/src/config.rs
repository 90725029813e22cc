//! Buffer configuration for the streaming adapters.

use crate::encoder::QUANTUM_SYMBOLS;

/// Buffer sizes used by [`ClockworkWriter`](crate::ClockworkWriter) and
/// [`ClockworkReader`](crate::ClockworkReader).
///
/// Both sizes are counted in symbols and are rounded down to whole 8-symbol
/// groups, never below one group and never above [`MAX_BUFFER`](Self::MAX_BUFFER).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Size of the writer's symbol buffer. Interior quanta are encoded in
    /// batches of this many symbols per write to the sink.
    pub encode_buffer: usize,
    /// Maximum number of symbols the reader pulls from its source at once.
    pub decode_chunk: usize,
}

impl StreamConfig {
    /// Upper bound for either size (1 MiB of symbols).
    pub const MAX_BUFFER: usize = 1024 * 1024;

    /// Standard configuration: 1 KiB of symbols each way.
    pub const DEFAULT: Self = Self {
        encode_buffer: 1024,
        decode_chunk: 1024,
    };

    /// One group each way. Every quantum becomes its own write/read.
    pub const SMALL: Self = Self {
        encode_buffer: QUANTUM_SYMBOLS,
        decode_chunk: QUANTUM_SYMBOLS,
    };

    /// Create a new stream configuration.
    ///
    /// Sizes above [`MAX_BUFFER`](Self::MAX_BUFFER) are clamped when used.
    pub fn new(encode_buffer: usize, decode_chunk: usize) -> Self {
        Self {
            encode_buffer,
            decode_chunk,
        }
    }

    /// Effective writer buffer size in symbols.
    pub fn encode_buffer_len(&self) -> usize {
        whole_groups(self.encode_buffer)
    }

    /// Effective reader chunk limit in symbols.
    pub fn decode_chunk_len(&self) -> usize {
        whole_groups(self.decode_chunk)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn whole_groups(symbols: usize) -> usize {
    let symbols = symbols.min(StreamConfig::MAX_BUFFER);
    (symbols - symbols % QUANTUM_SYMBOLS).max(QUANTUM_SYMBOLS)
}

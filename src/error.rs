//! Error types for Huffman encoding and decoding.

use std::collections::TryReserveError;

/// Errors surfaced by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    /// Input to encode is longer than a 4-byte frequency counter can describe.
    #[error("invalid input: {len} bytes exceeds the maximum of {max}", max = u32::MAX)]
    InvalidInput {
        /// Length of the rejected input
        len: usize,
    },

    /// The frequency header is missing, inconsistent or contradicts the buffer.
    #[error("corrupt header: {0}")]
    CorruptHeader(&'static str),

    /// The payload ends before every symbol in the header has been decoded.
    #[error("truncated stream: needed {needed} bits, {available} available")]
    TruncatedStream {
        /// Bits required by the read that failed
        needed: u64,
        /// Bits left in the buffer at that point
        available: u64,
    },

    /// A caller-supplied output buffer does not have the exact encoded size.
    #[error("output buffer is {actual} bytes, expected {expected}")]
    OutputSize {
        /// Size the encoded stream needs
        expected: usize,
        /// Size of the buffer provided
        actual: usize,
    },

    /// An output buffer of the required size could not be obtained.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure {
        /// Requested size in bytes
        bytes: usize,
    },
}

impl HuffmanError {
    pub(crate) fn allocation(bytes: usize) -> impl FnOnce(TryReserveError) -> HuffmanError {
        move |_| HuffmanError::AllocationFailure { bytes }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Allocates a zeroed buffer of exactly `len` bytes, reporting failure instead of aborting.
pub(crate) fn zeroed_buffer(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(HuffmanError::allocation(len))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

//! Module for encoding and decoding using static Huffman tables
//
// Compressed buffer layout:
//     [0 .. 1024)    256 little-endian u32 counters, one per byte value 0..=255
//     [1024 .. end)  codes for every input byte, most significant bit first,
//                    zero-padded to a whole byte
//
// There is no magic number, length field or terminator. The decoder rebuilds
// the tree from the counters and stops once every counted symbol is emitted.
pub mod decoder;
pub mod encoder;

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, HEADER_LEN};
use crate::tree::HuffmanTree;

pub use crate::entropy::decoder::decode;
pub use crate::entropy::encoder::encode;

/// Bytes needed to hold `bits` payload bits, `None` if that does not fit in `usize`.
pub fn payload_len(bits: u64) -> Option<usize> {
    usize::try_from(bits.div_ceil(8)).ok()
}

/// Header plus padded payload for `bits` payload bits.
pub(crate) fn output_len(bits: u64) -> Result<usize> {
    payload_len(bits)
        .and_then(|payload| payload.checked_add(HEADER_LEN))
        .ok_or(HuffmanError::AllocationFailure { bytes: usize::MAX })
}

/// Exact size of the compressed buffer for a given frequency table.
pub fn encoded_len(table: &FrequencyTable) -> Result<usize> {
    let bits = HuffmanTree::from_frequencies(table)
        .map_or(0, |tree| tree.codes().payload_bits(table));
    output_len(bits)
}

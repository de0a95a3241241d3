//! Byte frequency counting and the fixed-width frequency header.
//!
//! The header is 256 little-endian `u32` counters, one per byte value in
//! ascending order. It is the only side channel between encoder and
//! decoder: both rebuild the same tree from it.
use crate::error::{HuffmanError, Result};

/// Number of distinct byte values.
pub const SYMBOLS: usize = 256;

/// Width of one serialized counter in bytes.
pub const COUNTER_BYTES: usize = std::mem::size_of::<u32>();

/// Size of the serialized frequency table.
pub const HEADER_LEN: usize = SYMBOLS * COUNTER_BYTES;

/// Rejects inputs whose byte counts could overflow a `u32` counter.
pub(crate) fn check_input_len(len: usize) -> Result<()> {
    if len > u32::MAX as usize {
        return Err(HuffmanError::InvalidInput { len });
    }
    Ok(())
}

/// Occurrence count of every byte value in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOLS],
    max_count: u32,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
            max_count: 0,
        }
    }
}

impl FrequencyTable {
    /// Tallies every byte of `input`.
    ///
    /// Fails with [`HuffmanError::InvalidInput`] when a count could exceed
    /// the 4-byte counter width.
    pub fn count(input: &[u8]) -> Result<Self> {
        check_input_len(input.len())?;
        let mut table = Self::default();
        for &byte in input {
            let count = &mut table.counts[byte as usize];
            *count += 1;
            if *count > table.max_count {
                table.max_count = *count;
            }
        }
        log::debug!(
            "counted {} bytes, {} distinct, max_count={}",
            input.len(),
            table.distinct(),
            table.max_count
        );
        Ok(table)
    }

    /// Builds a table from raw counts.
    pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
        let max_count = counts.iter().copied().max().unwrap_or(0);
        Self { counts, max_count }
    }

    /// Reads the table from the first [`HEADER_LEN`] bytes of `input`.
    pub fn from_header(input: &[u8]) -> Result<Self> {
        let header = input
            .get(..HEADER_LEN)
            .ok_or(HuffmanError::CorruptHeader("input shorter than the frequency header"))?;
        let mut counts = [0u32; SYMBOLS];
        for (count, chunk) in counts.iter_mut().zip(header.chunks_exact(COUNTER_BYTES)) {
            let mut bytes = [0u8; COUNTER_BYTES];
            bytes.copy_from_slice(chunk);
            *count = u32::from_le_bytes(bytes);
        }
        Ok(Self::from_counts(counts))
    }

    /// Serializes the table into the first [`HEADER_LEN`] bytes of `out`.
    pub fn write_to(&self, out: &mut [u8]) {
        debug_assert!(out.len() >= HEADER_LEN);
        for (chunk, count) in out[..HEADER_LEN].chunks_exact_mut(COUNTER_BYTES).zip(self.counts) {
            chunk.copy_from_slice(&count.to_le_bytes());
        }
    }

    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Largest count in the table, 0 for an empty table.
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Sum of all counts, i.e. the length of the original buffer.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| *c as u64).sum()
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.max_count == 0
    }

    /// Nonzero entries as `(symbol, count)`, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        let table = FrequencyTable::count(b"AAAAAAAAB").unwrap();
        assert_eq!(table.get(b'A'), 8);
        assert_eq!(table.get(b'B'), 1);
        assert_eq!(table.get(b'C'), 0);
        assert_eq!(table.max_count(), 8);
        assert_eq!(table.total(), 9);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(b'A', 8), (b'B', 1)]);
    }

    #[test]
    fn test_count_empty() {
        let table = FrequencyTable::count(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_count(), 0);
        assert_eq!(table.total(), 0);
        assert_eq!(table.distinct(), 0);
    }

    #[test]
    fn test_check_input_len() {
        assert_eq!(check_input_len(0), Ok(()));
        assert_eq!(check_input_len(u32::MAX as usize), Ok(()));
        if let Some(len) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(check_input_len(len), Err(HuffmanError::InvalidInput { len }));
        }
    }

    #[test]
    fn test_header_layout() {
        let table = FrequencyTable::count(b"AAAAAAAAB").unwrap();
        let mut header = vec![0u8; HEADER_LEN];
        table.write_to(&mut header);
        assert_eq!(&header[65 * 4..65 * 4 + 4], &[8, 0, 0, 0]);
        assert_eq!(&header[66 * 4..66 * 4 + 4], &[1, 0, 0, 0]);
        let nonzero = header.iter().filter(|b| **b != 0).count();
        assert_eq!(nonzero, 2);
    }

    #[test]
    fn test_header_little_endian() {
        let mut counts = [0u32; SYMBOLS];
        counts[255] = 0x0102_0304;
        let mut header = vec![0u8; HEADER_LEN];
        FrequencyTable::from_counts(counts).write_to(&mut header);
        assert_eq!(&header[HEADER_LEN - 4..], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_from_header() {
        let original = FrequencyTable::count(b"hello, world").unwrap();
        let mut buffer = vec![0u8; HEADER_LEN + 3];
        original.write_to(&mut buffer);
        let parsed = FrequencyTable::from_header(&buffer).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.max_count(), 3);
    }

    #[test]
    fn test_from_header_too_short() {
        let result = FrequencyTable::from_header(&[0u8; HEADER_LEN - 1]);
        assert!(matches!(result, Err(HuffmanError::CorruptHeader(_))));
    }
}

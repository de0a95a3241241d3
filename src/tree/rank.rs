//! Orders symbols by ascending frequency with a base-10 LSD radix sort.
use crate::frequency::{FrequencyTable, SYMBOLS};

const RADIX: u32 = 10;

/// Number of base-10 digit passes needed to fully order counts up to `max_count`.
pub fn radix_passes(max_count: u32) -> u32 {
    match max_count {
        0 => 0,
        m => m.ilog10() + 1,
    }
}

/// Stable counting sort of `input` into `output` by the decimal digit of
/// each symbol's count selected by `divisor`.
fn sort_by_digit(
    table: &FrequencyTable,
    divisor: u32,
    input: &[u8; SYMBOLS],
    output: &mut [u8; SYMBOLS],
) {
    let digit = |symbol: u8| ((table.get(symbol) / divisor) % RADIX) as usize;

    let mut offsets = [0usize; RADIX as usize];
    for &symbol in input {
        offsets[digit(symbol)] += 1;
    }
    let mut start = 0;
    for offset in offsets.iter_mut() {
        let count = *offset;
        *offset = start;
        start += count;
    }
    for &symbol in input {
        let d = digit(symbol);
        output[offsets[d]] = symbol;
        offsets[d] += 1;
    }
}

/// Returns the symbols with a nonzero count, ascending by count and then
/// by symbol value.
///
/// The result is a pure function of the table. The decoder relies on this
/// to rebuild the encoder's tree. The end of the returned vector stands in
/// for a terminating sentinel of infinite count.
pub fn rank_symbols(table: &FrequencyTable) -> Vec<u8> {
    let mut buffers = [[0u8; SYMBOLS]; 2];
    for (i, slot) in buffers[0].iter_mut().enumerate() {
        *slot = i as u8;
    }

    let passes = radix_passes(table.max_count());
    let mut current = 0;
    let mut divisor = 1u32;
    for pass in 0..passes {
        let (front, back) = buffers.split_at_mut(1);
        let (input, output) = if current == 0 {
            (&front[0], &mut back[0])
        } else {
            (&back[0], &mut front[0])
        };
        sort_by_digit(table, divisor, input, output);
        current = 1 - current;
        if pass + 1 < passes {
            divisor *= RADIX;
        }
    }

    let ranked: Vec<u8> = buffers[current]
        .iter()
        .copied()
        .filter(|symbol| table.get(*symbol) > 0)
        .collect();
    log::trace!("ranked {} symbols in {passes} radix passes", ranked.len());
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, u32)]) -> FrequencyTable {
        let mut counts = [0u32; SYMBOLS];
        for (symbol, count) in pairs {
            counts[*symbol as usize] = *count;
        }
        FrequencyTable::from_counts(counts)
    }

    #[test]
    fn test_radix_passes() {
        assert_eq!(radix_passes(0), 0);
        assert_eq!(radix_passes(1), 1);
        assert_eq!(radix_passes(9), 1);
        assert_eq!(radix_passes(10), 2);
        assert_eq!(radix_passes(99), 2);
        assert_eq!(radix_passes(100), 3);
        assert_eq!(radix_passes(u32::MAX), 10);
    }

    #[test]
    fn test_rank_two_symbols() {
        let ranked = rank_symbols(&table(&[(b'A', 8), (b'B', 1)]));
        assert_eq!(ranked, vec![b'B', b'A']);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_symbols(&FrequencyTable::default()).is_empty());
    }

    #[test]
    fn test_rank_ties_by_symbol() {
        let ranked = rank_symbols(&table(&[(200, 3), (7, 3), (50, 1), (3, 3)]));
        assert_eq!(ranked, vec![50, 3, 7, 200]);
    }

    #[test]
    fn test_rank_power_of_ten_max() {
        let ranked = rank_symbols(&table(&[(b'x', 10), (b'y', 5)]));
        assert_eq!(ranked, vec![b'y', b'x']);
    }

    #[test]
    fn test_rank_all_symbols_once() {
        let counts = [1u32; SYMBOLS];
        let ranked = rank_symbols(&FrequencyTable::from_counts(counts));
        assert_eq!(ranked, (0..=255u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_rank_matches_comparison_sort() {
        let mut counts = [0u32; SYMBOLS];
        for (i, count) in counts.iter_mut().enumerate() {
            *count = ((i as u32).wrapping_mul(2_654_435_761) >> 7) % 100_003;
        }
        let table = FrequencyTable::from_counts(counts);
        let mut expected: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        expected.sort_by_key(|s| (table.get(*s), *s));
        assert_eq!(rank_symbols(&table), expected);
    }
}

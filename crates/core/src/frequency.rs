//! Symbol frequency ranking.
//!
//! Ranks are ordered by count descending; equal counts keep the order in
//! which the symbols first appeared in the input. The ranking is the only
//! input the code assigner needs, so it must be fully deterministic.

/// One entry of a [`FrequencyRank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCount {
    pub symbol: u8,
    pub count: u64,
}

/// Distinct symbols of an input, most frequent first.
///
/// # Invariants
/// - each distinct symbol appears exactly once
/// - counts sum to the input length
/// - counts are non-increasing; ties are in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyRank {
    entries: Vec<SymbolCount>,
}

impl FrequencyRank {
    /// Count and rank the symbols of `data`.
    pub fn analyze(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        // Position of each symbol in first-occurrence order
        let mut first_seen: Vec<u8> = Vec::new();

        for &byte in data {
            if counts[byte as usize] == 0 {
                first_seen.push(byte);
            }
            counts[byte as usize] += 1;
        }

        let mut entries: Vec<SymbolCount> = first_seen
            .into_iter()
            .map(|symbol| SymbolCount {
                symbol,
                count: counts[symbol as usize],
            })
            .collect();

        // Stable sort preserves first-occurrence order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { entries }
    }

    /// Ranked entries, rank 1 first.
    pub fn entries(&self) -> &[SymbolCount] {
        &self.entries
    }

    /// Symbols in rank order.
    pub fn symbols(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.symbol).collect()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (the input length).
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let rank = FrequencyRank::analyze(b"");
        assert!(rank.is_empty());
        assert_eq!(rank.total(), 0);
    }

    #[test]
    fn test_counts_descending() {
        let rank = FrequencyRank::analyze(b"abracadabra");
        let got: Vec<(u8, u64)> = rank.entries().iter().map(|e| (e.symbol, e.count)).collect();
        assert_eq!(
            got,
            vec![(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
        );
        assert_eq!(rank.total(), 11);
    }

    #[test]
    fn test_tie_break_first_occurrence() {
        let rank = FrequencyRank::analyze(b"ba");
        assert_eq!(rank.symbols(), vec![b'b', b'a']);

        // Not by byte value: 'z' shows up before 'a'
        let rank = FrequencyRank::analyze(b"zzaa");
        assert_eq!(rank.symbols(), vec![b'z', b'a']);
    }

    #[test]
    fn test_every_symbol_once() {
        let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
        let rank = FrequencyRank::analyze(&data);
        assert_eq!(rank.len(), 256);
        assert_eq!(rank.total(), 512);
        assert!(rank.entries().iter().all(|e| e.count == 2));
        assert_eq!(rank.symbols(), (0..=255u8).collect::<Vec<_>>());
    }
}

//! Staircase codeword assignment.
//!
//! Rank `r` (1-based) maps to a codeword `0^m 1^j` with `m, j >= 1`. Ranks
//! are grouped by codeword length `g = m + j`: group `g` holds the `g - 1`
//! codewords `0^(g-1) 1`, `0^(g-2) 11`, ..., `0 1^(g-1)`, in that order.
//!
//! ```text
//! rank  1  2    3    4     5     6     7      ...
//! code  01 001  011  0001  0011  0111  00001  ...
//! ```
//!
//! Because every codeword is a zero-run followed by a one-run, a 1 bit
//! followed by a 0 bit can only occur at the junction of two codewords.
//! The decoder finds codeword boundaries from that alone; no lengths are
//! transmitted.

use std::collections::HashMap;
use std::fmt;

use crate::bitio::BitWriter;
use crate::error::{FramingError, Result};

/// A staircase codeword `0^zeros 1^ones`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    pub zeros: usize,
    pub ones: usize,
}

impl Codeword {
    /// Total length in bits.
    pub fn len(&self) -> usize {
        self.zeros + self.ones
    }

    /// Always false for assigned codewords; both runs are non-empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append this codeword to a bit stream.
    #[inline]
    pub fn write_to(&self, writer: &mut BitWriter) {
        writer.write_run(false, self.zeros);
        writer.write_run(true, self.ones);
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.zeros {
            f.write_str("0")?;
        }
        for _ in 0..self.ones {
            f.write_str("1")?;
        }
        Ok(())
    }
}

/// Iterator over the staircase codewords in rank order.
///
/// Simulates the `(group, position)` counter pair: start at group 2,
/// position 1; after each codeword bump the position, and when it reaches
/// the group size move to the next group at position 1.
#[derive(Debug, Clone)]
pub struct Staircase {
    group: usize,
    position: usize,
}

impl Staircase {
    pub fn new() -> Self {
        Self {
            group: 2,
            position: 1,
        }
    }
}

impl Default for Staircase {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Staircase {
    type Item = Codeword;

    fn next(&mut self) -> Option<Codeword> {
        let code = Codeword {
            zeros: self.group - self.position,
            ones: self.position,
        };

        self.position += 1;
        if self.position == self.group {
            self.position = 1;
            self.group += 1;
        }

        Some(code)
    }
}

/// Closed-form codeword for a 1-based rank. Returns `None` for rank 0.
///
/// The length is the smallest `g` with `g(g-1)/2 >= rank`; the number of
/// ones is the rank's offset within its group.
pub fn codeword(rank: usize) -> Option<Codeword> {
    if rank == 0 {
        return None;
    }

    let triangle = |g: usize| g * (g - 1) / 2;

    let mut group = ((2.0 * rank as f64).sqrt() as usize).max(2);
    while triangle(group) < rank {
        group += 1;
    }
    while group > 2 && triangle(group - 1) >= rank {
        group -= 1;
    }

    let ones = rank - triangle(group - 1);
    Some(Codeword {
        zeros: group - ones,
        ones,
    })
}

/// Bijection between symbols and codewords for one symbol order.
///
/// The `i`-th symbol of the order gets the `i`-th staircase codeword.
/// Encoder and decoder both build their table through [`CodeTable::from_order`],
/// so a faithfully transmitted order yields identical tables.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Symbols in rank order
    symbols: Vec<u8>,
    /// Codeword for each rank, parallel to `symbols`
    codewords: Vec<Codeword>,
    /// Direct symbol -> codeword lookup
    forward: [Option<Codeword>; 256],
}

impl CodeTable {
    /// Build the table for `order` (rank 1 first).
    ///
    /// # Errors
    /// `FramingError::DuplicateSymbol` if a symbol appears twice.
    pub fn from_order(order: &[u8]) -> Result<Self> {
        let mut forward = [None; 256];
        let mut codewords = Vec::with_capacity(order.len());

        for ((index, &symbol), code) in order.iter().enumerate().zip(Staircase::new()) {
            if forward[symbol as usize].is_some() {
                return Err(FramingError::DuplicateSymbol {
                    symbol,
                    rank: index + 1,
                }
                .into());
            }
            forward[symbol as usize] = Some(code);
            codewords.push(code);
        }

        Ok(Self {
            symbols: order.to_vec(),
            codewords,
            forward,
        })
    }

    /// Codeword assigned to `symbol`, if the symbol is in the table.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.forward[symbol as usize]
    }

    /// `(symbol, codeword)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.symbols.iter().copied().zip(self.codewords.iter().copied())
    }

    /// Symbols in rank order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Inverse map used by the decoder.
    pub fn inverse(&self) -> HashMap<Codeword, u8> {
        self.codewords
            .iter()
            .copied()
            .zip(self.symbols.iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Length of the longest codeword (the last rank's), 0 when empty.
    pub fn max_len(&self) -> usize {
        self.codewords.last().map_or(0, Codeword::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(rank: usize) -> String {
        codeword(rank).unwrap().to_string()
    }

    #[test]
    fn test_first_ranks() {
        let expected = [
            "01", "001", "011", "0001", "0011", "0111", "00001", "00011", "00111", "01111",
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(bits(i + 1), *want, "rank {}", i + 1);
        }
    }

    #[test]
    fn test_rank_zero_invalid() {
        assert_eq!(codeword(0), None);
    }

    #[test]
    fn test_iterator_matches_closed_form() {
        for (i, code) in Staircase::new().take(5000).enumerate() {
            assert_eq!(Some(code), codeword(i + 1), "rank {}", i + 1);
        }
    }

    #[test]
    fn test_shape_and_length() {
        for rank in 1..=2000usize {
            let code = codeword(rank).unwrap();
            assert!(code.zeros >= 1 && code.ones >= 1);

            let g = code.len();
            assert!(g * (g - 1) / 2 >= rank);
            assert!((g - 1) * (g - 2) / 2 < rank);
        }
    }

    #[test]
    fn test_length_non_decreasing() {
        let lens: Vec<usize> = Staircase::new().take(300).map(|c| c.len()).collect();
        assert!(lens.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_group_sizes() {
        // Group g holds exactly g - 1 codewords
        let mut counts = HashMap::new();
        for code in Staircase::new().take(45) {
            *counts.entry(code.len()).or_insert(0usize) += 1;
        }
        for g in 2..=10 {
            assert_eq!(counts[&g], g - 1);
        }
    }

    #[test]
    fn test_table_from_order() {
        let table = CodeTable::from_order(b"ba").unwrap();
        assert_eq!(table.get(b'b').unwrap().to_string(), "01");
        assert_eq!(table.get(b'a').unwrap().to_string(), "001");
        assert_eq!(table.get(b'c'), None);
        assert_eq!(table.max_len(), 3);

        let inverse = table.inverse();
        assert_eq!(inverse[&Codeword { zeros: 1, ones: 1 }], b'b');
        assert_eq!(inverse[&Codeword { zeros: 2, ones: 1 }], b'a');
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let result = CodeTable::from_order(b"abca");
        assert!(matches!(
            result,
            Err(crate::error::Error::Framing(FramingError::DuplicateSymbol {
                symbol: b'a',
                rank: 4
            }))
        ));
    }

    #[test]
    fn test_full_alphabet_is_bijection() {
        let order: Vec<u8> = (0..=255u8).rev().collect();
        let table = CodeTable::from_order(&order).unwrap();
        assert_eq!(table.len(), 256);
        assert_eq!(table.inverse().len(), 256);
        // 256 ranks need groups up to g = 24 (T(23) = 276 >= 256)
        assert_eq!(table.max_len(), 24);
    }

    #[test]
    fn test_write_to() {
        let mut writer = BitWriter::new();
        Codeword { zeros: 1, ones: 1 }.write_to(&mut writer);
        Codeword { zeros: 2, ones: 1 }.write_to(&mut writer);
        Codeword { zeros: 1, ones: 2 }.write_to(&mut writer);
        // 01 001 011 -> 01001011
        assert_eq!(writer.finish(), vec![0b0100_1011]);
    }
}

//! Per-call compression statistics.
//!
//! [`CompressionStats`] describes one `compress` call: how large the input
//! was, how the output splits into header and payload, and how long the
//! call took. It also carries a CRC32 of the input so a later round trip
//! can be verified without keeping the original around.

use std::time::Duration;

/// Statistics for a single compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Input length in bytes (= symbols)
    pub input_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Serialized header size (symbols plus delimiter or prefix)
    pub header_bytes: usize,

    /// Packed payload size
    pub payload_bytes: usize,

    /// Payload bits that carry codewords
    pub payload_bits: usize,

    /// Zero bits appended to reach a byte boundary (0-7)
    pub padding_bits: usize,

    /// Length of the longest codeword in use
    pub max_codeword_bits: usize,

    /// CRC32 of the input
    pub input_crc32: u32,

    /// Wall time spent encoding
    pub elapsed: Duration,
}

impl CompressionStats {
    /// Header plus payload.
    pub fn total_bytes(&self) -> usize {
        self.header_bytes + self.payload_bytes
    }

    /// Compute compression ratio (total output / input).
    ///
    /// Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.total_bytes() as f64 / self.input_bytes as f64
        }
    }

    /// Mean payload bits spent per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / secs
        }
    }

    /// Check that `decoded` has the length and CRC32 of the original input.
    pub fn verify(&self, decoded: &[u8]) -> bool {
        decoded.len() as u64 == self.input_bytes && crc32fast::hash(decoded) == self.input_crc32
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Input:    {} bytes ({} distinct symbols)", self.input_bytes, self.distinct_symbols);
        println!(
            "Output:   {} bytes = {} (header) + {} (payload)",
            self.total_bytes(),
            self.header_bytes,
            self.payload_bytes
        );
        println!("Ratio:    {:.1}%", self.compression_ratio() * 100.0);
        println!(
            "Payload:  {} bits + {} padding, {:.3} bits/symbol",
            self.payload_bits,
            self.padding_bits,
            self.bits_per_symbol()
        );
        println!("Longest codeword: {} bits", self.max_codeword_bits);
        println!("CRC32:    {:#010x}", self.input_crc32);
        println!(
            "Time:     {} us ({:.2} MB/s)",
            self.elapsed.as_micros(),
            self.throughput_bps() / 1_000_000.0
        );
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             distinct_symbols={}\n\
             header_bytes={}\n\
             payload_bytes={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             total_bytes={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             input_crc32={:#010x}\n",
            self.input_bytes,
            self.distinct_symbols,
            self.header_bytes,
            self.payload_bytes,
            self.payload_bits,
            self.padding_bits,
            self.total_bytes(),
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.input_crc32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompressionStats {
        CompressionStats {
            input_bytes: 1000,
            distinct_symbols: 10,
            header_bytes: 11,
            payload_bytes: 739,
            payload_bits: 5908,
            padding_bits: 4,
            max_codeword_bits: 5,
            input_crc32: crc32fast::hash(b"ignored"),
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_compression_ratio() {
        let stats = sample();
        assert_eq!(stats.total_bytes(), 750);
        assert_eq!(stats.compression_ratio(), 0.75);
    }

    #[test]
    fn test_empty_input_ratios() {
        let stats = CompressionStats {
            input_bytes: 0,
            payload_bits: 0,
            elapsed: Duration::ZERO,
            ..sample()
        };
        assert_eq!(stats.compression_ratio(), 0.0);
        assert_eq!(stats.bits_per_symbol(), 0.0);
        assert_eq!(stats.throughput_bps(), 0.0);
    }

    #[test]
    fn test_throughput() {
        let stats = sample();
        assert!(stats.throughput_bps() > 0.0);
    }

    #[test]
    fn test_verify() {
        let data = b"verify me";
        let stats = CompressionStats {
            input_bytes: data.len() as u64,
            input_crc32: crc32fast::hash(data),
            ..sample()
        };
        assert!(stats.verify(data));
        assert!(!stats.verify(b"verify mE"));
        assert!(!stats.verify(b"verify"));
    }

    #[test]
    fn test_export_text() {
        let text = sample().export_text();
        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("total_bytes=750"));
        assert!(text.contains("compression_ratio=0.7500"));
    }
}

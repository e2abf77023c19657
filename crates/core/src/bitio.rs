//! Bit-level I/O over byte buffers.
//!
//! Staircase codewords are nothing but a run of zeros followed by a run of
//! ones, so both sides of the codec work in runs rather than in fixed-width
//! fields: [`BitWriter::write_run`] emits a run, [`BitReader::skip_run`]
//! measures one and moves the cursor past it. Both operate MSB-first.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data; the decoder relies on the
//!   codeword shape instead (a codeword always ends in a one bit)
//!
//! # Example
//! ```
//! use staircase_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_run(false, 2); // 00
//! writer.write_run(true, 3);  // 111
//! // Total: 00111 -> padded to 00111000
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b0011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.skip_run(false), 2);
//! assert_eq!(reader.skip_run(true), 3);
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_buffer` holds up to 7 pending bits, MSB-aligned
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a BitWriter that can hold `bytes` output bytes without
    /// reallocating.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append `count` copies of `bit`.
    ///
    /// Whole bytes are emitted directly once the pending partial byte has
    /// been topped up, so long runs cost one push per eight bits.
    pub fn write_run(&mut self, bit: bool, count: usize) {
        let mut remaining = count;

        while remaining > 0 && self.bit_count != 0 {
            self.write_bit(bit);
            remaining -= 1;
        }

        let fill = if bit { 0xFF } else { 0x00 };
        while remaining >= 8 {
            self.bytes.push(fill);
            remaining -= 8;
        }

        for _ in 0..remaining {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the output bytes.
    ///
    /// A trailing partial byte is flushed with its low bits left as zero.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Number of zero bits `finish` will append to reach a byte boundary.
    pub fn padding_bits(&self) -> usize {
        if self.bit_count == 0 {
            0
        } else {
            8 - self.bit_count as usize
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer with a moving cursor.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader for the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if the cursor is at the end.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.peek_bit().ok_or(BitIoError::UnexpectedEof)?;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Look at the bit under the cursor without consuming it.
    #[inline]
    pub fn peek_bit(&self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let offset = self.bit_position % 8;
        Some((byte >> (7 - offset)) & 1 == 1)
    }

    /// Advance past the run of `bit` values under the cursor and return its
    /// length. Returns 0 if the next bit differs or the buffer is exhausted.
    ///
    /// Byte-aligned stretches of `0x00`/`0xFF` are skipped eight bits at a
    /// time.
    pub fn skip_run(&mut self, bit: bool) -> usize {
        let start = self.bit_position;
        let total = self.data.len() * 8;
        let fill = if bit { 0xFF } else { 0x00 };

        while self.bit_position < total {
            let byte = self.data[self.bit_position / 8];
            let offset = self.bit_position % 8;

            if offset == 0 && byte == fill {
                self.bit_position += 8;
                continue;
            }

            if ((byte >> (7 - offset)) & 1 == 1) != bit {
                break;
            }
            self.bit_position += 1;
        }

        self.bit_position - start
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if we're at the end of the buffer.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}

/// Render packed bytes as a `0`/`1` string, MSB-first. Used for tracing.
pub fn render_bits(data: &[u8]) -> String {
    let mut reader = BitReader::new(data);
    let mut out = String::with_capacity(data.len() * 8);
    while let Ok(bit) = reader.read_bit() {
        out.push(if bit { '1' } else { '0' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_single_byte() {
        let mut writer = BitWriter::new();
        for &bit in &[true, false, true, true, false, false, true, true] {
            writer.write_bit(bit);
        }

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        assert_eq!(writer.bit_len(), 1);
        assert_eq!(writer.padding_bits(), 7);

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10000000]);
    }

    #[test]
    fn test_no_padding_on_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_run(false, 4);
        writer.write_run(true, 4);
        assert_eq!(writer.padding_bits(), 0);
        assert_eq!(writer.finish(), vec![0x0F]);
    }

    #[test]
    fn test_long_runs_cross_bytes() {
        let mut writer = BitWriter::new();
        writer.write_run(false, 3);
        writer.write_run(true, 21);
        // 000 11111 | 11111111 | 11111111
        assert_eq!(writer.bit_len(), 24);
        assert_eq!(writer.finish(), vec![0x1F, 0xFF, 0xFF]);
    }

    #[test]
    fn test_zero_length_run() {
        let mut writer = BitWriter::new();
        writer.write_run(true, 0);
        assert_eq!(writer.bit_len(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn test_skip_runs() {
        // 0001 1110 | 0000 0000 | 0000 0111
        let data = [0b0001_1110, 0x00, 0b0000_0111];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.skip_run(false), 3);
        assert_eq!(reader.skip_run(true), 4);
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.skip_run(false), 14);
        assert_eq!(reader.skip_run(true), 3);
        assert!(reader.is_empty());
        assert_eq!(reader.skip_run(true), 0);
    }

    #[test]
    fn test_skip_run_mismatch_does_not_move() {
        let data = [0b1000_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.skip_run(false), 0);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.peek_bit(), Some(true));
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        for _ in 0..8 {
            reader.read_bit().unwrap();
        }
        assert!(reader.read_bit().is_err());
        assert_eq!(reader.peek_bit(), None);
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        reader.read_bit().unwrap();
        assert_eq!(reader.bits_remaining(), 15);
        assert_eq!(reader.skip_run(true), 15);
        assert_eq!(reader.bits_remaining(), 0);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_render_bits() {
        assert_eq!(render_bits(&[0b0101_0101, 0x80]), "0101010110000000");
        assert_eq!(render_bits(&[]), "");
    }
}

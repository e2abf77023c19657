//! Decoder: split the header, rebuild the table, boundary-scan the payload.
//!
//! # Boundary scan
//!
//! From the cursor, the bits read `0^m 1^j` followed by either a `0` (the
//! next codeword starts there) or the end of the payload. That prefix is
//! the codeword. If the cursor only sees zeros up to the end, those bits
//! are padding and decoding stops. The cursor only moves forward, so the
//! scan is linear in the payload size.

use log::debug;

use crate::bitio::BitReader;
use crate::code::{CodeTable, Codeword};
use crate::error::{DecodeError, Result};
use crate::framing::{parse_message, HeaderFormat};
use crate::trace::Trace;

/// Turns an encoded message back into the original bytes.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    format: HeaderFormat,
}

impl Decoder {
    pub fn new(format: HeaderFormat) -> Self {
        Self { format }
    }

    /// Decode a complete message.
    ///
    /// # Errors
    /// - `FramingError::MalformedHeader` / `TruncatedHeader` if the header
    ///   cannot be located
    /// - `FramingError::DuplicateSymbol` if the header repeats a symbol
    /// - `DecodeError::UnknownCodeword` if the payload contains a pattern
    ///   the header's table does not assign
    pub fn decode(&self, bytes: &[u8], trace: &mut dyn Trace) -> Result<Vec<u8>> {
        let message = parse_message(self.format, bytes)?;
        trace.header(message.symbols);

        let table = CodeTable::from_order(message.symbols)?;
        trace.code_table(&table);
        let inverse = table.inverse();

        trace.packed(message.payload, message.payload.len() * 8);

        let mut reader = BitReader::new(message.payload);
        // Every codeword is at least two bits
        let mut output = Vec::with_capacity(message.payload.len() * 4);

        loop {
            let position = reader.position();

            let zeros = reader.skip_run(false);
            if reader.is_empty() {
                // Nothing left, or only zero padding
                break;
            }
            let ones = reader.skip_run(true);

            let code = Codeword { zeros, ones };
            let symbol = *inverse.get(&code).ok_or(DecodeError::UnknownCodeword {
                position,
                zeros,
                ones,
            })?;

            trace.codeword(position, code, symbol);
            output.push(symbol);
        }

        trace.decompressed(&output);
        debug!(
            "decoded {} bytes from {} ({} symbols in header)",
            output.len(),
            bytes.len(),
            table.len()
        );

        Ok(output)
    }
}

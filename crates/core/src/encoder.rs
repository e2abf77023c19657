//! Encoder: rank, assign, pack, frame.

use std::time::Instant;

use log::debug;

use crate::bitio::BitWriter;
use crate::code::CodeTable;
use crate::error::{EncodeError, Result};
use crate::framing::{serialize_message, HeaderFormat};
use crate::frequency::FrequencyRank;
use crate::metrics::CompressionStats;
use crate::trace::Trace;

/// Turns a byte sequence into an encoded message.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    format: HeaderFormat,
}

impl Encoder {
    pub fn new(format: HeaderFormat) -> Self {
        Self { format }
    }

    /// Encode `text`.
    ///
    /// # Errors
    /// `EncodeError::DelimiterCollision` if the input contains the delimiter
    /// of a delimited header. Nothing is encoded in that case.
    pub fn encode(&self, text: &[u8], trace: &mut dyn Trace) -> Result<(Vec<u8>, CompressionStats)> {
        let started = Instant::now();

        let rank = FrequencyRank::analyze(text);
        trace.frequencies(&rank);

        let symbols = rank.symbols();
        self.format.check_symbols(&symbols)?;

        let table = CodeTable::from_order(&symbols)?;
        trace.code_table(&table);

        // Exact payload size is known up front from the counts
        let payload_bits: usize = rank
            .entries()
            .iter()
            .zip(table.iter())
            .map(|(entry, (_, code))| entry.count as usize * code.len())
            .sum();

        let mut writer = BitWriter::with_capacity(payload_bits.div_ceil(8));
        for &symbol in text {
            let code = table
                .get(symbol)
                .ok_or(EncodeError::UnmappedSymbol { symbol })?;
            code.write_to(&mut writer);
        }

        debug_assert_eq!(writer.bit_len(), payload_bits);
        let padding_bits = writer.padding_bits();
        let payload = writer.finish();
        trace.packed(&payload, payload_bits);
        trace.header(&symbols);

        let message = serialize_message(self.format, &symbols, &payload);

        let stats = CompressionStats {
            input_bytes: text.len() as u64,
            distinct_symbols: symbols.len(),
            header_bytes: message.len() - payload.len(),
            payload_bytes: payload.len(),
            payload_bits,
            padding_bits,
            max_codeword_bits: table.max_len(),
            input_crc32: crc32fast::hash(text),
            elapsed: started.elapsed(),
        };
        trace.compressed(&stats);

        debug!(
            "encoded {} bytes into {} ({} symbols, {} payload bits)",
            stats.input_bytes,
            message.len(),
            stats.distinct_symbols,
            payload_bits
        );

        Ok((message, stats))
    }
}

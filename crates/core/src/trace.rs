//! Observation hooks for intermediate codec values.
//!
//! A [`Trace`] receives the frequency ranking, code table, packed payload and
//! per-codeword decode steps as the codec produces them. Hooks get shared
//! references only; nothing a trace does can change what the codec returns.
//!
//! [`NoTrace`] is what the plain entry points use. [`LogTrace`] forwards
//! everything to the `log` facade.

use log::{debug, log_enabled, trace, Level};

use crate::bitio::render_bits;
use crate::code::{CodeTable, Codeword};
use crate::frequency::FrequencyRank;
use crate::metrics::CompressionStats;

/// Receives intermediate values from [`crate::Codec`].
///
/// Every method has an empty default, so implementors pick only the hooks
/// they care about.
pub trait Trace {
    /// Encode: the ranked symbol counts.
    fn frequencies(&mut self, _rank: &FrequencyRank) {}

    /// Both directions: the table built from the symbol order.
    fn code_table(&mut self, _table: &CodeTable) {}

    /// Both directions: the header's symbols in rank order.
    fn header(&mut self, _symbols: &[u8]) {}

    /// Both directions: the packed payload and how many of its bits carry
    /// codewords (the rest is padding). On decode the whole payload is
    /// reported since padding is only found while scanning.
    fn packed(&mut self, _payload: &[u8], _bit_len: usize) {}

    /// Decode: one codeword recognised at bit offset `position`.
    fn codeword(&mut self, _position: usize, _code: Codeword, _symbol: u8) {}

    /// Encode: final sizes for the call.
    fn compressed(&mut self, _stats: &CompressionStats) {}

    /// Decode: the recovered symbols.
    fn decompressed(&mut self, _output: &[u8]) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {}

/// Writes intermediate values through the `log` facade.
///
/// Tables and sizes go out at `debug`; bit strings and per-codeword steps at
/// `trace`, and are only rendered when that level is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn frequencies(&mut self, rank: &FrequencyRank) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let table: Vec<String> = rank
            .entries()
            .iter()
            .map(|e| format!("{}:{}", display_symbol(e.symbol), e.count))
            .collect();
        debug!("frequencies ({} distinct): {}", rank.len(), table.join(" "));
    }

    fn code_table(&mut self, table: &CodeTable) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let codes: Vec<String> = table
            .iter()
            .map(|(symbol, code)| format!("{}={}", display_symbol(symbol), code))
            .collect();
        debug!("code table: {}", codes.join(" "));
    }

    fn header(&mut self, symbols: &[u8]) {
        debug!("header: {} symbols", symbols.len());
    }

    fn packed(&mut self, payload: &[u8], bit_len: usize) {
        if log_enabled!(Level::Trace) {
            let bits = render_bits(payload);
            trace!("payload bits ({} used): {}", bit_len, bits);
        }
    }

    fn codeword(&mut self, position: usize, code: Codeword, symbol: u8) {
        trace!("@{}: {} -> {}", position, code, display_symbol(symbol));
    }

    fn compressed(&mut self, stats: &CompressionStats) {
        debug!(
            "{} (header) + {} (payload) = {} bytes from {} input bytes",
            stats.header_bytes,
            stats.payload_bytes,
            stats.total_bytes(),
            stats.input_bytes
        );
    }

    fn decompressed(&mut self, output: &[u8]) {
        debug!("decoded {} symbols", output.len());
    }
}

/// Printable form of a symbol: the ASCII character when graphic, hex
/// otherwise.
fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

//! Message framing: header serialization and header/payload splitting.
//!
//! An encoded message is the symbol order followed by the packed payload.
//! The decoder needs nothing else: the order rebuilds the code table and
//! the payload is self-delimiting.
//!
//! # Message Format
//!
//! Delimited (default):
//!
//! ```text
//! +----------------------+
//! | symbols (K bytes)    |  distinct symbols, rank 1 first
//! +----------------------+
//! | delimiter (1 byte)   |  reserved, must not be one of the symbols
//! +----------------------+
//! | payload (variable)   |  codewords, MSB-first, zero-padded to a byte
//! +----------------------+
//! ```
//!
//! Length-prefixed:
//!
//! ```text
//! +----------------------+
//! | K (2 bytes)          |  u16 little-endian symbol count
//! +----------------------+
//! | symbols (K bytes)    |
//! +----------------------+
//! | payload (variable)   |
//! +----------------------+
//! ```
//!
//! There is no magic, version or checksum. The delimited form relies on
//! the delimiter never being a data symbol; [`HeaderFormat::check_symbols`]
//! enforces that before anything is written.

use crate::error::{EncodeError, FramingError, Result};

/// Default delimiter: `0xA7`, the Latin-1 byte for `§`.
pub const DEFAULT_DELIMITER: u8 = 0xA7;

/// Size of the length prefix in bytes
const PREFIX_SIZE: usize = 2;

/// How the header's symbol list is separated from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Symbols followed by one reserved delimiter byte.
    Delimited { delimiter: u8 },
    /// A u16 little-endian symbol count followed by the symbols. Accepts
    /// every byte value as a symbol.
    LengthPrefixed,
}

impl Default for HeaderFormat {
    fn default() -> Self {
        HeaderFormat::Delimited {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl HeaderFormat {
    /// Serialized header size for `symbol_count` symbols.
    pub fn header_len(&self, symbol_count: usize) -> usize {
        match self {
            HeaderFormat::Delimited { .. } => symbol_count + 1,
            HeaderFormat::LengthPrefixed => PREFIX_SIZE + symbol_count,
        }
    }

    /// Reject symbol sets this format cannot frame unambiguously.
    ///
    /// # Errors
    /// `EncodeError::DelimiterCollision` if a symbol equals the delimiter.
    pub fn check_symbols(&self, symbols: &[u8]) -> Result<()> {
        if let HeaderFormat::Delimited { delimiter } = *self {
            if symbols.contains(&delimiter) {
                return Err(EncodeError::DelimiterCollision { symbol: delimiter }.into());
            }
        }
        Ok(())
    }
}

/// A message split into its header symbols and payload. Borrows from the
/// encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedMessage<'a> {
    /// Symbols in rank order
    pub symbols: &'a [u8],
    /// Packed codewords
    pub payload: &'a [u8],
}

/// Serialize a message.
///
/// The caller is responsible for having run [`HeaderFormat::check_symbols`];
/// symbol counts always fit the prefix since symbols are bytes.
pub fn serialize_message(format: HeaderFormat, symbols: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(format.header_len(symbols.len()) + payload.len());

    match format {
        HeaderFormat::Delimited { delimiter } => {
            message.extend_from_slice(symbols);
            message.push(delimiter);
        }
        HeaderFormat::LengthPrefixed => {
            message.extend_from_slice(&(symbols.len() as u16).to_le_bytes());
            message.extend_from_slice(symbols);
        }
    }

    message.extend_from_slice(payload);
    message
}

/// Split a message into header symbols and payload.
///
/// # Errors
/// - `FramingError::MalformedHeader` if the delimiter is absent
/// - `FramingError::TruncatedHeader` if the prefix or the symbols it
///   announces are cut short
pub fn parse_message(format: HeaderFormat, bytes: &[u8]) -> Result<EncodedMessage<'_>> {
    match format {
        HeaderFormat::Delimited { delimiter } => {
            let sep = bytes
                .iter()
                .position(|&b| b == delimiter)
                .ok_or(FramingError::MalformedHeader { delimiter })?;

            Ok(EncodedMessage {
                symbols: &bytes[..sep],
                payload: &bytes[sep + 1..],
            })
        }
        HeaderFormat::LengthPrefixed => {
            if bytes.len() < PREFIX_SIZE {
                return Err(FramingError::TruncatedHeader {
                    required: PREFIX_SIZE,
                    actual: bytes.len(),
                }
                .into());
            }

            let count = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
            let header_end = PREFIX_SIZE + count;
            if bytes.len() < header_end {
                return Err(FramingError::TruncatedHeader {
                    required: header_end,
                    actual: bytes.len(),
                }
                .into());
            }

            Ok(EncodedMessage {
                symbols: &bytes[PREFIX_SIZE..header_end],
                payload: &bytes[header_end..],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_delimited_layout() {
        let format = HeaderFormat::default();
        let message = serialize_message(format, b"ab", &[0x55]);
        assert_eq!(message, vec![b'a', b'b', DEFAULT_DELIMITER, 0x55]);

        let parsed = parse_message(format, &message).unwrap();
        assert_eq!(parsed.symbols, b"ab");
        assert_eq!(parsed.payload, &[0x55]);
    }

    #[test]
    fn test_delimited_empty() {
        let format = HeaderFormat::default();
        let message = serialize_message(format, b"", b"");
        assert_eq!(message, vec![DEFAULT_DELIMITER]);

        let parsed = parse_message(format, &message).unwrap();
        assert!(parsed.symbols.is_empty());
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn test_delimiter_in_payload_is_not_a_split_point() {
        // Only the first delimiter separates header from payload
        let format = HeaderFormat::Delimited { delimiter: 0xFF };
        let message = serialize_message(format, b"xy", &[0xFF, 0x01]);

        let parsed = parse_message(format, &message).unwrap();
        assert_eq!(parsed.symbols, b"xy");
        assert_eq!(parsed.payload, &[0xFF, 0x01]);
    }

    #[test]
    fn test_missing_delimiter() {
        let result = parse_message(HeaderFormat::default(), b"abc");
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::MalformedHeader {
                delimiter: DEFAULT_DELIMITER
            }))
        ));

        assert!(parse_message(HeaderFormat::default(), b"").is_err());
    }

    #[test]
    fn test_length_prefixed_layout() {
        let format = HeaderFormat::LengthPrefixed;
        let message = serialize_message(format, &[0xA7, 0x00], &[0x40]);
        assert_eq!(message, vec![2, 0, 0xA7, 0x00, 0x40]);

        let parsed = parse_message(format, &message).unwrap();
        assert_eq!(parsed.symbols, &[0xA7, 0x00]);
        assert_eq!(parsed.payload, &[0x40]);
    }

    #[test]
    fn test_length_prefixed_full_alphabet() {
        let symbols: Vec<u8> = (0..=255u8).collect();
        let message = serialize_message(HeaderFormat::LengthPrefixed, &symbols, &[]);
        assert_eq!(&message[..2], &[0x00, 0x01]);

        let parsed = parse_message(HeaderFormat::LengthPrefixed, &message).unwrap();
        assert_eq!(parsed.symbols, symbols.as_slice());
    }

    #[test]
    fn test_length_prefixed_truncated() {
        let result = parse_message(HeaderFormat::LengthPrefixed, &[5]);
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::TruncatedHeader {
                required: 2,
                actual: 1
            }))
        ));

        let result = parse_message(HeaderFormat::LengthPrefixed, &[5, 0, b'a', b'b']);
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::TruncatedHeader {
                required: 7,
                actual: 4
            }))
        ));
    }

    #[test]
    fn test_check_symbols() {
        let format = HeaderFormat::Delimited { delimiter: b'#' };
        assert!(format.check_symbols(b"abc").is_ok());
        assert!(matches!(
            format.check_symbols(b"a#c"),
            Err(Error::Encode(EncodeError::DelimiterCollision { symbol: b'#' }))
        ));

        assert!(HeaderFormat::LengthPrefixed.check_symbols(b"a#c").is_ok());
    }

    #[test]
    fn test_header_len() {
        assert_eq!(HeaderFormat::default().header_len(3), 4);
        assert_eq!(HeaderFormat::LengthPrefixed.header_len(3), 5);
    }
}

//! Error types for the staircase codec.
//!
//! All operations return structured errors rather than panicking. Each
//! failure domain has its own enum; the top-level [`Error`] wraps them so
//! callers can match as coarsely or as finely as they need.

use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Framing: header parsing (delimiter or length prefix)
/// - Encode: input rejected before any bits are written
/// - Decode: the payload does not map back onto the header's code table
/// - I/O: sink and source file operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Header could not be split from the payload
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Input cannot be encoded with the configured framing
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Payload bits do not decode against the header's code table
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Sink or source I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither raw bytes nor a source were supplied to decompress
    #[error("no input: supply either encoded bytes or a source to read from")]
    MissingInput,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Header framing errors.
#[derive(Debug, Error)]
pub enum FramingError {
    /// The reserved delimiter byte never occurs in the message
    #[error("malformed header: delimiter {delimiter:#04x} not found")]
    MalformedHeader { delimiter: u8 },

    /// The length prefix promises more symbols than the message holds
    #[error("truncated header: need at least {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    /// The header names the same symbol twice, so no bijection exists
    #[error("duplicate symbol {symbol:#04x} in header at rank {rank}")]
    DuplicateSymbol { symbol: u8, rank: usize },
}

/// Encode-side errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A data symbol equals the reserved delimiter byte
    #[error("input contains the reserved delimiter byte {symbol:#04x}")]
    DelimiterCollision { symbol: u8 },

    /// A symbol of the input has no codeword (this is a bug)
    #[error("symbol {symbol:#04x} missing from code table")]
    UnmappedSymbol { symbol: u8 },
}

/// Decode-side errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A scanned bit pattern has no entry in the inverse code table
    #[error("unknown codeword 0^{zeros}1^{ones} at bit position {position}")]
    UnknownCodeword {
        position: usize,
        zeros: usize,
        ones: usize,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

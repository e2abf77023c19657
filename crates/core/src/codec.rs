//! Public entry points.
//!
//! [`Codec`] bundles a [`CodecConfig`] with the encode/decode pipelines and
//! the optional sink/source handling. The free functions [`compress`] and
//! [`decompress`] use the default configuration.
//!
//! Sinks and sources are read or written as a whole, once, at the edge of
//! the call. File handles are scoped to the call that opens them.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::framing::HeaderFormat;
use crate::metrics::CompressionStats;
use crate::trace::{NoTrace, Trace};

/// Codec configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Header framing; both sides must agree on it
    pub header: HeaderFormat,
}

impl CodecConfig {
    /// Delimited header with a custom delimiter byte.
    pub fn delimited(delimiter: u8) -> Self {
        Self {
            header: HeaderFormat::Delimited { delimiter },
        }
    }

    /// Length-prefixed header; accepts every byte value.
    pub fn length_prefixed() -> Self {
        Self {
            header: HeaderFormat::LengthPrefixed,
        }
    }
}

/// Stateless compressor/decompressor. Cheap to copy and safe to share
/// across threads; every call builds its own tables and buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `text` into an encoded message.
    pub fn compress(&self, text: &[u8]) -> Result<Vec<u8>> {
        self.compress_traced(text, &mut NoTrace)
    }

    /// Compress while reporting intermediate values to `trace`.
    pub fn compress_traced(&self, text: &[u8], trace: &mut dyn Trace) -> Result<Vec<u8>> {
        let (message, _) = Encoder::new(self.config.header).encode(text, trace)?;
        Ok(message)
    }

    /// Compress and return statistics for the call alongside the message.
    pub fn compress_with_stats(&self, text: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        Encoder::new(self.config.header).encode(text, &mut NoTrace)
    }

    /// Compress and write the whole message to `sink`. The message is also
    /// returned.
    pub fn compress_to_writer<W: Write>(&self, text: &[u8], sink: &mut W) -> Result<Vec<u8>> {
        let message = self.compress(text)?;
        sink.write_all(&message)?;
        sink.flush()?;
        Ok(message)
    }

    /// Compress and write the message to `path`, replacing any existing
    /// file. The file is only touched once encoding has succeeded.
    pub fn compress_to_path(&self, text: &[u8], path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let message = self.compress(text)?;
        fs::write(path, &message)?;
        debug!("wrote {} bytes to {}", message.len(), path.display());
        Ok(message)
    }

    /// Decompress an encoded message.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decompress_traced(data, &mut NoTrace)
    }

    /// Decompress while reporting intermediate values to `trace`.
    pub fn decompress_traced(&self, data: &[u8], trace: &mut dyn Trace) -> Result<Vec<u8>> {
        Decoder::new(self.config.header).decode(data, trace)
    }

    /// Read `source` to the end, then decompress it.
    pub fn decompress_from_reader<R: Read>(&self, source: &mut R) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;
        self.decompress(&data)
    }

    /// Read the file at `path`, then decompress it.
    pub fn decompress_from_path(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        debug!("read {} bytes from {}", data.len(), path.display());
        self.decompress(&data)
    }
}

/// Compress `text` with the default configuration, optionally writing the
/// message to `sink` (overwriting it).
pub fn compress(text: &[u8], sink: Option<&Path>) -> Result<Vec<u8>> {
    let codec = Codec::default();
    match sink {
        Some(path) => codec.compress_to_path(text, path),
        None => codec.compress(text),
    }
}

/// Decompress with the default configuration.
///
/// `data` takes precedence; `source` is read only when no bytes are given.
///
/// # Errors
/// `Error::MissingInput` if neither is supplied.
pub fn decompress(data: Option<&[u8]>, source: Option<&Path>) -> Result<Vec<u8>> {
    let codec = Codec::default();
    match (data, source) {
        (Some(bytes), _) => codec.decompress(bytes),
        (None, Some(path)) => codec.decompress_from_path(path),
        (None, None) => Err(Error::MissingInput),
    }
}

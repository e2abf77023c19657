//! staircase-core: deterministic rank-based compression with staircase codes
//!
//! Every distinct byte of an input is ranked by frequency and given the
//! codeword `0^m 1^j` for its rank. The codewords need no length fields:
//! a `1` followed by a `0` only ever occurs between two codewords, so the
//! decoder recovers boundaries by scanning for that transition.
//!
//! # Architecture
//!
//! - `frequency`: symbol counting and ranking
//! - `code`: staircase codeword generation and code tables
//! - `bitio`: MSB-first bit reading/writing
//! - `framing`: header layout (delimiter or length prefix)
//! - `encoder` / `decoder`: the two pipelines
//! - `codec`: configured entry points, sinks and sources
//! - `trace`: observation hooks for intermediate values
//! - `metrics`: per-call statistics
//!
//! # Example
//! ```
//! let message = staircase_core::compress(b"abracadabra", None).unwrap();
//! let text = staircase_core::decompress(Some(message.as_slice()), None).unwrap();
//! assert_eq!(text, b"abracadabra");
//! ```

pub mod bitio;
pub mod code;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod frequency;
pub mod metrics;
pub mod trace;

// Re-export commonly used types
pub use code::{codeword, CodeTable, Codeword};
pub use codec::{compress, decompress, Codec, CodecConfig};
pub use error::{Error, Result};
pub use framing::{HeaderFormat, DEFAULT_DELIMITER};
pub use frequency::FrequencyRank;
pub use metrics::CompressionStats;
pub use trace::{LogTrace, NoTrace, Trace};

//! Sample text generation for the demo.
//!
//! When no input file is specified we generate English-like text: words
//! drawn from a small vocabulary with a skewed distribution, so a handful of
//! letters dominate the way they do in real prose. Output is plain ASCII and
//! never contains the default delimiter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const VOCABULARY: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "is", "energy", "network", "sensor", "cost", "byte",
    "compression", "device", "low", "header", "model", "node", "signal", "frame", "symbol",
    "rank", "bit", "decoding", "predictable", "constrained", "lightweight", "firmware",
];

/// Generate `size_bytes` of sample text.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact length of the result
pub fn generate_sample_text(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = Vec::with_capacity(size_bytes + 32);
    let mut words_in_sentence = 0usize;

    while text.len() < size_bytes {
        // Squaring a uniform sample biases toward the front of the list
        let r: f64 = rng.gen();
        let index = ((r * r) * VOCABULARY.len() as f64) as usize;
        let word = VOCABULARY[index.min(VOCABULARY.len() - 1)];

        if words_in_sentence == 0 {
            let mut chars = word.bytes();
            if let Some(first) = chars.next() {
                text.push(first.to_ascii_uppercase());
            }
            text.extend(chars);
        } else {
            text.extend_from_slice(word.as_bytes());
        }
        words_in_sentence += 1;

        // End sentences after 6-14 words
        if words_in_sentence >= rng.gen_range(6..=14) {
            text.extend_from_slice(b". ");
            words_in_sentence = 0;
        } else if rng.gen_range(0..10) == 0 {
            text.extend_from_slice(b", ");
        } else {
            text.push(b' ');
        }
    }

    // Truncate to exact size
    text.truncate(size_bytes);
    text
}

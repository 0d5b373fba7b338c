//! Candidate derivation: composite input → digest → symbols.

use xxhash_rust::xxh3::xxh3_128_with_seed;

use super::format::CodeFormat;

/// Separator between the parts of the composite input.
pub const INPUT_DELIMITER: char = '_';

const BLOCK_BYTES: usize = 16;

/// Build the composite input `target_timestamp_random_attempt`.
///
/// The target is used verbatim.
pub fn composite_input(target: &str, timestamp: i64, random: u64, attempt: u32) -> String {
    let mut input = String::with_capacity(target.len() + 50);
    input.push_str(target);
    input.push(INPUT_DELIMITER);
    input.push_str(&timestamp.to_string());
    input.push(INPUT_DELIMITER);
    input.push_str(&random.to_string());
    input.push(INPUT_DELIMITER);
    input.push_str(&attempt.to_string());
    input
}

/// At least `len` bytes of xxh3-128 digest.
///
/// Each 16-byte block hashes the same input under seed 0, 1, 2, ..., so the
/// first block is the plain digest and longer codes stay fully determined by
/// the input.
pub fn digest(input: &[u8], len: usize) -> Vec<u8> {
    let blocks = len.div_ceil(BLOCK_BYTES).max(1);
    let mut out = Vec::with_capacity(blocks * BLOCK_BYTES);
    for seed in 0..blocks as u64 {
        out.extend_from_slice(&xxh3_128_with_seed(input, seed).to_le_bytes());
    }
    out
}

/// Derive one candidate code.
pub fn derive_candidate(
    format: &CodeFormat,
    target: &str,
    timestamp: i64,
    random: u64,
    attempt: u32,
) -> String {
    let input = composite_input(target, timestamp, random, attempt);
    digest(input.as_bytes(), format.length())
        .iter()
        .take(format.length())
        .map(|&b| format.symbol_for(b))
        .collect()
}

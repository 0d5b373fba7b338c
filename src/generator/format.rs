use crate::errors::{CodelinkError, Result};

/// 默认短码长度
pub const DEFAULT_CODE_LENGTH: usize = 6;
/// 默认最大重试次数
pub const DEFAULT_MAX_RETRIES: u32 = 10;
/// 最大短码长度
pub const MAX_CODE_LENGTH: usize = 64;
/// 默认字符表（62 个字符）
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shape of a short code: a fixed length over a fixed alphabet.
///
/// Digest bytes are mapped with `alphabet[byte % alphabet.len()]`. When the
/// alphabet size does not divide 256 (62 does not) the low symbols are
/// slightly more likely. That bias is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFormat {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeFormat {
    /// Alphabet must be 1..=256 distinct symbols and length must be in
    /// `1..=MAX_CODE_LENGTH`.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        let symbols: Vec<char> = alphabet.chars().collect();

        if symbols.is_empty() {
            return Err(CodelinkError::config("alphabet cannot be empty"));
        }
        if symbols.len() > 256 {
            return Err(CodelinkError::config(format!(
                "alphabet has {} symbols, at most 256 are addressable by one byte",
                symbols.len()
            )));
        }
        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != symbols.len() {
            return Err(CodelinkError::config("alphabet contains duplicate symbols"));
        }
        if length == 0 {
            return Err(CodelinkError::config("code length must be greater than 0"));
        }
        if length > MAX_CODE_LENGTH {
            return Err(CodelinkError::config(format!(
                "code length {} exceeds the maximum of {}",
                length, MAX_CODE_LENGTH
            )));
        }

        Ok(Self {
            alphabet: symbols,
            length,
        })
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Map one digest byte to a symbol.
    #[inline]
    pub fn symbol_for(&self, byte: u8) -> char {
        self.alphabet[byte as usize % self.alphabet.len()]
    }

    /// Whether `code` has this format's length and only alphabet symbols.
    pub fn matches(&self, code: &str) -> bool {
        code.chars().count() == self.length && code.chars().all(|c| self.alphabet.contains(&c))
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

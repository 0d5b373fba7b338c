//! Short code generator
//!
//! Derives fixed-length codes from `(target, timestamp, random, attempt)` and
//! retries on collision with a bounded budget. Later attempts widen the
//! inputs mixed into the hash:
//!
//! | attempts | tier      | derived from                           |
//! |----------|-----------|----------------------------------------|
//! | 0..=2    | `Base`    | `(target, attempt)`                    |
//! | 3..=6    | `Widened` | `(target, attempt * 2)`                |
//! | 7..      | `Salted`  | `(target + "_" + fresh timestamp, attempt)` |
//!
//! Every candidate additionally mixes a fresh timestamp and random value.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::errors::{CodelinkError, Result};
use crate::storage::CodeStore;

pub mod derive;
pub mod entropy;
pub mod format;

pub use derive::{composite_input, derive_candidate, digest};
pub use entropy::{
    Clock, EntropySource, FixedClock, FixedEntropy, SequenceEntropy, SystemClock, ThreadRngSource,
};
pub use format::{
    CodeFormat, DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH, DEFAULT_MAX_RETRIES, MAX_CODE_LENGTH,
};

/// Entropy tier used for a given attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyTier {
    Base,
    Widened,
    Salted,
}

impl EntropyTier {
    pub fn for_attempt(attempt: u32) -> Self {
        match attempt {
            0..=2 => Self::Base,
            3..=6 => Self::Widened,
            _ => Self::Salted,
        }
    }
}

/// Collision-avoiding code generator bound to one store.
///
/// On success the `(code, target)` entry is already recorded; callers must not
/// insert it again.
pub struct CodeGenerator {
    store: Arc<dyn CodeStore>,
    format: CodeFormat,
    max_retries: u32,
    reserved: Vec<String>,
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn EntropySource>,
}

impl CodeGenerator {
    /// Generator with the default format, retry budget and system sources.
    pub fn new(store: Arc<dyn CodeStore>) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: Arc<dyn CodeStore>) -> GeneratorBuilder {
        GeneratorBuilder {
            store,
            format: CodeFormat::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            reserved: Vec::new(),
            clock: None,
            entropy: None,
        }
    }

    pub fn store(&self) -> &Arc<dyn CodeStore> {
        &self.store
    }

    /// Produce a fresh code for `target` and record it.
    ///
    /// # Errors
    /// - `EmptyInput` if `target` is empty or whitespace only
    /// - `GenerationExhausted` if every attempt collided; the store is unchanged
    pub fn generate(&self, target: &str) -> Result<String> {
        if target.trim().is_empty() {
            return Err(CodelinkError::empty_input("target cannot be empty"));
        }

        for attempt in 0..self.max_retries {
            let tier = EntropyTier::for_attempt(attempt);
            let code = self.candidate(target, attempt, tier);
            trace!("Attempt {} ({:?}) produced candidate {}", attempt, tier, code);

            if self.is_reserved(&code) {
                debug!("Short code {} is reserved, attempt {}", code, attempt);
                continue;
            }
            if self.store.exists(&code) {
                debug!("Short code collision on attempt {}: {}", attempt, code);
                continue;
            }

            // exists() 与写入之间可能被其他请求抢占，insert_if_absent 在写锁内复查
            if self.store.insert_if_absent(&code, target) {
                debug!("Generated short code {} after {} attempt(s)", code, attempt + 1);
                return Ok(code);
            }
            debug!("Short code {} claimed concurrently on attempt {}", code, attempt);
        }

        warn!(
            "Short code generation exhausted after {} attempts",
            self.max_retries
        );
        Err(CodelinkError::generation_exhausted(format!(
            "no unique short code found after {} attempts",
            self.max_retries
        )))
    }

    /// Look up the target behind `code`. Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// - `EmptyInput` if `code` is empty after trimming
    /// - `NotFound` if no entry exists
    pub fn resolve(&self, code: &str) -> Result<String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CodelinkError::empty_input("short code cannot be empty"));
        }

        self.store
            .get(code)
            .ok_or_else(|| CodelinkError::not_found(format!("short code '{}' not found", code)))
    }

    /// Whether `code` can never be issued, e.g. because a route shadows it.
    pub fn is_reserved(&self, code: &str) -> bool {
        self.reserved.iter().any(|r| r == code)
    }

    /// Number of stored entries.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    fn candidate(&self, target: &str, attempt: u32, tier: EntropyTier) -> String {
        match tier {
            EntropyTier::Base => self.derive(target, attempt),
            EntropyTier::Widened => self.derive(target, attempt.saturating_mul(2)),
            EntropyTier::Salted => {
                let salted = format!(
                    "{}{}{}",
                    target,
                    derive::INPUT_DELIMITER,
                    self.clock.now_nanos()
                );
                self.derive(&salted, attempt)
            }
        }
    }

    fn derive(&self, target: &str, attempt: u32) -> String {
        let timestamp = self.clock.now_nanos();
        let random = self.entropy.next_u64();
        derive_candidate(&self.format, target, timestamp, random, attempt)
    }
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("backend", &self.store.backend_name())
            .field("format", &self.format)
            .field("max_retries", &self.max_retries)
            .field("reserved", &self.reserved)
            .finish()
    }
}

/// Builder for [`CodeGenerator`]. Unset sources default to [`SystemClock`]
/// and [`ThreadRngSource`].
pub struct GeneratorBuilder {
    store: Arc<dyn CodeStore>,
    format: CodeFormat,
    max_retries: u32,
    reserved: Vec<String>,
    clock: Option<Arc<dyn Clock>>,
    entropy: Option<Arc<dyn EntropySource>>,
}

impl GeneratorBuilder {
    pub fn format(mut self, format: CodeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Codes treated as permanently taken.
    pub fn reserved<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = Some(entropy);
        self
    }

    pub fn build(self) -> CodeGenerator {
        CodeGenerator {
            store: self.store,
            format: self.format,
            max_retries: self.max_retries,
            reserved: self.reserved,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            entropy: self.entropy.unwrap_or_else(|| Arc::new(ThreadRngSource)),
        }
    }
}

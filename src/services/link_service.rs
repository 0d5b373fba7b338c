//! Link service
//!
//! Thin business layer between the HTTP handlers and the generator:
//! validates targets, then delegates to [`CodeGenerator`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::errors::{CodelinkError, Result};
use crate::generator::CodeGenerator;
use crate::storage::create_store;
use crate::utils::url_validator::{validate_url, validation_error_message};

/// Codes shadowed by fixed HTTP routes; the generator never issues them.
pub const RESERVED_CODES: &[&str] = &["shorten", "stats"];

/// Store statistics exposed on `/stats`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkStats {
    pub total_urls: usize,
    pub backend: &'static str,
}

pub struct LinkService {
    generator: Arc<CodeGenerator>,
}

impl LinkService {
    pub fn new(generator: Arc<CodeGenerator>) -> Self {
        Self { generator }
    }

    /// Build the store and generator described by `config`.
    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        let format = config.generator.code_format()?;
        let store = create_store(config.storage.backend, config.storage.initial_capacity);
        let generator = CodeGenerator::builder(store)
            .format(format)
            .max_retries(config.generator.max_retries)
            .reserved(RESERVED_CODES.iter().copied())
            .build();

        info!(
            "Link service ready: backend={}, code_length={}, max_retries={}",
            config.storage.backend, config.generator.code_length, config.generator.max_retries
        );
        Ok(Self::new(Arc::new(generator)))
    }

    /// Validate `long_url` and assign it a new short code.
    pub fn shorten(&self, long_url: &str) -> Result<String> {
        if long_url.trim().is_empty() {
            return Err(CodelinkError::empty_input("URL cannot be empty"));
        }
        validate_url(long_url).map_err(|e| {
            debug!("Rejected target {}: {}", long_url, e);
            CodelinkError::validation(validation_error_message(&e))
        })?;

        let code = self.generator.generate(long_url)?;
        debug!("Shortened {} -> {}", long_url, code);
        Ok(code)
    }

    pub fn resolve(&self, code: &str) -> Result<String> {
        self.generator.resolve(code)
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats {
            total_urls: self.generator.size(),
            backend: self.generator.store().backend_name(),
        }
    }
}

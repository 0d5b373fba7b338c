use std::sync::Arc;

use tracing::info;

use crate::config::StaticConfig;
use crate::errors::Result;
use crate::services::LinkService;

/// Components shared by every HTTP worker
pub struct StartupContext {
    pub link_service: Arc<LinkService>,
}

/// Build the store, generator and link service from configuration.
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let link_service = Arc::new(LinkService::from_config(config)?);
    info!(
        "Using {} store, codes of {} symbols from a {}-symbol alphabet",
        link_service.stats().backend,
        config.generator.code_length,
        config.generator.alphabet.chars().count()
    );
    Ok(StartupContext { link_service })
}

use tracing::warn;

use crate::services::LinkService;

/// Runs after the HTTP server stopped. Entries live only in memory, so the
/// count is logged before it is lost.
pub fn on_shutdown(link_service: &LinkService) {
    let stats = link_service.stats();
    warn!(
        "Server stopped, discarding {} in-memory link(s) from the {} store",
        stats.total_urls, stats.backend
    );
}

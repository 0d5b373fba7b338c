pub mod helpers;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use helpers::{ErrorResponse, error_response};
pub use redirect::RedirectService;
pub use shorten::{ShortenRequest, ShortenResponse, ShortenService};
pub use stats::StatsService;

use actix_web::web;

/// Register every public route.
///
/// `/stats` and `/shorten` are registered before the catch-all redirect; the
/// link service reserves those names so no issued code is shadowed by them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(ShortenService::shorten))
        .route("/stats", web::get().to(StatsService::stats))
        .route("/", web::get().to(RedirectService::missing_code))
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect));
}

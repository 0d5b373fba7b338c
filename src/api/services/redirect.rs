use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use crate::errors::CodelinkError;
use crate::services::LinkService;

use super::helpers::error_response;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match service.resolve(&code) {
            Ok(target) => {
                trace!("Redirecting {} -> {}", code, target);
                HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                    .insert_header(("Location", target))
                    .finish()
            }
            Err(CodelinkError::NotFound(msg)) => {
                debug!("Redirect link not found: {}", code);
                error_response(StatusCode::NOT_FOUND, "not_found", msg)
            }
            Err(CodelinkError::EmptyInput(msg)) => {
                error_response(StatusCode::BAD_REQUEST, "empty_code", msg)
            }
            Err(e) => error_response(e.http_status(), "internal_error", e.message()),
        }
    }

    /// `GET /` carries no code at all.
    pub async fn missing_code() -> impl Responder {
        error_response(
            StatusCode::BAD_REQUEST,
            "missing_code",
            "Short code is required",
        )
    }
}

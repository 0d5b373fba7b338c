use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::config::get_config;
use crate::errors::CodelinkError;
use crate::services::LinkService;

use super::helpers::error_response;

/// `POST /shorten` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
}

/// `POST /shorten` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Bytes,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with("application/json") {
            return error_response(
                StatusCode::BAD_REQUEST,
                "invalid_content_type",
                "Content-Type must be application/json",
            );
        }

        let payload: ShortenRequest = match serde_json::from_slice(&body) {
            Ok(p) => p,
            Err(e) => {
                trace!("Rejected shorten body: {}", e);
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_json",
                    format!("Invalid JSON body: {}", e),
                );
            }
        };

        match service.shorten(&payload.long_url) {
            Ok(code) => {
                let short_url = format!("{}/{}", Self::base_url(&req), code);
                HttpResponse::Created().json(ShortenResponse { short_url })
            }
            Err(e) => Self::error_from(&e),
        }
    }

    fn error_from(err: &CodelinkError) -> HttpResponse {
        let error = match err {
            CodelinkError::EmptyInput(_) => "empty_url",
            CodelinkError::Validation(_) => "invalid_url",
            CodelinkError::GenerationExhausted(_) => "generation_failed",
            _ => "internal_error",
        };
        if err.http_status().is_server_error() {
            error!("Shorten failed: {}", err);
        }
        error_response(err.http_status(), error, err.message())
    }

    /// `public_base_url` if configured, else scheme from `X-Forwarded-Proto`
    /// (default `http`) and the request's host.
    fn base_url(req: &HttpRequest) -> String {
        let config = get_config();
        if let Some(base) = config
            .server
            .public_base_url
            .as_deref()
            .filter(|b| !b.is_empty())
        {
            return base.trim_end_matches('/').to_string();
        }

        let scheme = req
            .headers()
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty())
            .unwrap_or("http");

        let host = req
            .headers()
            .get("host")
            .and_then(|h| h.to_str().ok())
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("localhost:{}", config.server.port));

        format!("{}://{}", scheme, host)
    }
}

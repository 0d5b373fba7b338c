use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};

use crate::services::LinkService;

pub struct StatsService;

impl StatsService {
    pub async fn stats(service: web::Data<Arc<LinkService>>) -> impl Responder {
        HttpResponse::Ok().json(service.stats())
    }
}

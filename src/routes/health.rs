use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::config::ServerConfig;

#[get("/health")]
pub async fn health(config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": config.app_name,
        "version": config.app_version,
    }))
}

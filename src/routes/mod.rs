use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod groomers;
pub mod health;
pub mod reviews;

/// Registers every API route. Mount inside the versioned scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(health::health)
        .service(groomers::create_groomer)
        .service(groomers::search_groomers)
        .service(groomers::get_groomer)
        .service(groomers::update_groomer)
        .service(groomers::delete_groomer)
        .service(groomers::record_booking)
        .service(groomers::recalculate_rating)
        .service(reviews::create_review)
        .service(reviews::list_reviews)
        .service(reviews::delete_review);
}

pub fn detail(status: actix_web::http::StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message.into() }))
}

/// Maps a service outcome to an HTTP response. `not_found` names the missing
/// resource in the 404 body.
pub fn error_response(err: ServiceError, not_found: &str) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        ServiceError::NotFound => detail(StatusCode::NOT_FOUND, not_found),
        ServiceError::InvalidInput(message) => detail(StatusCode::UNPROCESSABLE_ENTITY, message),
        ServiceError::PersistenceFailure => {
            detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn unprocessable<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = detail(
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
        err.to_string(),
    );
    InternalError::from_response(err, response).into()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| unprocessable(err))
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| unprocessable(err))
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| unprocessable(err))
}

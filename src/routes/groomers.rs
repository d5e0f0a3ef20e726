use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::GroomerId;
use crate::events::EventPublisher;
use crate::forms::groomers::{
    CreateGroomerForm, CreateGroomerPayload, SearchGroomersForm, UpdateGroomerForm,
    UpdateGroomerPayload,
};
use crate::repository::{DieselRepository, GroomerSearchQuery};
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::groomers::{
    create_groomer as create_groomer_service, delete_groomer as delete_groomer_service,
    get_groomer as get_groomer_service, record_booking as record_booking_service,
    search_groomers as search_groomers_service, update_groomer as update_groomer_service,
};
use crate::services::reviews::recalculate_rating as recalculate_rating_service;

const GROOMER_NOT_FOUND: &str = "Groomer not found";

#[post("/groomers")]
pub async fn create_groomer(
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
    web::Json(form): web::Json<CreateGroomerForm>,
) -> impl Responder {
    let payload: CreateGroomerPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e), GROOMER_NOT_FOUND),
    };

    match create_groomer_service(payload, repo.get_ref(), events.get_ref()) {
        Ok(groomer) => HttpResponse::Created().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[get("/groomers")]
pub async fn search_groomers(
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<SearchGroomersForm>,
) -> impl Responder {
    let query: GroomerSearchQuery = match form.try_into() {
        Ok(query) => query,
        Err(e) => return error_response(ServiceError::from(e), GROOMER_NOT_FOUND),
    };

    match search_groomers_service(query, repo.get_ref()) {
        Ok(groomers) => HttpResponse::Ok().json(groomers),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[get("/groomers/{groomer_id}")]
pub async fn get_groomer(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_groomer_service(groomer_id.into_inner(), repo.get_ref()) {
        Ok(groomer) => HttpResponse::Ok().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[put("/groomers/{groomer_id}")]
pub async fn update_groomer(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
    web::Json(form): web::Json<UpdateGroomerForm>,
) -> impl Responder {
    let payload: UpdateGroomerPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e), GROOMER_NOT_FOUND),
    };

    match update_groomer_service(
        groomer_id.into_inner(),
        payload,
        repo.get_ref(),
        events.get_ref(),
    ) {
        Ok(groomer) => HttpResponse::Ok().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[delete("/groomers/{groomer_id}")]
pub async fn delete_groomer(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
) -> impl Responder {
    match delete_groomer_service(groomer_id.into_inner(), repo.get_ref(), events.get_ref()) {
        Ok(groomer) => HttpResponse::Ok().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[post("/groomers/{groomer_id}/bookings")]
pub async fn record_booking(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
) -> impl Responder {
    match record_booking_service(groomer_id.into_inner(), repo.get_ref(), events.get_ref()) {
        Ok(groomer) => HttpResponse::Ok().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

#[post("/groomers/{groomer_id}/rating/recalculate")]
pub async fn recalculate_rating(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match recalculate_rating_service(groomer_id.into_inner(), repo.get_ref()) {
        Ok(groomer) => HttpResponse::Ok().json(groomer),
        Err(err) => error_response(err, GROOMER_NOT_FOUND),
    }
}

use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::types::{GroomerId, ReviewId};
use crate::events::EventPublisher;
use crate::forms::reviews::{CreateReviewForm, CreateReviewPayload, ListReviewsForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::reviews::{
    create_review as create_review_service, delete_review as delete_review_service,
    list_reviews as list_reviews_service,
};

#[post("/groomers/{groomer_id}/reviews")]
pub async fn create_review(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
    web::Json(form): web::Json<CreateReviewForm>,
) -> impl Responder {
    let payload: CreateReviewPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e), "Groomer not found"),
    };

    match create_review_service(
        groomer_id.into_inner(),
        payload,
        repo.get_ref(),
        events.get_ref(),
    ) {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => error_response(err, "Groomer not found"),
    }
}

#[get("/groomers/{groomer_id}/reviews")]
pub async fn list_reviews(
    groomer_id: web::Path<GroomerId>,
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<ListReviewsForm>,
) -> impl Responder {
    let query = match form.into_query(groomer_id.into_inner()) {
        Ok(query) => query,
        Err(e) => return error_response(ServiceError::from(e), "Groomer not found"),
    };

    match list_reviews_service(query, repo.get_ref()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err, "Groomer not found"),
    }
}

#[delete("/reviews/{review_id}")]
pub async fn delete_review(
    review_id: web::Path<ReviewId>,
    repo: web::Data<DieselRepository>,
    events: web::Data<EventPublisher>,
) -> impl Responder {
    match delete_review_service(review_id.into_inner(), repo.get_ref(), events.get_ref()) {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => error_response(err, "Review not found"),
    }
}

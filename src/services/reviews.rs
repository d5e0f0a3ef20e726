use serde_json::json;

use crate::domain::types::{GroomerId, ReviewId};
use crate::dto::groomers::GroomerDto;
use crate::dto::reviews::ReviewDto;
use crate::events::{EventPublisher, REVIEW_CREATED, REVIEW_DELETED};
use crate::forms::reviews::CreateReviewPayload;
use crate::repository::{ReviewListQuery, ReviewReader, ReviewWriter};

use super::{ServiceError, ServiceResult};

/// Records a review and refreshes the groomer's rating in the same unit of
/// work. Fails with `NotFound` when the groomer is missing or soft-deleted.
pub fn create_review<R>(
    groomer_id: GroomerId,
    payload: CreateReviewPayload,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<ReviewDto>
where
    R: ReviewWriter,
{
    let new_review = payload.into_new_review(groomer_id);
    let review = match repo.create_review(&new_review) {
        Ok(Some(review)) => review,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to create review: {e}");
            return Err(ServiceError::PersistenceFailure);
        }
    };

    events.info(
        REVIEW_CREATED,
        "Review created",
        json!({
            "review_id": review.id.to_string(),
            "groomer_id": review.groomer_id.to_string(),
            "booking_id": review.booking_id.to_string(),
            "rating": review.rating.get(),
        }),
    );
    Ok(review.into())
}

pub fn list_reviews<R>(query: ReviewListQuery, repo: &R) -> ServiceResult<Vec<ReviewDto>>
where
    R: ReviewReader,
{
    match repo.list_reviews(query) {
        Ok(reviews) => Ok(reviews.into_iter().map(ReviewDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            Err(ServiceError::PersistenceFailure)
        }
    }
}

/// Removes a review and refreshes the owning groomer's rating. Returns the
/// review as it was before deletion.
pub fn delete_review<R>(
    review_id: ReviewId,
    repo: &R,
    events: &EventPublisher,
) -> ServiceResult<ReviewDto>
where
    R: ReviewWriter,
{
    let review = match repo.delete_review(review_id) {
        Ok(Some(review)) => review,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to delete review: {e}");
            return Err(ServiceError::PersistenceFailure);
        }
    };

    events.info(
        REVIEW_DELETED,
        "Review deleted",
        json!({
            "review_id": review.id.to_string(),
            "groomer_id": review.groomer_id.to_string(),
        }),
    );
    Ok(review.into())
}

pub fn recalculate_rating<R>(groomer_id: GroomerId, repo: &R) -> ServiceResult<GroomerDto>
where
    R: ReviewWriter,
{
    match repo.recalculate_groomer_rating(groomer_id) {
        Ok(Some(groomer)) => Ok(groomer.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to recalculate groomer rating: {e}");
            Err(ServiceError::PersistenceFailure)
        }
    }
}

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::review::NewReview;
use crate::domain::types::{BookingId, GroomerId, ReviewComment, ReviewRating, UserId};
use crate::forms::{FormError, pagination};
use crate::repository::{Pagination, ReviewListQuery};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewForm {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReviewPayload {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: Option<ReviewComment>,
}

impl CreateReviewPayload {
    pub fn into_new_review(self, groomer_id: GroomerId) -> NewReview {
        NewReview::new(
            groomer_id,
            self.booking_id,
            self.user_id,
            self.rating,
            self.comment,
        )
    }
}

impl TryFrom<CreateReviewForm> for CreateReviewPayload {
    type Error = FormError;

    fn try_from(value: CreateReviewForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            booking_id: value.booking_id.into(),
            user_id: value.user_id.into(),
            rating: ReviewRating::new(value.rating)?,
            comment: value.comment.map(ReviewComment::new).transpose()?,
        })
    }
}

/// Query string accepted by the review listing endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListReviewsForm {
    #[validate(range(min = 0))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ListReviewsForm {
    pub fn into_query(self, groomer_id: GroomerId) -> Result<ReviewListQuery, FormError> {
        let pagination: Pagination = self.try_into()?;
        Ok(ReviewListQuery::new(groomer_id).paginate(pagination))
    }
}

impl TryFrom<ListReviewsForm> for Pagination {
    type Error = FormError;

    fn try_from(value: ListReviewsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        pagination(value.skip, value.limit)
    }
}

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BookingId, GroomerId, ReviewComment, ReviewId, ReviewRating, UserId};

/// Customer feedback for a single booking with a groomer.
///
/// Reviews are immutable once written; they are only ever created or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub groomer_id: GroomerId,
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: Option<ReviewComment>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Review`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub id: ReviewId,
    pub groomer_id: GroomerId,
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: Option<ReviewComment>,
    pub created_at: NaiveDateTime,
}

impl NewReview {
    /// Builds a review stamped with a fresh identifier and the current UTC time.
    pub fn new(
        groomer_id: GroomerId,
        booking_id: BookingId,
        user_id: UserId,
        rating: ReviewRating,
        comment: Option<ReviewComment>,
    ) -> Self {
        Self {
            id: ReviewId::generate(),
            groomer_id,
            booking_id,
            user_id,
            rating,
            comment,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn into_review(self) -> Review {
        Review {
            id: self.id,
            groomer_id: self.groomer_id,
            booking_id: self.booking_id,
            user_id: self.user_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

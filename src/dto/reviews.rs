use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::review::Review;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDto {
    pub review_id: String,
    pub groomer_id: String,
    pub booking_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            review_id: value.id.to_string(),
            groomer_id: value.groomer_id.to_string(),
            booking_id: value.booking_id.to_string(),
            user_id: value.user_id.to_string(),
            rating: value.rating.get(),
            comment: value.comment.map(|c| c.into_inner()),
            created_at: value.created_at,
        }
    }
}

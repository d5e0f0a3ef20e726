use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::domain::types::{
    BookingId, GroomerId, ReviewComment, ReviewId, ReviewRating, TypeConstraintError, UserId,
};

/// Diesel model representing a row in the `reviews` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: String,
    pub groomer_id: String,
    pub booking_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Review`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub id: String,
    pub groomer_id: String,
    pub booking_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Review> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from(review: Review) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::parse(&review.id)?,
            groomer_id: GroomerId::parse(&review.groomer_id)?,
            booking_id: BookingId::parse(&review.booking_id)?,
            user_id: UserId::parse(&review.user_id)?,
            rating: ReviewRating::new(review.rating)?,
            comment: review.comment.map(ReviewComment::new).transpose()?,
            created_at: review.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(review: &'a DomainNewReview) -> Self {
        Self {
            id: review.id.to_db_string(),
            groomer_id: review.groomer_id.to_db_string(),
            booking_id: review.booking_id.to_db_string(),
            user_id: review.user_id.to_db_string(),
            rating: review.rating.get(),
            comment: review.comment.as_ref().map(|c| c.as_str()),
            created_at: review.created_at,
        }
    }
}

use serde::Serialize;

use crate::domain::groomer::Groomer;

/// Groomer as exposed over the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroomerDto {
    pub groomer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub specialization: Option<String>,
    pub status: String,
    pub rating: f64,
    pub review_count: i32,
    pub complaint_count: i32,
    pub total_bookings_count: i32,
}

impl From<Groomer> for GroomerDto {
    fn from(value: Groomer) -> Self {
        Self {
            groomer_id: value.id.to_string(),
            first_name: value.first_name.into_inner(),
            last_name: value.last_name.into_inner(),
            location: value.location.into_inner(),
            specialization: value.specialization.map(|s| s.into_inner()),
            status: value.status.as_str().to_string(),
            rating: value.rating.get(),
            review_count: value.review_count.get(),
            complaint_count: value.complaint_count.get(),
            total_bookings_count: value.total_bookings_count.get(),
        }
    }
}

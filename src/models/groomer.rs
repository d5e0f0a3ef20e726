use diesel::prelude::*;

use crate::domain::groomer::{Groomer as DomainGroomer, GroomerUpdate, NewGroomer as DomainNewGroomer};
use crate::domain::types::{
    BookingCount, ComplaintCount, FirstName, GroomerId, GroomerRating, GroomerStatus, LastName,
    Location, ReviewCount, Specialization, TypeConstraintError,
};

/// Diesel model representing a row in the `groomers` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::groomers)]
pub struct Groomer {
    pub id: String,
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

/// Insertable form of [`Groomer`].
///
/// Status, rating and counters fall back to their column defaults.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::groomers)]
pub struct NewGroomer<'a> {
    pub id: String,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub location: &'a str,
    pub specialization: Option<&'a str>,
}

/// Patch of profile columns; `None` fields are skipped by Diesel.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::groomers)]
pub struct GroomerChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub location: Option<&'a str>,
    pub specialization: Option<Option<&'a str>>,
}

impl TryFrom<Groomer> for DomainGroomer {
    type Error = TypeConstraintError;

    fn try_from(groomer: Groomer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GroomerId::parse(&groomer.id)?,
            first_name: FirstName::new(groomer.first_name)?,
            last_name: LastName::new(groomer.last_name)?,
            location: Location::new(groomer.location)?,
            specialization: groomer.specialization.map(Specialization::new).transpose()?,
            status: GroomerStatus::try_from(groomer.status)?,
            rating: GroomerRating::new(groomer.rating)?,
            review_count: ReviewCount::new(groomer.review_count)?,
            complaint_count: ComplaintCount::new(groomer.complaint_count)?,
            total_bookings_count: BookingCount::new(groomer.total_bookings_count)?,
        })
    }
}

impl<'a> From<&'a DomainNewGroomer> for NewGroomer<'a> {
    fn from(groomer: &'a DomainNewGroomer) -> Self {
        Self {
            id: groomer.id.to_db_string(),
            first_name: groomer.first_name.as_str(),
            last_name: groomer.last_name.as_str(),
            location: groomer.location.as_str(),
            specialization: groomer.specialization.as_ref().map(|s| s.as_str()),
        }
    }
}

impl<'a> From<&'a GroomerUpdate> for GroomerChangeset<'a> {
    fn from(update: &'a GroomerUpdate) -> Self {
        Self {
            first_name: update.first_name.as_ref().map(|v| v.as_str()),
            last_name: update.last_name.as_ref().map(|v| v.as_str()),
            location: update.location.as_ref().map(|v| v.as_str()),
            specialization: update
                .specialization
                .as_ref()
                .map(|v| v.as_ref().map(|s| s.as_str())),
        }
    }
}

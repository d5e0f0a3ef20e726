use serde::{Deserialize, Serialize};

use crate::domain::rating::RatingAggregate;
use crate::domain::types::{
    BookingCount, ComplaintCount, FirstName, GroomerId, GroomerRating, GroomerStatus, LastName,
    Location, ReviewCount, Specialization, TypeConstraintError,
};

/// A grooming professional listed in the directory.
///
/// `rating` and `review_count` are derived from the groomer's reviews and are
/// only ever written by the rating recalculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Groomer {
    pub id: GroomerId,
    pub first_name: FirstName,
    pub last_name: LastName,
    pub location: Location,
    pub specialization: Option<Specialization>,
    pub status: GroomerStatus,
    pub rating: GroomerRating,
    pub review_count: ReviewCount,
    pub complaint_count: ComplaintCount,
    pub total_bookings_count: BookingCount,
}

impl Groomer {
    /// Visible to direct lookups: anything but soft-deleted.
    pub fn is_visible(&self) -> bool {
        !self.status.is_deleted()
    }

    /// Eligible for search results: only active groomers are listed.
    pub fn is_listed(&self) -> bool {
        self.status == GroomerStatus::Active
    }

    /// Marks the groomer as deleted. Re-deleting is a no-op.
    pub fn soft_delete(&mut self) -> Result<(), TypeConstraintError> {
        self.status = self.status.transition_to(GroomerStatus::Deleted)?;
        Ok(())
    }

    pub fn apply_aggregate(&mut self, aggregate: RatingAggregate) {
        self.rating = aggregate.rating;
        self.review_count = aggregate.review_count;
    }
}

/// Data required to insert a new [`Groomer`].
///
/// New groomers always start `active` with a zero rating and zeroed counters,
/// so those columns are not part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGroomer {
    pub id: GroomerId,
    pub first_name: FirstName,
    pub last_name: LastName,
    pub location: Location,
    pub specialization: Option<Specialization>,
}

impl NewGroomer {
    /// Builds a new groomer record with a freshly generated identifier.
    pub fn new(
        first_name: FirstName,
        last_name: LastName,
        location: Location,
        specialization: Option<Specialization>,
    ) -> Self {
        Self {
            id: GroomerId::generate(),
            first_name,
            last_name,
            location,
            specialization,
        }
    }

    /// The full record as it looks right after insertion.
    pub fn into_groomer(self) -> Groomer {
        Groomer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            location: self.location,
            specialization: self.specialization,
            status: GroomerStatus::Active,
            rating: GroomerRating::ZERO,
            review_count: ReviewCount::default(),
            complaint_count: ComplaintCount::default(),
            total_bookings_count: BookingCount::default(),
        }
    }
}

/// Partial update of a groomer's profile fields.
///
/// `None` leaves a field untouched. For `specialization`, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroomerUpdate {
    pub first_name: Option<FirstName>,
    pub last_name: Option<LastName>,
    pub location: Option<Location>,
    pub specialization: Option<Option<Specialization>>,
}

impl GroomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.location.is_none()
            && self.specialization.is_none()
    }

    /// Applies the present fields to `groomer`, leaving everything else as is.
    pub fn apply_to(&self, groomer: &mut Groomer) {
        if let Some(first_name) = &self.first_name {
            groomer.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            groomer.last_name = last_name.clone();
        }
        if let Some(location) = &self.location {
            groomer.location = location.clone();
        }
        if let Some(specialization) = &self.specialization {
            groomer.specialization = specialization.clone();
        }
    }
}

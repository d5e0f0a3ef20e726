use crate::db::{DbConnection, DbPool};
use crate::domain::groomer::{Groomer, GroomerUpdate, NewGroomer};
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{GroomerId, GroomerRating, ReviewId, TypeConstraintError};

pub use errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod groomer;
pub mod review;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    skip: i64,
    limit: i64,
}

impl Pagination {
    /// Validates `skip >= 0` and `1 <= limit <= 100`.
    pub fn new(skip: i64, limit: i64) -> Result<Self, TypeConstraintError> {
        if skip < 0 {
            return Err(TypeConstraintError::NegativeNumber("skip"));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(TypeConstraintError::OutOfRange {
                field: "limit",
                min: "1",
                max: "100",
            });
        }
        Ok(Self { skip, limit })
    }

    pub const fn skip(self) -> i64 {
        self.skip
    }

    pub const fn limit(self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_LIMIT,
        }
    }
}

/// Query parameters used when searching the groomer directory.
///
/// Only `active` groomers are ever returned. Text filters are
/// case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct GroomerSearchQuery {
    /// Filter by location substring.
    pub location: Option<String>,
    /// Filter by specialization substring.
    pub specialization: Option<String>,
    /// Inclusive lower bound on the aggregate rating.
    pub min_rating: Option<GroomerRating>,
    /// Pagination parameters.
    pub pagination: Pagination,
}

impl GroomerSearchQuery {
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
    pub fn specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }
    pub fn min_rating(mut self, min_rating: GroomerRating) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Query parameters for listing the reviews of one groomer.
#[derive(Debug, Clone)]
pub struct ReviewListQuery {
    /// Groomer identifier.
    pub groomer_id: GroomerId,
    /// Pagination parameters.
    pub pagination: Pagination,
}

impl ReviewListQuery {
    pub fn new(groomer_id: GroomerId) -> Self {
        Self {
            groomer_id,
            pagination: Pagination::default(),
        }
    }
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Read-only operations for groomer entities.
pub trait GroomerReader {
    /// Retrieve a groomer by id, treating soft-deleted groomers as absent.
    fn get_groomer_by_id(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>>;
    /// Search active groomers ordered by rating descending, then id ascending.
    fn search_groomers(&self, query: GroomerSearchQuery) -> RepositoryResult<Vec<Groomer>>;
}

/// Write operations for groomer entities.
pub trait GroomerWriter {
    /// Persist a new groomer and return the stored record.
    fn create_groomer(&self, groomer: &NewGroomer) -> RepositoryResult<Groomer>;
    /// Apply a partial update to a non-deleted groomer.
    fn update_groomer(
        &self,
        id: GroomerId,
        update: &GroomerUpdate,
    ) -> RepositoryResult<Option<Groomer>>;
    /// Mark a groomer as deleted. Already deleted groomers are accepted.
    fn soft_delete_groomer(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>>;
    /// Atomically add one to the booking counter of a non-deleted groomer.
    fn increment_booking_count(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>>;
}

/// Read-only operations for review entities.
pub trait ReviewReader {
    /// Retrieve a review by its identifier.
    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>>;
    /// List reviews newest first, ties broken by id ascending.
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>>;
}

/// Write operations for reviews and the rating aggregate they drive.
///
/// Every method recomputes the owning groomer's aggregate in the same
/// transaction as the review mutation.
pub trait ReviewWriter {
    /// Insert a review. Returns `None` without writing anything when the
    /// groomer is missing or soft-deleted.
    fn create_review(&self, review: &NewReview) -> RepositoryResult<Option<Review>>;
    /// Delete a review and return its pre-deletion snapshot.
    fn delete_review(&self, id: ReviewId) -> RepositoryResult<Option<Review>>;
    /// Recompute `rating` and `review_count` from the current review set.
    fn recalculate_groomer_rating(&self, groomer_id: GroomerId)
    -> RepositoryResult<Option<Groomer>>;
}

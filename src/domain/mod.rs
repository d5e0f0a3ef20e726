//! Persistence-independent domain model for groomers and their reviews.

pub mod groomer;
pub mod rating;
pub mod review;
pub mod types;

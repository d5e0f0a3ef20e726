//! Diesel row models and their conversions into domain types.

pub mod groomer;
pub mod review;

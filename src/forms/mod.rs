//! Inbound request shapes and their conversion into typed payloads.
//!
//! Forms are deserialized straight from JSON bodies or query strings, checked
//! with `validator`, then converted into payloads built from domain newtypes.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::repository::Pagination;

pub mod groomers;
pub mod reviews;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treats missing and whitespace-only text filters alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn pagination(skip: Option<i64>, limit: Option<i64>) -> Result<Pagination, FormError> {
    let defaults = Pagination::default();
    Ok(Pagination::new(
        skip.unwrap_or(defaults.skip()),
        limit.unwrap_or(defaults.limit()),
    )?)
}

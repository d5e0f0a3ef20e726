//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was not a well-formed UUID.
    #[error("{0} must be a valid UUID")]
    InvalidUuid(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value fell outside of its inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: &'static str,
        max: &'static str,
    },
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// A lifecycle status change that the state machine forbids.
    #[error("groomer status cannot change from {from} to {to}")]
    InvalidStatusTransition {
        from: GroomerStatus,
        to: GroomerStatus,
    },
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

fn require_max_chars(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, TypeConstraintError> {
    if value.chars().count() > max {
        Err(TypeConstraintError::TooLong { field, max })
    } else {
        Ok(value)
    }
}

/// Macro to generate newtypes around generated UUID identifiers.
macro_rules! uuid_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random (v4) identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses an identifier from its textual representation.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid($field))
            }

            /// Returns the raw `Uuid` backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }

            /// Canonical lowercase hyphenated form used in persistence.
            pub fn to_db_string(self) -> String {
                self.0.hyphenated().to_string()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }
    };
}

/// Non-empty, trimmed strings capped at a maximum number of characters.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            /// Constructs a trimmed, non-empty value within the length bound.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                require_max_chars(trimmed, $field, $max).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const ZERO: Self = Self(0);

            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

uuid_newtype!(GroomerId, "Unique identifier for a groomer.", "groomer_id");
uuid_newtype!(ReviewId, "Unique identifier for a review.", "review_id");
uuid_newtype!(BookingId, "Identifier of the booking a review refers to.", "booking_id");
uuid_newtype!(UserId, "Identifier of the user who wrote a review.", "user_id");

bounded_string_newtype!(FirstName, "Groomer first name.", "first_name", 100);
bounded_string_newtype!(LastName, "Groomer last name.", "last_name", 100);
bounded_string_newtype!(Location, "Free-text groomer location.", "location", 255);
bounded_string_newtype!(
    Specialization,
    "Free-text groomer specialization.",
    "specialization",
    255
);

non_negative_i32_newtype!(
    ReviewCount,
    "Number of reviews currently recorded for a groomer.",
    "review_count"
);
non_negative_i32_newtype!(
    ComplaintCount,
    "Number of complaints filed against a groomer.",
    "complaint_count"
);
non_negative_i32_newtype!(
    BookingCount,
    "Number of bookings a groomer has received.",
    "total_bookings_count"
);

/// Star rating attached to a single review, in the inclusive range [1, 5].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ReviewRating(i32);

impl ReviewRating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Constructs a validated review rating.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange {
                field: "rating",
                min: "1",
                max: "5",
            })
        }
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ReviewRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ReviewRating {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewRating> for i32 {
    fn from(value: ReviewRating) -> Self {
        value.0
    }
}

impl PartialEq<i32> for ReviewRating {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Aggregate groomer rating in the inclusive range [0.0, 5.0].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct GroomerRating(f64);

impl GroomerRating {
    pub const ZERO: Self = Self(0.0);

    /// Constructs a validated aggregate rating.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=5.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange {
                field: "rating",
                min: "0",
                max: "5",
            })
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for GroomerRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for GroomerRating {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroomerRating> for f64 {
    fn from(value: GroomerRating) -> Self {
        value.0
    }
}

impl PartialEq<f64> for GroomerRating {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<GroomerRating> for f64 {
    fn eq(&self, other: &GroomerRating) -> bool {
        *self == other.0
    }
}

/// Optional free-text review comment, capped at 500 characters.
///
/// Unlike names the comment is stored verbatim: surrounding whitespace is
/// preserved and an empty comment is allowed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ReviewComment(String);

impl ReviewComment {
    pub const MAX_LEN: usize = 500;

    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        require_max_chars(value.into(), "comment", Self::MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ReviewComment {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<&str> for ReviewComment {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Lifecycle status of a groomer profile.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroomerStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

impl GroomerStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Deleted => "deleted",
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// `deleted` is terminal; re-deleting is accepted so soft-delete stays
    /// idempotent.
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Deleted, Self::Deleted) => true,
            (Self::Deleted, _) => false,
            _ => true,
        }
    }

    /// Validates a transition and returns the new status.
    pub fn transition_to(self, next: Self) -> Result<Self, TypeConstraintError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TypeConstraintError::InvalidStatusTransition {
                from: self,
                to: next,
            })
        }
    }

    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl Display for GroomerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for GroomerStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "deleted" => Ok(Self::Deleted),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "groomer status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for GroomerStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<GroomerStatus> for String {
    fn from(value: GroomerStatus) -> Self {
        value.as_str().to_string()
    }
}

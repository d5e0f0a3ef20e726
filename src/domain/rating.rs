//! Rating aggregation over a groomer's reviews.
//!
//! The aggregate is always recomputed from the full set of current reviews
//! rather than adjusted incrementally, so it cannot drift from the review
//! table regardless of the order of inserts and deletes.

use crate::domain::types::{GroomerRating, ReviewCount, ReviewRating, TypeConstraintError};

/// Derived `(rating, review_count)` pair stored on a groomer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingAggregate {
    pub rating: GroomerRating,
    pub review_count: ReviewCount,
}

impl RatingAggregate {
    /// Aggregate of a groomer with no reviews: exactly 0.0 and 0.
    pub const EMPTY: Self = Self {
        rating: GroomerRating::ZERO,
        review_count: ReviewCount::ZERO,
    };

    /// Computes the mean rating rounded to two decimals and the exact count.
    pub fn from_ratings<I>(ratings: I) -> Result<Self, TypeConstraintError>
    where
        I: IntoIterator<Item = ReviewRating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0_i64, 0_usize), |(sum, count), rating| {
                (sum + i64::from(rating.get()), count + 1)
            });

        if count == 0 {
            return Ok(Self::EMPTY);
        }

        let review_count = i32::try_from(count)
            .map_err(|_| TypeConstraintError::InvalidValue(format!("review count: {count}")))?;
        let mean = sum as f64 / count as f64;

        Ok(Self {
            rating: GroomerRating::new(round_to_hundredths(mean))?,
            review_count: ReviewCount::new(review_count)?,
        })
    }
}

/// Rounds to two decimal places, resolving exact ties to the even digit.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[i32]) -> Vec<ReviewRating> {
        values
            .iter()
            .map(|value| ReviewRating::new(*value).unwrap())
            .collect()
    }

    #[test]
    fn empty_review_set_yields_zero() {
        let aggregate = RatingAggregate::from_ratings(Vec::new()).unwrap();
        assert_eq!(aggregate, RatingAggregate::EMPTY);
        assert_eq!(aggregate.rating, 0.0);
        assert_eq!(aggregate.review_count, 0);
    }

    #[test]
    fn averages_and_counts_reviews() {
        let aggregate = RatingAggregate::from_ratings(ratings(&[5, 4, 3, 5, 4])).unwrap();
        assert_eq!(aggregate.rating, 4.2);
        assert_eq!(aggregate.review_count, 5);
    }

    #[test]
    fn rounds_mean_to_two_decimals() {
        let aggregate = RatingAggregate::from_ratings(ratings(&[5, 4, 4])).unwrap();
        assert_eq!(aggregate.rating, 4.33);

        let aggregate = RatingAggregate::from_ratings(ratings(&[5, 5, 4])).unwrap();
        assert_eq!(aggregate.rating, 4.67);
    }

    #[test]
    fn exact_ties_round_to_even_hundredth() {
        // 33 / 8 = 4.125 and 29 / 8 = 3.625 are exact in binary.
        let aggregate =
            RatingAggregate::from_ratings(ratings(&[5, 5, 5, 5, 5, 4, 2, 2])).unwrap();
        assert_eq!(aggregate.rating, 4.12);

        let aggregate =
            RatingAggregate::from_ratings(ratings(&[5, 4, 3, 5, 4, 1, 2, 5])).unwrap();
        assert_eq!(aggregate.rating, 3.62);
    }

    #[test]
    fn single_review_sets_exact_rating() {
        let aggregate = RatingAggregate::from_ratings(ratings(&[1])).unwrap();
        assert_eq!(aggregate.rating, 1.0);
        assert_eq!(aggregate.review_count, 1);
    }
}

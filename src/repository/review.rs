use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::groomer::Groomer;
use crate::domain::rating::RatingAggregate;
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{GroomerId, ReviewId, ReviewRating};
use crate::models::groomer::Groomer as DbGroomer;
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::repository::groomer::find_visible_groomer;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ReviewListQuery, ReviewReader,
    ReviewWriter,
};

/// Recomputes a groomer's aggregate from its current reviews and stores it.
///
/// Must run on the connection of the transaction that changed the review set.
/// Returns `None` if no groomer row exists for `groomer_id`.
pub(crate) fn recalculate_rating(
    conn: &mut SqliteConnection,
    groomer_id: GroomerId,
) -> RepositoryResult<Option<Groomer>> {
    use crate::schema::{groomers, reviews};

    let groomer_key = groomer_id.to_db_string();

    let ratings = reviews::table
        .filter(reviews::groomer_id.eq(&groomer_key))
        .select(reviews::rating)
        .load::<i32>(conn)?
        .into_iter()
        .map(ReviewRating::new)
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = RatingAggregate::from_ratings(ratings)?;

    let updated = diesel::update(groomers::table.find(&groomer_key))
        .set((
            groomers::rating.eq(aggregate.rating.get()),
            groomers::review_count.eq(aggregate.review_count.get()),
        ))
        .get_result::<DbGroomer>(conn)
        .optional()?;

    let updated = updated.map(TryInto::try_into).transpose()?;
    Ok(updated)
}

impl ReviewReader for DieselRepository {
    fn get_review_by_id(&self, id: ReviewId) -> RepositoryResult<Option<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let review = reviews::table
            .find(id.to_db_string())
            .first::<DbReview>(&mut conn)
            .optional()?;

        let review = review.map(TryInto::try_into).transpose()?;
        Ok(review)
    }

    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let items = reviews::table
            .filter(reviews::groomer_id.eq(query.groomer_id.to_db_string()))
            .order((reviews::created_at.desc(), reviews::id.asc()))
            .offset(query.pagination.skip())
            .limit(query.pagination.limit())
            .load::<DbReview>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Review>, _>>()?;

        Ok(items)
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, review: &NewReview) -> RepositoryResult<Option<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        // BEGIN IMMEDIATE takes the write lock before the groomer lookup, so
        // concurrent submissions for one groomer recompute strictly in turn.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            if find_visible_groomer(conn, review.groomer_id)?.is_none() {
                return Ok(None);
            }

            let db_review: DbNewReview = review.into();
            let created = diesel::insert_into(reviews::table)
                .values(&db_review)
                .get_result::<DbReview>(conn)?;

            recalculate_rating(conn, review.groomer_id)?;

            let created: Review = created.try_into()?;
            Ok(Some(created))
        })
    }

    fn delete_review(&self, id: ReviewId) -> RepositoryResult<Option<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let Some(existing) = reviews::table
                .find(id.to_db_string())
                .first::<DbReview>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let snapshot: Review = existing.try_into()?;

            diesel::delete(reviews::table.find(id.to_db_string())).execute(conn)?;
            recalculate_rating(conn, snapshot.groomer_id)?;

            Ok(Some(snapshot))
        })
    }

    fn recalculate_groomer_rating(
        &self,
        groomer_id: GroomerId,
    ) -> RepositoryResult<Option<Groomer>> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            recalculate_rating(conn, groomer_id)
        })
    }
}

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::groomer::{Groomer, GroomerUpdate, NewGroomer};
use crate::domain::types::{GroomerId, GroomerStatus};
use crate::models::groomer::{
    Groomer as DbGroomer, GroomerChangeset, NewGroomer as DbNewGroomer,
};
use crate::repository::{
    DieselRepository, GroomerReader, GroomerSearchQuery, GroomerWriter, RepositoryError,
    RepositoryResult,
};

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Loads a groomer that is not soft-deleted, on an existing connection so it
/// can participate in a caller's transaction.
pub(crate) fn find_visible_groomer(
    conn: &mut SqliteConnection,
    id: GroomerId,
) -> RepositoryResult<Option<Groomer>> {
    use crate::schema::groomers;

    let groomer = groomers::table
        .filter(groomers::id.eq(id.to_db_string()))
        .filter(groomers::status.ne(GroomerStatus::Deleted.as_str()))
        .first::<DbGroomer>(conn)
        .optional()?;

    let groomer = groomer.map(TryInto::try_into).transpose()?;
    Ok(groomer)
}

impl GroomerReader for DieselRepository {
    fn get_groomer_by_id(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>> {
        let mut conn = self.conn()?;
        find_visible_groomer(&mut conn, id)
    }

    fn search_groomers(&self, query: GroomerSearchQuery) -> RepositoryResult<Vec<Groomer>> {
        use crate::schema::groomers;

        let mut conn = self.conn()?;

        let mut items = groomers::table
            .filter(groomers::status.eq(GroomerStatus::Active.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        // SQLite's LIKE folds ASCII case, which gives the case-insensitive match.
        if let Some(location) = &query.location {
            items = items.filter(
                groomers::location
                    .like(contains_pattern(location))
                    .escape('\\'),
            );
        }

        if let Some(specialization) = &query.specialization {
            items = items.filter(
                groomers::specialization
                    .like(contains_pattern(specialization))
                    .escape('\\'),
            );
        }

        if let Some(min_rating) = query.min_rating {
            items = items.filter(groomers::rating.ge(min_rating.get()));
        }

        let items = items
            .order((groomers::rating.desc(), groomers::id.asc()))
            .offset(query.pagination.skip())
            .limit(query.pagination.limit())
            .load::<DbGroomer>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Groomer>, _>>()?;

        Ok(items)
    }
}

impl GroomerWriter for DieselRepository {
    fn create_groomer(&self, groomer: &NewGroomer) -> RepositoryResult<Groomer> {
        use crate::schema::groomers;

        let mut conn = self.conn()?;
        let db_groomer: DbNewGroomer = groomer.into();

        let created = diesel::insert_into(groomers::table)
            .values(&db_groomer)
            .get_result::<DbGroomer>(&mut conn)?;

        let created: Groomer = created.try_into()?;
        Ok(created)
    }

    fn update_groomer(
        &self,
        id: GroomerId,
        update: &GroomerUpdate,
    ) -> RepositoryResult<Option<Groomer>> {
        use crate::schema::groomers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let Some(current) = find_visible_groomer(conn, id)? else {
                return Ok(None);
            };

            // Diesel rejects an empty changeset; nothing to write anyway.
            if update.is_empty() {
                return Ok(Some(current));
            }

            let changeset: GroomerChangeset = update.into();
            let updated = diesel::update(groomers::table.find(id.to_db_string()))
                .set(&changeset)
                .get_result::<DbGroomer>(conn)?;

            let updated: Groomer = updated.try_into()?;
            Ok(Some(updated))
        })
    }

    fn soft_delete_groomer(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>> {
        use crate::schema::groomers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let Some(current) = groomers::table
                .find(id.to_db_string())
                .first::<DbGroomer>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let mut groomer: Groomer = current.try_into()?;
            groomer.soft_delete()?;

            let updated = diesel::update(groomers::table.find(id.to_db_string()))
                .set(groomers::status.eq(groomer.status.as_str()))
                .get_result::<DbGroomer>(conn)?;

            let updated: Groomer = updated.try_into()?;
            Ok(Some(updated))
        })
    }

    fn increment_booking_count(&self, id: GroomerId) -> RepositoryResult<Option<Groomer>> {
        use crate::schema::groomers;

        let mut conn = self.conn()?;

        // Single UPDATE ... RETURNING: the increment happens in the database,
        // so concurrent bookings cannot overwrite each other.
        let updated = diesel::update(
            groomers::table
                .filter(groomers::id.eq(id.to_db_string()))
                .filter(groomers::status.ne(GroomerStatus::Deleted.as_str())),
        )
        .set(groomers::total_bookings_count.eq(groomers::total_bookings_count + 1))
        .get_result::<DbGroomer>(&mut conn)
        .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }
}

use diesel::prelude::*;
use diesel::sql_types::Text;

mod common;

#[derive(QueryableByName)]
struct Pragma {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn pooled_connections_use_wal_journal() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("connection");

    let pragma: Pragma = diesel::sql_query("PRAGMA journal_mode")
        .get_result(&mut conn)
        .expect("journal mode should be readable");
    assert_eq!(pragma.journal_mode.to_lowercase(), "wal");
}

#[test]
fn reviews_require_an_existing_groomer_row() {
    use grooming_service::schema::reviews;

    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("connection");

    let result = diesel::insert_into(reviews::table)
        .values((
            reviews::id.eq("00000000-0000-4000-8000-000000000001"),
            reviews::groomer_id.eq("00000000-0000-4000-8000-00000000dead"),
            reviews::booking_id.eq("00000000-0000-4000-8000-000000000002"),
            reviews::user_id.eq("00000000-0000-4000-8000-000000000003"),
            reviews::rating.eq(5),
            reviews::created_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn);

    assert!(result.is_err(), "foreign keys should be enforced");
}

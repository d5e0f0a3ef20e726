use std::thread;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use grooming_service::domain::groomer::GroomerUpdate;
use grooming_service::domain::review::NewReview;
use grooming_service::domain::types::{
    BookingId, FirstName, GroomerId, GroomerRating, GroomerStatus, Location, ReviewComment,
    ReviewId, ReviewRating, Specialization, UserId,
};
use grooming_service::repository::{
    DieselRepository, GroomerReader, GroomerSearchQuery, GroomerWriter, Pagination,
    ReviewListQuery, ReviewReader, ReviewWriter,
};
use grooming_service::schema::{groomers, reviews};

mod common;

fn review_for(groomer_id: GroomerId, rating: i32) -> NewReview {
    NewReview::new(
        groomer_id,
        BookingId::generate(),
        UserId::generate(),
        ReviewRating::new(rating).expect("valid rating"),
        Some(ReviewComment::new("Great job").expect("valid comment")),
    )
}

fn set_status(test_db: &common::TestDb, id: GroomerId, status: GroomerStatus) {
    let mut conn = test_db.pool().get().expect("connection");
    diesel::update(groomers::table.find(id.to_db_string()))
        .set(groomers::status.eq(status.as_str()))
        .execute(&mut conn)
        .expect("should update status");
}

fn set_rating(test_db: &common::TestDb, id: GroomerId, rating: f64) {
    let mut conn = test_db.pool().get().expect("connection");
    diesel::update(groomers::table.find(id.to_db_string()))
        .set(groomers::rating.eq(rating))
        .execute(&mut conn)
        .expect("should update rating");
}

#[test]
fn groomer_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let created = common::insert_groomer(&repo, "Jane", "Seattle", Some("Poodles"));
    assert_eq!(created.status, GroomerStatus::Active);
    assert_eq!(created.rating, 0.0);

    let fetched = repo
        .get_groomer_by_id(created.id)
        .expect("query should succeed")
        .expect("groomer should exist");
    assert_eq!(fetched, created);

    let update = GroomerUpdate {
        first_name: Some(FirstName::new("Joan").expect("valid name")),
        specialization: Some(None),
        ..Default::default()
    };
    let updated = repo
        .update_groomer(created.id, &update)
        .expect("update should succeed")
        .expect("groomer should exist");
    assert_eq!(updated.first_name, "Joan");
    assert_eq!(updated.last_name, "Smith");
    assert_eq!(updated.location, "Seattle");
    assert!(updated.specialization.is_none());

    let empty = repo
        .update_groomer(created.id, &GroomerUpdate::default())
        .expect("empty update should succeed")
        .expect("groomer should exist");
    assert_eq!(empty, updated);
}

#[test]
fn soft_delete_hides_groomer_but_keeps_row_and_reviews() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);
    repo.create_review(&review_for(groomer.id, 4))
        .expect("should create review")
        .expect("groomer should accept reviews");

    let deleted = repo
        .soft_delete_groomer(groomer.id)
        .expect("delete should succeed")
        .expect("groomer should exist");
    assert_eq!(deleted.status, GroomerStatus::Deleted);

    let again = repo
        .soft_delete_groomer(groomer.id)
        .expect("second delete should succeed")
        .expect("row is retained");
    assert_eq!(again.status, GroomerStatus::Deleted);

    assert!(repo.get_groomer_by_id(groomer.id).unwrap().is_none());
    assert!(
        repo.search_groomers(GroomerSearchQuery::default())
            .unwrap()
            .is_empty()
    );
    assert!(
        repo.update_groomer(
            groomer.id,
            &GroomerUpdate {
                location: Some(Location::new("Portland").unwrap()),
                ..Default::default()
            }
        )
        .unwrap()
        .is_none()
    );
    assert!(repo.increment_booking_count(groomer.id).unwrap().is_none());
    assert!(
        repo.create_review(&review_for(groomer.id, 5))
            .unwrap()
            .is_none()
    );

    let reviews = repo
        .list_reviews(ReviewListQuery::new(groomer.id))
        .expect("reviews should be listable");
    assert_eq!(reviews.len(), 1);

    let mut conn = test_db.pool().get().unwrap();
    let rows: i64 = groomers::table.count().get_result(&mut conn).unwrap();
    assert_eq!(rows, 1);

    assert!(
        repo.soft_delete_groomer(GroomerId::generate())
            .unwrap()
            .is_none()
    );
}

#[test]
fn search_filters_case_insensitively_and_orders_by_rating() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let seattle_poodles = common::insert_groomer(&repo, "A", "Seattle, WA", Some("Poodle cuts"));
    let seattle_cats = common::insert_groomer(&repo, "B", "north SEATTLE", Some("Cats"));
    let boston = common::insert_groomer(&repo, "C", "Boston", Some("Poodles"));
    let inactive = common::insert_groomer(&repo, "D", "Seattle", Some("Poodles"));
    set_status(&test_db, inactive.id, GroomerStatus::Inactive);

    set_rating(&test_db, seattle_poodles.id, 4.8);
    set_rating(&test_db, seattle_cats.id, 3.5);
    set_rating(&test_db, boston.id, 4.9);

    let found = repo
        .search_groomers(GroomerSearchQuery::default().location("seattle"))
        .unwrap();
    let ids: Vec<_> = found.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![seattle_poodles.id, seattle_cats.id]);

    let found = repo
        .search_groomers(GroomerSearchQuery::default().specialization("POODLE"))
        .unwrap();
    let ids: Vec<_> = found.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![boston.id, seattle_poodles.id]);

    let found = repo
        .search_groomers(
            GroomerSearchQuery::default().min_rating(GroomerRating::new(4.8).unwrap()),
        )
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = repo
        .search_groomers(GroomerSearchQuery::default().paginate(Pagination::new(2, 5).unwrap()))
        .unwrap();
    let ids: Vec<_> = found.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![seattle_cats.id]);

    let inactive_fetched = repo.get_groomer_by_id(inactive.id).unwrap();
    assert!(inactive_fetched.is_some());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    common::insert_groomer(&repo, "A", "Seattle", None);
    let literal = common::insert_groomer(&repo, "B", "100% Downtown", None);

    let found = repo
        .search_groomers(GroomerSearchQuery::default().location("%"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, literal.id);
}

#[test]
fn search_breaks_rating_ties_by_id() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let mut expected: Vec<_> = (0..4)
        .map(|i| common::insert_groomer(&repo, &format!("G{i}"), "Seattle", None).id)
        .collect();
    expected.sort();

    let ids: Vec<_> = repo
        .search_groomers(GroomerSearchQuery::default())
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn specialization_filter_skips_groomers_without_one() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    common::insert_groomer(&repo, "A", "Seattle", None);
    let with = common::insert_groomer(&repo, "B", "Seattle", Some("Large dogs"));

    let found = repo
        .search_groomers(GroomerSearchQuery::default().specialization("dog"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, with.id);
    assert_eq!(
        found[0].specialization,
        Some(Specialization::new("Large dogs").unwrap())
    );
}

#[test]
fn rating_follows_review_creation_and_deletion() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);

    let mut created = Vec::new();
    for rating in [5, 4, 3, 5, 4] {
        created.push(
            repo.create_review(&review_for(groomer.id, rating))
                .expect("should create review")
                .expect("groomer is visible"),
        );
    }

    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    assert_eq!(current.rating, 4.2);
    assert_eq!(current.review_count, 5);

    let three = created
        .iter()
        .find(|r| r.rating == 3)
        .expect("rating 3 review");
    let snapshot = repo
        .delete_review(three.id)
        .expect("delete should succeed")
        .expect("review should exist");
    assert_eq!(snapshot.id, three.id);
    assert!(repo.get_review_by_id(three.id).unwrap().is_none());

    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    assert_eq!(current.rating, 4.5);
    assert_eq!(current.review_count, 4);

    for review in created.iter().filter(|r| r.id != three.id) {
        repo.delete_review(review.id).unwrap().unwrap();
    }
    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    assert_eq!(current.rating, 0.0);
    assert_eq!(current.review_count, 0);

    assert!(repo.delete_review(three.id).unwrap().is_none());
}

#[test]
fn reviews_are_listed_newest_first() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);
    let other = common::insert_groomer(&repo, "John", "Seattle", None);

    let mut ids = Vec::new();
    for seconds in [100, 300, 200] {
        let mut review = review_for(groomer.id, 5);
        review.created_at = DateTime::from_timestamp(seconds, 0).unwrap().naive_utc();
        ids.push(repo.create_review(&review).unwrap().unwrap().id);
    }
    repo.create_review(&review_for(other.id, 1)).unwrap().unwrap();

    let listed: Vec<ReviewId> = repo
        .list_reviews(ReviewListQuery::new(groomer.id))
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, vec![ids[1], ids[2], ids[0]]);

    let page: Vec<ReviewId> = repo
        .list_reviews(ReviewListQuery::new(groomer.id).paginate(Pagination::new(1, 1).unwrap()))
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(page, vec![ids[2]]);
}

#[test]
fn booking_counter_increments_atomically() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo: DieselRepository = repo.clone();
            let id = groomer.id;
            thread::spawn(move || {
                for _ in 0..5 {
                    repo.increment_booking_count(id)
                        .expect("increment should succeed")
                        .expect("groomer is visible");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread should finish");
    }

    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    assert_eq!(current.total_bookings_count, 40);
    assert!(
        repo.increment_booking_count(GroomerId::generate())
            .unwrap()
            .is_none()
    );
}

#[test]
fn concurrent_reviews_keep_the_aggregate_consistent() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);

    let ratings = [5, 4, 3, 5, 4, 1, 2, 5];
    let handles: Vec<_> = ratings
        .iter()
        .map(|&rating| {
            let repo = repo.clone();
            let id = groomer.id;
            thread::spawn(move || {
                repo.create_review(&review_for(id, rating))
                    .expect("create should succeed")
                    .expect("groomer is visible");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread should finish");
    }

    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    let expected = ratings.iter().sum::<i32>() as f64 / ratings.len() as f64;
    assert_eq!(current.review_count, ratings.len() as i32);
    assert_eq!(current.rating, (expected * 100.0).round_ties_even() / 100.0);
}

#[test]
fn recalculate_repairs_a_drifted_aggregate() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);
    for rating in [2, 3, 3] {
        repo.create_review(&review_for(groomer.id, rating))
            .unwrap()
            .unwrap();
    }
    set_rating(&test_db, groomer.id, 5.0);

    let repaired = repo
        .recalculate_groomer_rating(groomer.id)
        .unwrap()
        .expect("groomer exists");
    assert_eq!(repaired.rating, 2.67);
    assert_eq!(repaired.review_count, 3);

    assert!(
        repo.recalculate_groomer_rating(GroomerId::generate())
            .unwrap()
            .is_none()
    );
}

#[test]
fn failed_recalculation_rolls_back_review_deletion() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let mut conn = test_db.pool().get().unwrap();

    // A stored row that no longer satisfies the domain constraints makes the
    // recalculation step fail after the delete has executed.
    let groomer_id = GroomerId::generate();
    diesel::insert_into(groomers::table)
        .values((
            groomers::id.eq(groomer_id.to_db_string()),
            groomers::first_name.eq(""),
            groomers::last_name.eq("Smith"),
            groomers::location.eq("Seattle"),
        ))
        .execute(&mut conn)
        .unwrap();

    let review_id = ReviewId::generate();
    diesel::insert_into(reviews::table)
        .values((
            reviews::id.eq(review_id.to_db_string()),
            reviews::groomer_id.eq(groomer_id.to_db_string()),
            reviews::booking_id.eq(BookingId::generate().to_db_string()),
            reviews::user_id.eq(UserId::generate().to_db_string()),
            reviews::rating.eq(4),
            reviews::created_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)
        .unwrap();
    drop(conn);

    assert!(repo.delete_review(review_id).is_err());
    assert!(
        repo.get_review_by_id(review_id)
            .unwrap()
            .is_some(),
        "review should survive the rolled back transaction"
    );
}

#[test]
fn deleting_unknown_review_leaves_aggregate_untouched() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", None);
    for rating in [3, 4] {
        repo.create_review(&review_for(groomer.id, rating))
            .unwrap()
            .unwrap();
    }

    assert!(repo.delete_review(ReviewId::generate()).unwrap().is_none());

    let current = repo.get_groomer_by_id(groomer.id).unwrap().unwrap();
    assert_eq!(current.rating, 3.5);
    assert_eq!(current.review_count, 2);
    let listed = repo.list_reviews(ReviewListQuery::new(groomer.id)).unwrap();
    assert_eq!(listed.len(), 2);
}

#[test]
fn profile_update_keeps_rating_and_counters() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let groomer = common::insert_groomer(&repo, "Jane", "Seattle", Some("Cats"));
    for rating in [5, 4] {
        repo.create_review(&review_for(groomer.id, rating))
            .unwrap()
            .unwrap();
    }
    repo.increment_booking_count(groomer.id).unwrap().unwrap();

    let update = GroomerUpdate {
        location: Some(Location::new("X").unwrap()),
        ..Default::default()
    };
    let updated = repo.update_groomer(groomer.id, &update).unwrap().unwrap();

    assert_eq!(updated.location, "X");
    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.last_name, "Smith");
    assert_eq!(
        updated.specialization,
        Some(Specialization::new("Cats").unwrap())
    );
    assert_eq!(updated.rating, 4.5);
    assert_eq!(updated.review_count, 2);
    assert_eq!(updated.total_bookings_count, 1);
    assert_eq!(updated.complaint_count, 0);
}

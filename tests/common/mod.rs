//! Helpers for integration tests.

#![allow(dead_code)]

use grooming_service::db::{DbPool, establish_connection_pool, run_migrations};
use grooming_service::domain::groomer::{Groomer, NewGroomer};
use grooming_service::domain::types::{FirstName, LastName, Location, Specialization};
use grooming_service::repository::{DieselRepository, GroomerWriter};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn new_groomer(first_name: &str, location: &str, specialization: Option<&str>) -> NewGroomer {
    NewGroomer::new(
        FirstName::new(first_name).expect("valid first name"),
        LastName::new("Smith").expect("valid last name"),
        Location::new(location).expect("valid location"),
        specialization.map(|s| Specialization::new(s).expect("valid specialization")),
    )
}

pub fn insert_groomer(
    repo: &DieselRepository,
    first_name: &str,
    location: &str,
    specialization: Option<&str>,
) -> Groomer {
    repo.create_groomer(&new_groomer(first_name, location, specialization))
        .expect("should create groomer")
}

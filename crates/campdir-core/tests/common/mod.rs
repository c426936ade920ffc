#![allow(dead_code)]

use std::path::Path;

use campdir_core::{
    models::{CampTerms, NewCamp, Taxonomy, Term},
    Database,
};
use jiff::civil::Date;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Opens a second raw connection on the same file, for writes the store
/// itself would never issue.
pub fn raw_connection(path: &Path) -> rusqlite::Connection {
    rusqlite::Connection::open(path).expect("Failed to open raw connection")
}

pub fn term(db: &mut Database, axis: Taxonomy, name: &str) -> Term {
    db.create_term(axis, name, None, true)
        .expect("Failed to create term")
}

/// An approved camp with the given profile tweaks applied.
pub fn approved(name: &str) -> NewCamp {
    NewCamp {
        approved: true,
        ..NewCamp::named(name)
    }
}

pub fn priced(mut camp: NewCamp, min: u32, max: u32) -> NewCamp {
    camp.min_price = Some(min);
    camp.max_price = Some(max);
    camp
}

pub fn season(mut camp: NewCamp, opening: Date, closing: Date) -> NewCamp {
    camp.opening_day = Some(opening);
    camp.closing_day = Some(closing);
    camp
}

pub fn linked(mut camp: NewCamp, terms: CampTerms) -> NewCamp {
    camp.terms = terms;
    camp
}

pub fn insert(db: &mut Database, camp: NewCamp) -> u64 {
    db.create_camp(camp).expect("Failed to create camp").id
}

//! `qualidados-store` — SQLite adapter behind the reconciler's directory
//! seam.
//!
//! Owns the schema for sites, cohorts and enrollments, implements
//! find-or-create the way the engine calls it (find immediately before any
//! create), and loads the DB-side inputs the engines consume.

pub mod error;
pub mod load;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use store::Store;

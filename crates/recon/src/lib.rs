//! `qualidados-recon` — cross-source cohort reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records from the legacy extract and
//! the live store, returns one reconciled, provenance-annotated record set.
//! The only side effect is the documented find-or-create write through the
//! [`directory::CohortDirectory`] seam when dry-run is off.

pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod summary;

pub use config::ReconcilerConfig;
pub use directory::{CohortDirectory, MemoryDirectory};
pub use engine::{reconcile, ReconcileOptions};
pub use error::ReconError;
pub use model::{ReconReport, ReconciledCohort, Resolution, SourceRecord};

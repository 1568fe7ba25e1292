//! `qualidados-taxonomy` — course-name normalization engine.
//!
//! Pure engine crate: repairs OCR-corrupted course names and maps free-text
//! names onto a stable taxonomy. No IO dependencies.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use cache::{CorrectionCache, MemoryCache, NoCache};
pub use config::TaxonomyConfig;
pub use engine::Taxonomy;
pub use error::TaxonomyError;
pub use model::NormalizedCourse;

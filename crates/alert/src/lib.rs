//! `qualidados-alert` — threshold-driven operational alert engine.
//!
//! Pure engine crate: evaluates a fixed, ordered rule table against
//! pre-aggregated per-module metric summaries. No IO, safe with partial or
//! zeroed metrics.

pub mod config;
pub mod engine;
pub mod model;
pub mod rules;

pub use config::AlertThresholds;
pub use engine::{evaluate_all, evaluate_edu, evaluate_lab, evaluate_trilhas, evaluate_work};
pub use model::{Alert, AlertLevel, ProgramMetrics};

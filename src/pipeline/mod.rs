pub mod board;
pub mod gate;
pub mod gemini;
pub mod orchestrator;
pub mod parser;
pub mod presenter;
pub mod prompt;
pub mod types;

use thiserror::Error;

/// Failures across the insight pipeline.
///
/// Only `InvalidMeasurement`, `EmptyQuery`, `SaveInFlight` and
/// `NotReadyToSave` are user-actionable; generation failures degrade
/// per-section instead of aborting a run.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Please describe your symptoms first")]
    EmptyQuery,

    #[error("Generation service unreachable: {0}")]
    Connection(String),

    #[error("Generation request failed: {0}")]
    Generation(String),

    #[error("Generation service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("No response received from the generation service")]
    NoResponse,

    #[error("Generation API key not configured")]
    MissingApiKey,

    #[error("A save for this record is already in flight")]
    SaveInFlight,

    #[error("Nothing to save yet: insight sections are not resolved")]
    NotReadyToSave,

    #[error("No active profile")]
    NoProfile,

    #[error("Internal state lock poisoned")]
    LockPoisoned,

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

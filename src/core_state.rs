//! Transport-agnostic application state.
//!
//! `CoreState` is the single shared state behind the REST surface.
//! Wrapped in `Arc` at startup; the active profile sits behind a
//! `RwLock` so concurrent reads (most handlers) never block each
//! other.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::config;
use crate::db;
use crate::models::UserProfile;
use crate::pipeline::gate::SaveGuard;
use crate::pipeline::gemini::{GeminiClient, GenerateText};
use crate::pipeline::orchestrator::InsightEngine;
use crate::pipeline::InsightError;

// ═══════════════════════════════════════════════════════════
// CoreState — shared by all REST handlers
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    /// Active intake profile. `None` until the wizard submits one.
    profile: RwLock<Option<UserProfile>>,
    /// Path of the application database.
    pub db_path: PathBuf,
    /// Stage orchestration, section board and streaming presenter.
    engine: Arc<InsightEngine>,
    /// One-shot save flag for the current run's record.
    save_guard: SaveGuard,
}

impl CoreState {
    pub fn new(generator: Arc<dyn GenerateText>, db_path: PathBuf) -> Self {
        Self {
            profile: RwLock::new(None),
            db_path,
            engine: Arc::new(InsightEngine::new(generator)),
            save_guard: SaveGuard::new(),
        }
    }

    /// Build state for the configured environment: data directory
    /// created, Gemini client from `WELLORA_GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, InsightError> {
        let data_dir = config::app_data_dir();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| InsightError::Generation(format!("Cannot create data dir: {e}")))?;
        let client = GeminiClient::from_env().ok_or(InsightError::MissingApiKey)?;
        Ok(Self::new(Arc::new(client), config::database_path()))
    }

    // ── Profile access ──────────────────────────────────────

    pub fn profile(&self) -> Result<Option<UserProfile>, CoreError> {
        Ok(self
            .profile
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    /// The active profile, or `NoActiveProfile` when intake has not
    /// completed yet.
    pub fn require_profile(&self) -> Result<UserProfile, CoreError> {
        self.profile()?.ok_or(CoreError::NoActiveProfile)
    }

    pub fn set_profile(&self, profile: UserProfile) -> Result<(), CoreError> {
        let mut guard = self.profile.write().map_err(|_| CoreError::LockPoisoned)?;
        *guard = Some(profile);
        Ok(())
    }

    // ── Collaborators ───────────────────────────────────────

    pub fn engine(&self) -> &Arc<InsightEngine> {
        &self.engine
    }

    pub fn save_guard(&self) -> &SaveGuard {
        &self.save_guard
    }

    /// Open a database connection. Handlers open per-request; SQLite
    /// serializes writers internally.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No active profile")]
    NoActiveProfile,
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

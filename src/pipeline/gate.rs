//! Persistence gate — decides when the insight aggregate may be saved.
//!
//! Guidance, Medicines and Remedies must have resolved (successfully
//! or with their fixed failure message); Facilities is best-effort
//! because the location hint may be legitimately absent. Submission is
//! single-shot per run: a second save while one is in flight is
//! rejected rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use uuid::Uuid;

use super::board::SectionBoard;
use super::orchestrator::RunContext;
use super::types::{LocationHint, SectionId};
use super::InsightError;
use crate::models::InsightRecord;

/// True once every mandatory section has resolved text.
pub fn can_save(board: &SectionBoard) -> bool {
    SectionId::MANDATORY
        .iter()
        .all(|&section| board.resolved(section))
}

/// Assemble the persisted aggregate from the finished run.
///
/// Fails with `NotReadyToSave` while the gate is closed. Section text
/// is taken from the resolved raw values, not the revealed prefixes,
/// so an early save never truncates a still-streaming section.
pub fn assemble_record(
    ctx: &RunContext,
    board: &SectionBoard,
    location: Option<LocationHint>,
) -> Result<InsightRecord, InsightError> {
    if !can_save(board) {
        return Err(InsightError::NotReadyToSave);
    }

    let facilities = board
        .resolved(SectionId::Facilities)
        .then(|| board.raw_text(SectionId::Facilities).to_string());

    Ok(InsightRecord {
        id: Uuid::new_v4(),
        profile_id: ctx.profile.id,
        bmi: ctx.assessment.score,
        bmi_category: ctx.assessment.category,
        symptoms: ctx.query.clone(),
        guidance: board.raw_text(SectionId::Guidance).to_string(),
        medicines: board.raw_text(SectionId::Medicines).to_string(),
        remedies: board.raw_text(SectionId::Remedies).to_string(),
        facilities,
        location: location.map(LocationHint::to_record_string),
        created_at: Local::now().naive_local(),
    })
}

/// Single-shot in-flight flag for record submission.
pub struct SaveGuard {
    in_flight: AtomicBool,
}

impl SaveGuard {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claim the in-flight slot. A duplicate submission while a save
    /// is outstanding is rejected.
    pub fn begin(&self) -> Result<(), InsightError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| InsightError::SaveInFlight)
    }

    /// Release the slot after success or failure. On failure the
    /// record stays client-side and the save can be retried.
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl Default for SaveGuard {
    fn default() -> Self {
        Self::new()
    }
}

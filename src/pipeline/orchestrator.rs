//! Insight orchestrator — sequential stage dispatch per run.
//!
//! Stages run strictly in order: Guidance → Medicines → Remedies →
//! Facilities (only when a location hint is present). Each stage call
//! suspends the traversal; reveal loops keep ticking independently.
//! A run identifier guards every board mutation so a run superseded
//! mid-flight can never write into a newer run's sections.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use super::board::{BoardSnapshot, SectionBoard};
use super::gemini::GenerateText;
use super::presenter::StreamPresenter;
use super::prompt;
use super::types::{LocationHint, SectionId};
use super::InsightError;
use crate::models::{Assessment, UserProfile};

/// Inputs for one orchestration run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub profile: UserProfile,
    pub assessment: Assessment,
    pub query: String,
}

/// Handle for an accepted run.
///
/// Dropping the ticket does not cancel the run; the handle exists so
/// callers (tests, shutdown paths) can await settlement.
#[derive(Debug)]
pub struct RunTicket {
    pub run_id: u64,
    pub handle: JoinHandle<()>,
}

/// Owns the section board and drives runs against the generator.
pub struct InsightEngine {
    generator: Arc<dyn GenerateText>,
    board: Arc<Mutex<SectionBoard>>,
    presenter: StreamPresenter,
    run_seq: AtomicU64,
    location: Mutex<Option<LocationHint>>,
    current: Mutex<Option<RunContext>>,
}

impl InsightEngine {
    pub fn new(generator: Arc<dyn GenerateText>) -> Self {
        let board = Arc::new(Mutex::new(SectionBoard::new()));
        let presenter = StreamPresenter::new(Arc::clone(&board));
        Self {
            generator,
            board,
            presenter,
            run_seq: AtomicU64::new(0),
            location: Mutex::new(None),
            current: Mutex::new(None),
        }
    }

    /// Shared board handle, for tests and snapshot consumers.
    pub fn board(&self) -> Arc<Mutex<SectionBoard>> {
        Arc::clone(&self.board)
    }

    /// Read-only view of the current run's sections.
    pub fn snapshot(&self) -> Result<BoardSnapshot, InsightError> {
        Ok(self.lock_board()?.snapshot())
    }

    /// Record the one-shot location hint from the host environment.
    pub fn set_location(&self, hint: LocationHint) -> Result<(), InsightError> {
        *self.location.lock().map_err(|_| InsightError::LockPoisoned)? = Some(hint);
        Ok(())
    }

    pub fn location(&self) -> Option<LocationHint> {
        self.location.lock().ok().and_then(|guard| *guard)
    }

    /// Inputs of the most recently started run, for record assembly.
    pub fn current_context(&self) -> Option<RunContext> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }

    /// Validate and launch a fresh run.
    ///
    /// Resets all four sections to Idle (retiring any reveal loop from
    /// the previous run) before the first stage dispatches. An empty
    /// trimmed query fails immediately with no network call.
    pub fn start_run(self: &Arc<Self>, ctx: RunContext) -> Result<RunTicket, InsightError> {
        if ctx.query.trim().is_empty() {
            return Err(InsightError::EmptyQuery);
        }

        // Allocate the id under the board lock so concurrent launches
        // reset the board in id order.
        let run_id = {
            let mut board = self.lock_board()?;
            let run_id = self.run_seq.fetch_add(1, Ordering::SeqCst) + 1;
            board.reset_for_run(run_id);
            run_id
        };
        *self.current.lock().map_err(|_| InsightError::LockPoisoned)? = Some(ctx.clone());

        tracing::info!(run_id, "insight run starting");
        let engine = Arc::clone(self);
        let handle = tokio::spawn(async move {
            engine.drive_run(run_id, ctx).await;
        });

        Ok(RunTicket { run_id, handle })
    }

    async fn drive_run(self: Arc<Self>, run_id: u64, ctx: RunContext) {
        let mandatory: [(SectionId, String); 3] = [
            (
                SectionId::Guidance,
                prompt::guidance_prompt(&ctx.profile, &ctx.query),
            ),
            (
                SectionId::Medicines,
                prompt::medicines_prompt(&ctx.profile, &ctx.query),
            ),
            (
                SectionId::Remedies,
                prompt::remedies_prompt(&ctx.profile, &ctx.query),
            ),
        ];

        for (section, stage_prompt) in mandatory {
            if !self.run_stage(run_id, section, stage_prompt).await {
                return;
            }
        }

        // Facilities is best-effort: no location hint means skip, not fail.
        match self.location() {
            Some(hint) => {
                let stage_prompt = prompt::facilities_prompt(hint);
                if !self.run_stage(run_id, SectionId::Facilities, stage_prompt).await {
                    return;
                }
            }
            None => {
                tracing::debug!(run_id, "no location hint; skipping facilities stage");
            }
        }

        if let Ok(mut board) = self.board.lock() {
            board.mark_settled(run_id);
        }
        tracing::info!(run_id, "insight run settled");
    }

    /// Dispatch one stage and apply its outcome.
    ///
    /// Returns false when this run has been superseded and the
    /// traversal should stop.
    async fn run_stage(&self, run_id: u64, section: SectionId, stage_prompt: String) -> bool {
        let result = self.generate_stage(stage_prompt).await;
        match result {
            Ok(text) => {
                let started = self.presenter.start_stream(run_id, section, &text);
                if !started {
                    tracing::debug!(run_id, section = section.as_str(), "stale stage result discarded");
                }
                started
            }
            Err(e) => {
                tracing::warn!(
                    run_id,
                    section = section.as_str(),
                    error = %e,
                    "stage generation failed"
                );
                match self.board.lock() {
                    Ok(mut board) => {
                        let applied = board.fail_section(run_id, section);
                        if !applied {
                            tracing::debug!(
                                run_id,
                                section = section.as_str(),
                                "stale stage failure discarded"
                            );
                        }
                        applied
                    }
                    Err(_) => false,
                }
            }
        }
    }

    /// Run the blocking generator call off the async executor.
    async fn generate_stage(&self, stage_prompt: String) -> Result<String, InsightError> {
        let generator = Arc::clone(&self.generator);
        tokio::task::spawn_blocking(move || generator.generate(&stage_prompt))
            .await
            .map_err(|e| InsightError::Generation(e.to_string()))?
    }

    fn lock_board(&self) -> Result<MutexGuard<'_, SectionBoard>, InsightError> {
        self.board.lock().map_err(|_| InsightError::LockPoisoned)
    }
}

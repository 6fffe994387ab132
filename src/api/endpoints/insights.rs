//! Insight run endpoints: launch, location hint, section snapshots
//! and the persistence gate.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::db::repository::insert_record;
use crate::metrics::compute_assessment;
use crate::models::{InsightRecord, Measurement};
use crate::pipeline::board::BoardSnapshot;
use crate::pipeline::gate;
use crate::pipeline::orchestrator::{InsightEngine, RunContext};
use crate::pipeline::types::LocationHint;

#[derive(Deserialize)]
pub struct RunRequest {
    pub query: String,
    pub measurement: Measurement,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub run_id: u64,
}

/// Launch a fresh insight run. Supersedes any run in progress.
pub async fn start_run(
    State(core): State<Arc<CoreState>>,
    Json(req): Json<RunRequest>,
) -> Result<(StatusCode, Json<RunResponse>), ApiError> {
    let profile = core.require_profile()?;
    let assessment = compute_assessment(&req.measurement)?;

    let ticket = core.engine().start_run(RunContext {
        profile,
        assessment,
        query: req.query,
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(RunResponse {
            run_id: ticket.run_id,
        }),
    ))
}

/// Record the one-shot location hint for the Facilities stage.
pub async fn set_location(
    State(core): State<Arc<CoreState>>,
    Json(hint): Json<LocationHint>,
) -> Result<StatusCode, ApiError> {
    core.engine().set_location(hint)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Snapshot of the current run's sections, including revealed text,
/// parsed segments and the save gate.
pub async fn sections(
    State(core): State<Arc<CoreState>>,
) -> Result<Json<BoardSnapshot>, ApiError> {
    Ok(Json(core.engine().snapshot()?))
}

/// Persist the current run as a record. Single-shot: a concurrent
/// save is rejected, and the guard reopens on failure so the client
/// can retry.
pub async fn save(
    State(core): State<Arc<CoreState>>,
) -> Result<(StatusCode, Json<InsightRecord>), ApiError> {
    core.require_profile()?;
    let ctx = core
        .engine()
        .current_context()
        .ok_or(ApiError::NotReadyToSave)?;

    core.save_guard().begin()?;
    let result = persist_record(&core, core.engine(), &ctx);
    core.save_guard().finish();

    let record = result?;
    tracing::info!(record_id = %record.id, "Insight record saved");
    Ok((StatusCode::CREATED, Json(record)))
}

fn persist_record(
    core: &CoreState,
    engine: &Arc<InsightEngine>,
    ctx: &RunContext,
) -> Result<InsightRecord, ApiError> {
    let record = {
        let board = engine.board();
        let board = board
            .lock()
            .map_err(|_| ApiError::Internal("lock poisoned".into()))?;
        gate::assemble_record(ctx, &board, engine.location())?
    };

    let conn = core.open_db()?;
    insert_record(&conn, &record)?;
    Ok(record)
}

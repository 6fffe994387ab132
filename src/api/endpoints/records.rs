//! Saved record listing and deletion, scoped to the active profile.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::db::repository::{delete_record, get_records_for_profile};
use crate::models::InsightRecord;

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<InsightRecord>,
}

/// All saved records for the active profile, newest first.
pub async fn list(State(core): State<Arc<CoreState>>) -> Result<Json<RecordsResponse>, ApiError> {
    let profile = core.require_profile()?;
    let conn = core.open_db()?;
    let records = get_records_for_profile(&conn, profile.id)?;
    Ok(Json(RecordsResponse { records }))
}

/// Delete one record. Only the owning profile's records are visible
/// to this endpoint; anything else is a 404.
pub async fn delete(
    State(core): State<Arc<CoreState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let profile = core.require_profile()?;
    let record_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::BadRequest("Invalid record id".into()))?;

    let conn = core.open_db()?;
    delete_record(&conn, profile.id, record_id)?;
    tracing::info!(record_id = %record_id, "Insight record deleted");
    Ok(StatusCode::NO_CONTENT)
}

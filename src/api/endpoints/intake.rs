//! Intake wizard endpoints: profile capture and BMI assessment.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::db::repository::upsert_profile;
use crate::metrics::compute_assessment;
use crate::models::{Assessment, Gender, Measurement, UserProfile};

const MAX_AGE: u32 = 120;

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

/// Submit (or resubmit) the intake profile.
///
/// Resubmission keeps the existing profile id so saved records stay
/// attached to their owner.
pub async fn put_profile(
    State(core): State<Arc<CoreState>>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".into()));
    }
    if req.age == 0 || req.age > MAX_AGE {
        return Err(ApiError::BadRequest(format!(
            "Age must be between 1 and {MAX_AGE}"
        )));
    }

    let profile = match core.profile()? {
        Some(mut existing) => {
            existing.name = name.to_string();
            existing.age = req.age;
            existing.gender = req.gender;
            existing
        }
        None => UserProfile::new(name, req.age, req.gender),
    };

    let conn = core.open_db()?;
    upsert_profile(&conn, &profile)?;
    core.set_profile(profile.clone())?;
    tracing::info!(profile_id = %profile.id, "Intake profile stored");

    Ok(Json(profile))
}

pub async fn get_profile(
    State(core): State<Arc<CoreState>>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(core.require_profile()?))
}

/// Compute the BMI assessment for a unit-tagged measurement.
///
/// Pure computation; nothing is stored and no generation runs.
pub async fn assessment(
    State(_core): State<Arc<CoreState>>,
    Json(measurement): Json<Measurement>,
) -> Result<Json<Assessment>, ApiError> {
    Ok(Json(compute_assessment(&measurement)?))
}

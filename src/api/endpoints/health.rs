use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config;
use crate::core_state::CoreState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub profile_active: bool,
    pub version: &'static str,
}

pub async fn check(State(core): State<Arc<CoreState>>) -> Json<HealthResponse> {
    let profile_active = core.profile().map(|p| p.is_some()).unwrap_or(false);
    Json(HealthResponse {
        status: "ok",
        profile_active,
        version: config::APP_VERSION,
    })
}

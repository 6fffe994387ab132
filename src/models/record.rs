use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::BmiCategory;

/// The persisted insight aggregate: assessment + query + the four
/// section texts + serialized location, stamped at creation.
///
/// Constructed by the persistence gate once the mandatory sections
/// have resolved; immutable after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub symptoms: String,
    pub guidance: String,
    pub medicines: String,
    pub remedies: String,
    /// Absent when no location hint was available for the run.
    pub facilities: Option<String>,
    /// "latitude, longitude" as acquired from the host environment.
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

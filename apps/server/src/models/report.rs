//! Delivery report models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::report;

/// Metadata of a generated report. The file itself is served by name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportView {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub aircraft_code: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    pub fn from_model(m: report::Model, aircraft_code: &str) -> Self {
        ReportView {
            id: m.id,
            aircraft_id: m.aircraft_id,
            aircraft_code: aircraft_code.to_string(),
            file_name: m.file_name,
            generated_at: m.generated_at,
        }
    }
}

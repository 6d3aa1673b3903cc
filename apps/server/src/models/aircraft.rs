//! Aircraft domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{AircraftType, decode};
use super::part::PartView;
use super::report::ReportView;
use super::stage::StageView;
use super::test_record::TestView;
use crate::db::aircraft::AircraftGraph;
use crate::entity::aircraft;
use crate::error::AppResult;

/// Request body for registering an aircraft.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAircraftRequest {
    /// Unique business code (e.g. "A1").
    pub code: String,
    pub model: String,
    /// One of: commercial, military.
    pub aircraft_type: String,
    pub capacity: i32,
    pub range: i32,
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAircraftRequest {
    pub code: Option<String>,
    pub model: Option<String>,
    pub aircraft_type: Option<String>,
    pub capacity: Option<i32>,
    pub range: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AircraftView {
    pub id: Uuid,
    pub code: String,
    pub model: String,
    pub aircraft_type: AircraftType,
    pub capacity: i32,
    pub range: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<aircraft::Model> for AircraftView {
    type Error = crate::error::AppError;

    fn try_from(m: aircraft::Model) -> AppResult<Self> {
        Ok(AircraftView {
            id: m.id,
            aircraft_type: decode(&m.aircraft_type)?,
            code: m.code,
            model: m.model_name,
            capacity: m.capacity,
            range: m.flight_range,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Aircraft together with its whole production graph.
///
/// Parts are ordered by id, stages by sequence (precedence order), tests by the time
/// they were performed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AircraftDetail {
    pub aircraft: AircraftView,
    pub parts: Vec<PartView>,
    pub stages: Vec<StageView>,
    pub tests: Vec<TestView>,
    pub report: Option<ReportView>,
}

impl AircraftDetail {
    /// Convert a loaded graph into its display form, keeping the graph's ordering.
    pub fn from_graph(graph: AircraftGraph) -> AppResult<Self> {
        let code = graph.aircraft.code.clone();

        let parts = graph
            .parts
            .into_iter()
            .map(|p| PartView::from_model(p, &code))
            .collect::<AppResult<Vec<_>>>()?;

        let stages = graph
            .stages
            .into_iter()
            .map(|(s, staff)| StageView::from_model(s, &code, staff))
            .collect::<AppResult<Vec<_>>>()?;

        let tests = graph
            .tests
            .into_iter()
            .map(|(t, staff)| TestView::from_model(t, &code, staff.map(|s| s.name)))
            .collect::<AppResult<Vec<_>>>()?;

        let report = graph.report.map(|r| ReportView::from_model(r, &code));

        Ok(AircraftDetail {
            aircraft: AircraftView::try_from(graph.aircraft)?,
            parts,
            stages,
            tests,
            report,
        })
    }
}

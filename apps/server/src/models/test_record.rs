//! Aircraft test models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{TestResult, TestType, decode};
use crate::entity::test_record;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterTestRequest {
    /// Business code of the tested aircraft.
    pub aircraft_code: String,
    /// Staff member responsible for the test.
    pub staff_id: Uuid,
    /// One of: electrical, hydraulic, aerodynamic.
    pub test_type: String,
    /// One of: approved, rejected.
    pub result: String,
    pub observation: Option<String>,
    /// Defaults to the time of registration.
    pub performed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestView {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub aircraft_code: String,
    pub staff_id: Uuid,
    pub staff_name: Option<String>,
    pub test_type: TestType,
    pub result: TestResult,
    pub observation: Option<String>,
    pub performed_at: DateTime<Utc>,
}

impl TestView {
    pub fn from_model(
        m: test_record::Model,
        aircraft_code: &str,
        staff_name: Option<String>,
    ) -> AppResult<Self> {
        Ok(TestView {
            id: m.id,
            aircraft_id: m.aircraft_id,
            aircraft_code: aircraft_code.to_string(),
            staff_id: m.staff_id,
            staff_name,
            test_type: decode(&m.test_type)?,
            result: decode(&m.result)?,
            observation: m.observation,
            performed_at: m.performed_at,
        })
    }
}

//! Stage domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{StageStatus, decode};
use super::staff::StaffRef;
use crate::entity::{stage, staff};
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateStageRequest {
    pub aircraft_id: Uuid,
    pub name: String,
    /// Opaque deadline token, stored as given.
    pub deadline: String,
    /// Defaults to pending.
    pub status: Option<String>,
    #[serde(default)]
    pub staff_ids: Vec<Uuid>,
}

/// Replaces the stage's fields. `staff_ids`, when present, replaces the whole staff set.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStageRequest {
    pub name: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
    pub staff_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignStaffRequest {
    pub staff_id: Uuid,
}

/// Stage with its aircraft code and responsible staff denormalised for display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StageView {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub aircraft_code: String,
    /// Precedence key among the aircraft's stages.
    pub sequence: i32,
    pub name: String,
    pub deadline: String,
    pub status: StageStatus,
    /// Sorted by name.
    pub staff: Vec<StaffRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StageView {
    pub fn from_model(
        m: stage::Model,
        aircraft_code: &str,
        staff: Vec<staff::Model>,
    ) -> AppResult<Self> {
        let mut staff: Vec<StaffRef> = staff.into_iter().map(StaffRef::from).collect();
        staff.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(StageView {
            id: m.id,
            aircraft_id: m.aircraft_id,
            aircraft_code: aircraft_code.to_string(),
            sequence: m.sequence,
            status: decode(&m.status)?,
            name: m.name,
            deadline: m.deadline,
            staff,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }

    /// Comma-joined staff names, or `None` when nobody is assigned.
    pub fn responsible_names(&self) -> Option<String> {
        if self.staff.is_empty() {
            None
        } else {
            Some(
                self.staff
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }
}

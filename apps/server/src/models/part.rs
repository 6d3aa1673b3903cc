//! Part domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{PartStatus, PartType, decode};
use crate::entity::part;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePartRequest {
    pub aircraft_id: Uuid,
    pub name: String,
    /// One of: national, imported.
    pub part_type: String,
    pub supplier: String,
    /// Defaults to in_production.
    pub status: Option<String>,
}

/// Edits descriptive fields only; status changes go through the status endpoint.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePartRequest {
    pub name: Option<String>,
    pub part_type: Option<String>,
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetPartStatusRequest {
    /// One of: in_production, in_transit, ready.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartView {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub aircraft_code: String,
    pub name: String,
    pub part_type: PartType,
    pub supplier: String,
    pub status: PartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartView {
    pub fn from_model(m: part::Model, aircraft_code: &str) -> AppResult<Self> {
        Ok(PartView {
            id: m.id,
            aircraft_id: m.aircraft_id,
            aircraft_code: aircraft_code.to_string(),
            part_type: decode(&m.part_type)?,
            status: decode(&m.status)?,
            name: m.name,
            supplier: m.supplier,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

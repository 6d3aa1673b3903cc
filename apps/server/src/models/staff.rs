//! Staff registry models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{PermissionLevel, decode};
use crate::entity::staff;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateStaffRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub username: String,
    /// One of: operator, engineer, administrator.
    pub permission_level: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub username: Option<String>,
    pub permission_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffView {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub username: String,
    pub permission_level: PermissionLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<staff::Model> for StaffView {
    type Error = crate::error::AppError;

    fn try_from(m: staff::Model) -> AppResult<Self> {
        Ok(StaffView {
            id: m.id,
            permission_level: decode(&m.permission_level)?,
            name: m.name,
            phone: m.phone,
            address: m.address,
            username: m.username,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Minimal staff reference embedded in stage and test views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffRef {
    pub id: Uuid,
    pub name: String,
}

impl From<staff::Model> for StaffRef {
    fn from(m: staff::Model) -> Self {
        StaffRef {
            id: m.id,
            name: m.name,
        }
    }
}

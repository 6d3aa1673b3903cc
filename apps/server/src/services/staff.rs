//! Staff registry service.

use chrono::Utc;
use sea_orm::Set;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, DbPool, staff as staff_db, test_records as test_db};
use crate::entity::staff;
use crate::error::{AppError, AppResult};
use crate::models::enums::parse_input;
use crate::models::{
    CreateStaffRequest, PermissionLevel, StaffView, StoredEnum, UpdateStaffRequest,
    required_text,
};

#[derive(Clone)]
pub struct StaffService {
    pool: DbPool,
}

impl StaffService {
    pub fn new(pool: DbPool) -> Self {
        StaffService { pool }
    }

    pub async fn create(&self, req: CreateStaffRequest) -> AppResult<StaffView> {
        let level: PermissionLevel = parse_input(&req.permission_level)?;

        let created = staff_db::insert(
            self.pool.connection(),
            Uuid::now_v7(),
            staff_db::NewStaff {
                name: required_text("name", &req.name)?,
                phone: required_text("phone", &req.phone)?,
                address: required_text("address", &req.address)?,
                username: required_text("username", &req.username)?,
                permission_level: level.as_str().to_string(),
            },
            Utc::now(),
        )
        .await?;

        info!(staff_id = %created.id, username = %created.username, level = %level, "Staff registered");

        StaffView::try_from(created)
    }

    /// All staff ordered by name.
    pub async fn list(&self) -> AppResult<Vec<StaffView>> {
        staff_db::list(self.pool.connection())
            .await?
            .into_iter()
            .map(StaffView::try_from)
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<StaffView> {
        StaffView::try_from(self.find(id).await?)
    }

    /// Partial update; a changed username is re-checked for uniqueness.
    pub async fn update(&self, id: Uuid, req: UpdateStaffRequest) -> AppResult<StaffView> {
        let current = self.find(id).await?;

        let mut active: staff::ActiveModel = current.into();
        if let Some(name) = req.name.as_deref() {
            active.name = Set(required_text("name", name)?);
        }
        if let Some(phone) = req.phone.as_deref() {
            active.phone = Set(required_text("phone", phone)?);
        }
        if let Some(address) = req.address.as_deref() {
            active.address = Set(required_text("address", address)?);
        }
        if let Some(username) = req.username.as_deref() {
            active.username = Set(required_text("username", username)?);
        }
        if let Some(level) = req.permission_level.as_deref() {
            let level: PermissionLevel = parse_input(level)?;
            active.permission_level = Set(level.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let updated = staff_db::update(self.pool.connection(), active).await?;

        info!(staff_id = %id, "Staff updated");

        StaffView::try_from(updated)
    }

    /// Remove a staff member and their stage assignments. Members responsible for a
    /// recorded test are kept.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let current = staff_db::find_for_update(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff", id))?;
        if test_db::exists_for_staff(&txn, id).await? {
            warn!(staff_id = %id, "Staff delete rejected: referenced by recorded tests");
            return Err(AppError::Conflict(format!(
                "Staff {} is responsible for recorded tests and cannot be deleted",
                id
            )));
        }
        staff_db::delete(&txn, current).await?;

        db::commit(txn).await?;

        info!(staff_id = %id, "Staff deleted");

        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<staff::Model> {
        staff_db::find_by_id(self.pool.connection(), id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff", id))
    }
}

//! Database operations for the staff registry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::staff::{self, ActiveModel, Entity as Staff};
use crate::error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation};

/// Column values for a new staff row.
pub struct NewStaff {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub username: String,
    pub permission_level: String,
}

fn username_conflict(username: &str) -> AppError {
    AppError::Conflict(format!("Username '{}' is already taken", username))
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new: NewStaff,
    now: DateTime<Utc>,
) -> AppResult<staff::Model> {
    let username = new.username.clone();
    let model = ActiveModel {
        id: Set(id),
        name: Set(new.name),
        phone: Set(new.phone),
        address: Set(new.address),
        username: Set(new.username),
        permission_level: Set(new.permission_level),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            username_conflict(&username)
        } else {
            AppError::Database(format!("Failed to insert staff: {}", e))
        }
    })
}

pub async fn update<C: ConnectionTrait>(db: &C, active: ActiveModel) -> AppResult<staff::Model> {
    let username = match &active.username {
        ActiveValue::Set(u) | ActiveValue::Unchanged(u) => u.clone(),
        ActiveValue::NotSet => String::new(),
    };

    active.update(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            username_conflict(&username)
        } else {
            AppError::Database(format!("Failed to update staff: {}", e))
        }
    })
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<staff::Model>> {
    Staff::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get staff: {}", e)))
}

/// Row-locked lookup, used before deleting a member.
pub async fn find_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> AppResult<Option<staff::Model>> {
    Staff::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to lock staff: {}", e)))
}

/// Resolve every id or report the first one that does not exist.
pub async fn find_all_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> AppResult<Vec<staff::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = Staff::find()
        .filter(staff::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get staff: {}", e)))?;

    if let Some(missing) = ids.iter().find(|id| !rows.iter().any(|r| r.id == **id)) {
        return Err(AppError::not_found("Staff", missing));
    }

    Ok(rows)
}

/// Staff names for a set of ids, used to denormalise listings.
pub async fn names_by_id<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = Staff::find()
        .filter(staff::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get staff names: {}", e)))?;

    Ok(rows.into_iter().map(|s| (s.id, s.name)).collect())
}

/// All staff ordered by name.
pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<staff::Model>> {
    Staff::find()
        .order_by_asc(staff::Column::Name)
        .order_by_asc(staff::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list staff: {}", e)))
}

/// Delete a staff member. Members still recorded on a test cannot be removed.
pub async fn delete<C: ConnectionTrait>(db: &C, member: staff::Model) -> AppResult<()> {
    let id = member.id;
    member.delete(db).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::Conflict(format!(
                "Staff {} is responsible for recorded tests and cannot be deleted",
                id
            ))
        } else {
            AppError::Database(format!("Failed to delete staff: {}", e))
        }
    })?;

    Ok(())
}

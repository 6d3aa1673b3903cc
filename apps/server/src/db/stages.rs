//! Database queries for stages and their staff assignments.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::stage::{self, ActiveModel, Entity as Stage};
use crate::entity::stage_staff::{self, Entity as StageStaff};
use crate::entity::{aircraft, staff};
use crate::error::{AppError, AppResult, is_unique_violation};

/// Column values for a new stage row.
pub struct NewStage {
    pub aircraft_id: Uuid,
    pub sequence: i32,
    pub name: String,
    pub deadline: String,
    pub status: String,
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new: NewStage,
    now: DateTime<Utc>,
) -> AppResult<stage::Model> {
    let model = ActiveModel {
        id: Set(id),
        aircraft_id: Set(new.aircraft_id),
        sequence: Set(new.sequence),
        name: Set(new.name),
        deadline: Set(new.deadline),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert stage: {}", e)))
}

pub async fn update<C: ConnectionTrait>(db: &C, active: ActiveModel) -> AppResult<stage::Model> {
    active
        .update(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update stage: {}", e)))
}

/// Set a stage's status, bumping `updated_at`.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    stage: stage::Model,
    status: &str,
) -> AppResult<stage::Model> {
    let mut active: ActiveModel = stage.into();
    active.status = Set(status.to_string());
    active.updated_at = Set(Utc::now());
    update(db, active).await
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<stage::Model>> {
    Stage::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get stage: {}", e)))
}

/// Next free sequence for an aircraft: one past the highest, starting at 1.
pub async fn next_sequence<C: ConnectionTrait>(db: &C, aircraft_id: Uuid) -> AppResult<i32> {
    let last = Stage::find()
        .filter(stage::Column::AircraftId.eq(aircraft_id))
        .order_by_desc(stage::Column::Sequence)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to read stage sequence: {}", e)))?;

    Ok(last.map(|s| s.sequence + 1).unwrap_or(1))
}

/// Stages of one aircraft in precedence order.
pub async fn for_aircraft<C: ConnectionTrait>(
    db: &C,
    aircraft_id: Uuid,
) -> AppResult<Vec<stage::Model>> {
    Stage::find()
        .filter(stage::Column::AircraftId.eq(aircraft_id))
        .order_by_asc(stage::Column::Sequence)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get stages for aircraft: {}", e)))
}

/// Siblings ordered before `sequence`, lowest first.
pub async fn earlier_siblings<C: ConnectionTrait>(
    db: &C,
    aircraft_id: Uuid,
    sequence: i32,
) -> AppResult<Vec<stage::Model>> {
    Stage::find()
        .filter(stage::Column::AircraftId.eq(aircraft_id))
        .filter(stage::Column::Sequence.lt(sequence))
        .order_by_asc(stage::Column::Sequence)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get earlier stages: {}", e)))
}

/// All stages, most recent first, each with its owning aircraft.
pub async fn list_with_aircraft<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<(stage::Model, Option<aircraft::Model>)>> {
    Stage::find()
        .find_also_related(aircraft::Entity)
        .order_by_desc(stage::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list stages: {}", e)))
}

/// Responsible staff of each given stage.
pub async fn staff_for_stages<C: ConnectionTrait>(
    db: &C,
    stage_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<staff::Model>>> {
    if stage_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = StageStaff::find()
        .filter(stage_staff::Column::StageId.is_in(stage_ids))
        .find_also_related(staff::Entity)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get stage staff: {}", e)))?;

    let mut by_stage: HashMap<Uuid, Vec<staff::Model>> = HashMap::new();
    for (link, member) in rows {
        if let Some(member) = member {
            by_stage.entry(link.stage_id).or_default().push(member);
        }
    }

    Ok(by_stage)
}

/// Link a staff member to a stage. Linking an already-assigned member is a no-op.
pub async fn add_staff<C: ConnectionTrait>(db: &C, stage_id: Uuid, staff_id: Uuid) -> AppResult<()> {
    let existing = StageStaff::find_by_id((stage_id, staff_id))
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get stage staff: {}", e)))?;

    if existing.is_some() {
        return Ok(());
    }

    let link = stage_staff::ActiveModel {
        stage_id: Set(stage_id),
        staff_id: Set(staff_id),
    };

    match StageStaff::insert(link).exec(db).await {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Ok(()),
        Err(e) => Err(AppError::Database(format!(
            "Failed to assign staff to stage: {}",
            e
        ))),
    }
}

/// Replace a stage's staff set wholesale.
pub async fn replace_staff<C: ConnectionTrait>(
    db: &C,
    stage_id: Uuid,
    staff_ids: &[Uuid],
) -> AppResult<()> {
    StageStaff::delete_many()
        .filter(stage_staff::Column::StageId.eq(stage_id))
        .exec(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to clear stage staff: {}", e)))?;

    for staff_id in staff_ids {
        add_staff(db, stage_id, *staff_id).await?;
    }

    Ok(())
}

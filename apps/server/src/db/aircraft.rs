//! Database queries for aircraft and their production graph.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::aircraft::{self, ActiveModel, Entity as Aircraft};
use crate::entity::{part, report, stage, staff, test_record};
use crate::error::{AppError, AppResult, is_unique_violation};

/// Column values for a new aircraft row.
pub struct NewAircraft {
    pub code: String,
    pub model_name: String,
    pub aircraft_type: String,
    pub capacity: i32,
    pub flight_range: i32,
}

/// Everything stored under one aircraft, loaded together.
#[derive(Debug, Clone)]
pub struct AircraftGraph {
    pub aircraft: aircraft::Model,
    /// Ascending id.
    pub parts: Vec<part::Model>,
    /// Ascending sequence, each with its responsible staff.
    pub stages: Vec<(stage::Model, Vec<staff::Model>)>,
    /// Ascending performed_at then id, each with its responsible staff if still present.
    pub tests: Vec<(test_record::Model, Option<staff::Model>)>,
    pub report: Option<report::Model>,
}

fn code_conflict(code: &str) -> AppError {
    AppError::Conflict(format!("Aircraft code '{}' is already registered", code))
}

/// Insert a new aircraft. A duplicate code surfaces as `Conflict`.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new: NewAircraft,
    now: DateTime<Utc>,
) -> AppResult<aircraft::Model> {
    let code = new.code.clone();
    let model = ActiveModel {
        id: Set(id),
        code: Set(new.code),
        model_name: Set(new.model_name),
        aircraft_type: Set(new.aircraft_type),
        capacity: Set(new.capacity),
        flight_range: Set(new.flight_range),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            code_conflict(&code)
        } else {
            AppError::Database(format!("Failed to insert aircraft: {}", e))
        }
    })
}

/// Persist changed columns. A duplicate code surfaces as `Conflict`.
pub async fn update<C: ConnectionTrait>(db: &C, active: ActiveModel) -> AppResult<aircraft::Model> {
    let code = match &active.code {
        ActiveValue::Set(code) | ActiveValue::Unchanged(code) => code.clone(),
        ActiveValue::NotSet => String::new(),
    };
    active.update(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            code_conflict(&code)
        } else {
            AppError::Database(format!("Failed to update aircraft: {}", e))
        }
    })
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<aircraft::Model>> {
    Aircraft::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get aircraft: {}", e)))
}

pub async fn find_by_code<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> AppResult<Option<aircraft::Model>> {
    Aircraft::find()
        .filter(aircraft::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get aircraft by code: {}", e)))
}

/// Load an aircraft row with an exclusive row lock held until the transaction ends.
///
/// Every operation that reads sibling stages or the readiness of the aggregate and then
/// writes takes this lock first, so those operations serialise per aircraft.
pub async fn find_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> AppResult<Option<aircraft::Model>> {
    Aircraft::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to lock aircraft: {}", e)))
}

/// All aircraft, most recently registered first.
pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<aircraft::Model>> {
    Aircraft::find()
        .order_by_desc(aircraft::Column::Id) // UUIDv7 is time-ordered
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list aircraft: {}", e)))
}

/// Load the parts, stages (with staff), tests (with staff) and report of an aircraft.
pub async fn load_graph<C: ConnectionTrait>(
    db: &C,
    aircraft: aircraft::Model,
) -> AppResult<AircraftGraph> {
    let parts = super::parts::for_aircraft(db, aircraft.id).await?;

    let stage_rows = super::stages::for_aircraft(db, aircraft.id).await?;
    let mut staff_by_stage =
        super::stages::staff_for_stages(db, stage_rows.iter().map(|s| s.id).collect()).await?;
    let stages = stage_rows
        .into_iter()
        .map(|s| {
            let staff = staff_by_stage.remove(&s.id).unwrap_or_default();
            (s, staff)
        })
        .collect();

    let tests = super::test_records::for_aircraft(db, aircraft.id).await?;
    let report = super::reports::find_by_aircraft(db, aircraft.id).await?;

    Ok(AircraftGraph {
        aircraft,
        parts,
        stages,
        tests,
        report,
    })
}

//! Database queries for aircraft test records.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::test_record::{self, ActiveModel, Entity as TestRecord};
use crate::entity::{aircraft, staff};
use crate::error::{AppError, AppResult};

/// Column values for a new test row.
pub struct NewTest {
    pub aircraft_id: Uuid,
    pub staff_id: Uuid,
    pub test_type: String,
    pub result: String,
    pub observation: Option<String>,
    pub performed_at: DateTime<Utc>,
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new: NewTest,
    now: DateTime<Utc>,
) -> AppResult<test_record::Model> {
    let model = ActiveModel {
        id: Set(id),
        aircraft_id: Set(new.aircraft_id),
        staff_id: Set(new.staff_id),
        test_type: Set(new.test_type),
        result: Set(new.result),
        observation: Set(new.observation),
        performed_at: Set(new.performed_at),
        created_at: Set(now),
    };

    model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert test: {}", e)))
}

/// Whether any recorded test names this staff member as responsible.
pub async fn exists_for_staff<C: ConnectionTrait>(db: &C, staff_id: Uuid) -> AppResult<bool> {
    let count = TestRecord::find()
        .filter(test_record::Column::StaffId.eq(staff_id))
        .count(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to check tests for staff: {}", e)))?;

    Ok(count > 0)
}

/// Tests of one aircraft, oldest first, each with its responsible staff.
pub async fn for_aircraft<C: ConnectionTrait>(
    db: &C,
    aircraft_id: Uuid,
) -> AppResult<Vec<(test_record::Model, Option<staff::Model>)>> {
    TestRecord::find()
        .filter(test_record::Column::AircraftId.eq(aircraft_id))
        .find_also_related(staff::Entity)
        .order_by_asc(test_record::Column::PerformedAt)
        .order_by_asc(test_record::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get tests for aircraft: {}", e)))
}

/// All tests, newest first, each with its aircraft.
pub async fn list_with_aircraft<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<(test_record::Model, Option<aircraft::Model>)>> {
    TestRecord::find()
        .find_also_related(aircraft::Entity)
        .order_by_desc(test_record::Column::PerformedAt)
        .order_by_desc(test_record::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list tests: {}", e)))
}

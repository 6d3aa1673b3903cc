//! Database queries for delivery reports.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::aircraft;
use crate::entity::report::{self, ActiveModel, Entity as Report};
use crate::error::{AppError, AppResult, is_unique_violation};

/// Insert the report row for an aircraft.
///
/// The unique index on `aircraft_id` is the duplicate gate: a violation surfaces as
/// `DuplicateReport` naming the aircraft code.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    aircraft: &aircraft::Model,
    file_name: &str,
    generated_at: DateTime<Utc>,
) -> AppResult<report::Model> {
    let model = ActiveModel {
        id: Set(id),
        aircraft_id: Set(aircraft.id),
        file_name: Set(file_name.to_string()),
        generated_at: Set(generated_at),
    };

    model.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateReport(aircraft.code.clone())
        } else {
            AppError::Database(format!("Failed to insert report: {}", e))
        }
    })
}

pub async fn find_by_aircraft<C: ConnectionTrait>(
    db: &C,
    aircraft_id: Uuid,
) -> AppResult<Option<report::Model>> {
    Report::find()
        .filter(report::Column::AircraftId.eq(aircraft_id))
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get report: {}", e)))
}

/// All reports, newest first, each with its aircraft.
pub async fn list_with_aircraft<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<(report::Model, Option<aircraft::Model>)>> {
    Report::find()
        .find_also_related(aircraft::Entity)
        .order_by_desc(report::Column::GeneratedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list reports: {}", e)))
}

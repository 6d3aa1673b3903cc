//! Database queries for parts.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::aircraft;
use crate::entity::part::{self, ActiveModel, Entity as Part};
use crate::error::{AppError, AppResult};

/// Column values for a new part row.
pub struct NewPart {
    pub aircraft_id: Uuid,
    pub name: String,
    pub part_type: String,
    pub supplier: String,
    pub status: String,
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new: NewPart,
    now: DateTime<Utc>,
) -> AppResult<part::Model> {
    let model = ActiveModel {
        id: Set(id),
        aircraft_id: Set(new.aircraft_id),
        name: Set(new.name),
        part_type: Set(new.part_type),
        supplier: Set(new.supplier),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert part: {}", e)))
}

pub async fn update<C: ConnectionTrait>(db: &C, active: ActiveModel) -> AppResult<part::Model> {
    active
        .update(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update part: {}", e)))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<part::Model>> {
    Part::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get part: {}", e)))
}

/// Parts of one aircraft in creation order.
pub async fn for_aircraft<C: ConnectionTrait>(
    db: &C,
    aircraft_id: Uuid,
) -> AppResult<Vec<part::Model>> {
    Part::find()
        .filter(part::Column::AircraftId.eq(aircraft_id))
        .order_by_asc(part::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get parts for aircraft: {}", e)))
}

/// All parts, newest first, each with its owning aircraft.
pub async fn list_with_aircraft<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<(part::Model, Option<aircraft::Model>)>> {
    Part::find()
        .find_also_related(aircraft::Entity)
        .order_by_desc(part::Column::Id)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list parts: {}", e)))
}

//! Stage entity for sequenced production steps.
//!
//! `sequence` is the explicit precedence key: assigned at creation as one past the
//! highest sequence of the aircraft's existing stages.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub sequence: i32,
    pub name: String,
    /// Opaque deadline token as supplied by the caller.
    pub deadline: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::aircraft::Entity",
        from = "Column::AircraftId",
        to = "super::aircraft::Column::Id",
        on_delete = "Cascade"
    )]
    Aircraft,
    #[sea_orm(has_many = "super::stage_staff::Entity")]
    StageStaff,
}

impl Related<super::aircraft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aircraft.def()
    }
}

impl Related<super::stage_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StageStaff.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        super::stage_staff::Relation::Staff.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::stage_staff::Relation::Stage.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Staff entity for permissioned personnel.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[sea_orm(unique)]
    pub username: String,
    pub permission_level: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stage_staff::Entity")]
    StageStaff,
    #[sea_orm(has_many = "super::test_record::Entity")]
    Tests,
}

impl Related<super::stage_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StageStaff.def()
    }
}

impl Related<super::test_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

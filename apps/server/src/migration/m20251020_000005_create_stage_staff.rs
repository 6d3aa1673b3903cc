//! Migration: Create stage_staff join table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StageStaff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StageStaff::StageId).uuid().not_null())
                    .col(ColumnDef::new(StageStaff::StaffId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(StageStaff::StageId)
                            .col(StageStaff::StaffId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stage_staff_stage")
                            .from(StageStaff::Table, StageStaff::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stage_staff_staff")
                            .from(StageStaff::Table, StageStaff::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StageStaff::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StageStaff {
    Table,
    StageId,
    StaffId,
}

#[derive(DeriveIden)]
enum Stages {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
}

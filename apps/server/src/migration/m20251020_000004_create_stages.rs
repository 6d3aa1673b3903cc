//! Migration: Create stages table.
//!
//! `(aircraft_id, sequence)` is unique: the sequence is the precedence key among an
//! aircraft's stages.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stages::AircraftId).uuid().not_null())
                    .col(ColumnDef::new(Stages::Sequence).integer().not_null())
                    .col(ColumnDef::new(Stages::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Stages::Deadline).string_len(100).not_null())
                    // pending | in_progress | completed
                    .col(ColumnDef::new(Stages::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Stages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stages_aircraft")
                            .from(Stages::Table, Stages::AircraftId)
                            .to(Aircraft::Table, Aircraft::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stages_aircraft_sequence")
                    .table(Stages::Table)
                    .col(Stages::AircraftId)
                    .col(Stages::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stages::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stages {
    Table,
    Id,
    AircraftId,
    Sequence,
    Name,
    Deadline,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Aircraft {
    Table,
    Id,
}

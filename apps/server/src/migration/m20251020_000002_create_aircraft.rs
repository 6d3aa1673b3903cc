//! Migration: Create aircraft table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Aircraft::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Aircraft::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Aircraft::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Aircraft::ModelName).string_len(200).not_null())
                    // commercial | military
                    .col(ColumnDef::new(Aircraft::AircraftType).string_len(20).not_null())
                    .col(ColumnDef::new(Aircraft::Capacity).integer().not_null())
                    .col(ColumnDef::new(Aircraft::FlightRange).integer().not_null())
                    .col(
                        ColumnDef::new(Aircraft::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Aircraft::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Aircraft::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Aircraft {
    Table,
    Id,
    Code,
    ModelName,
    AircraftType,
    Capacity,
    FlightRange,
    CreatedAt,
    UpdatedAt,
}

//! Migration: Create parts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Parts::AircraftId).uuid().not_null())
                    .col(ColumnDef::new(Parts::Name).string_len(200).not_null())
                    // national | imported
                    .col(ColumnDef::new(Parts::PartType).string_len(20).not_null())
                    .col(ColumnDef::new(Parts::Supplier).string_len(200).not_null())
                    // in_production | in_transit | ready
                    .col(ColumnDef::new(Parts::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Parts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Parts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parts_aircraft")
                            .from(Parts::Table, Parts::AircraftId)
                            .to(Aircraft::Table, Aircraft::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parts_aircraft_id")
                    .table(Parts::Table)
                    .col(Parts::AircraftId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parts::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Parts {
    Table,
    Id,
    AircraftId,
    Name,
    PartType,
    Supplier,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Aircraft {
    Table,
    Id,
}

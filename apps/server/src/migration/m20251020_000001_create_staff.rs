//! Migration: Create staff table.
//!
//! Staff members are assigned to stages and recorded as responsible for tests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Staff::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Staff::Phone).string_len(50).not_null())
                    .col(ColumnDef::new(Staff::Address).string_len(300).not_null())
                    .col(
                        ColumnDef::new(Staff::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    // operator | engineer | administrator
                    .col(ColumnDef::new(Staff::PermissionLevel).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Staff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    Name,
    Phone,
    Address,
    Username,
    PermissionLevel,
    CreatedAt,
    UpdatedAt,
}

//! SeaORM database migrations.
//!
//! Written with the schema builder so the same set runs on PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20251020_000001_create_staff;
mod m20251020_000002_create_aircraft;
mod m20251020_000003_create_parts;
mod m20251020_000004_create_stages;
mod m20251020_000005_create_stage_staff;
mod m20251020_000007_create_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_staff::Migration),
            Box::new(m20251020_000002_create_aircraft::Migration),
            Box::new(m20251020_000003_create_parts::Migration),
            Box::new(m20251020_000004_create_stages::Migration),
            Box::new(m20251020_000005_create_stage_staff::Migration),
            Box::new(m20251020_000006_create_aircraft_tests::Migration),
            Box::new(m20251020_000007_create_reports::Migration),
        ]
    }
}

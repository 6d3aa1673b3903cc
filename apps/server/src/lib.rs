//! AeroTrack server library.
//!
//! Aircraft production tracking: stage lifecycle with sequential precedence, parts and test
//! registration, and one-shot final delivery reports.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

use actix_web::web;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::{ProductionService, ReportStorage, StaffService};

/// Services shared by every worker.
#[derive(Clone)]
pub struct AppContext {
    pub pool: DbPool,
    pub production: ProductionService,
    pub staff: StaffService,
    pub verifier: TokenVerifier,
}

impl AppContext {
    pub fn new(pool: DbPool, storage: ReportStorage, verifier: TokenVerifier) -> Self {
        AppContext {
            production: ProductionService::new(pool.clone(), storage),
            staff: StaffService::new(pool.clone()),
            pool,
            verifier,
        }
    }

    /// Connect, migrate and open the report directory.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&config.database).await?;
        tracing::info!("Database connection established");

        pool.run_migrations().await?;
        tracing::info!("Database migrations complete");

        let storage = ReportStorage::new(&config.reports_dir).await?;
        let verifier = TokenVerifier::new(&config.auth.jwt_secret);

        Ok(AppContext::new(pool, storage, verifier))
    }

    /// Register shared state and the `/api/v1` scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.production.clone()))
            .app_data(web::Data::new(self.staff.clone()))
            .app_data(web::Data::new(self.verifier.clone()))
            .service(web::scope("/api/v1").configure(api::configure_api_routes));
    }
}

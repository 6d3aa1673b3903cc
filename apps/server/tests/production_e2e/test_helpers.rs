//! Shared test helpers for production E2E tests.

use actix_web::{App, dev::ServiceResponse, test};
use aerotrack_lib::AppContext;
use aerotrack_lib::auth::{Claims, TokenVerifier};
use aerotrack_lib::config::DatabaseSettings;
use aerotrack_lib::db::DbPool;
use aerotrack_lib::models::{
    AircraftView, CreateAircraftRequest, CreatePartRequest, CreateStaffRequest,
    CreateStageRequest, PartView, PermissionLevel, StaffView, StageView,
};
use aerotrack_lib::services::ReportStorage;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::SecretString;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "production-e2e-secret-at-least-32-chars";

/// One isolated database and report directory.
pub struct TestEnv {
    pub ctx: AppContext,
    pub reports_dir: std::path::PathBuf,
    // Keeps the database file and reports alive for the test's duration.
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("aerotrack.db");

        // A single connection serialises writers the way row locks do on PostgreSQL.
        let settings = DatabaseSettings {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            max_connections: 1,
            min_connections: 1,
        };
        let pool = DbPool::new(&settings)
            .await
            .expect("Failed to open test database");
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        let reports_dir = dir.path().join("reports");
        let storage = ReportStorage::new(&reports_dir)
            .await
            .expect("Failed to create report storage");
        let verifier = TokenVerifier::new(&SecretString::from(TEST_JWT_SECRET.to_string()));

        TestEnv {
            ctx: AppContext::new(pool, storage, verifier),
            reports_dir,
            _dir: dir,
        }
    }

    pub fn production(&self) -> &aerotrack_lib::services::ProductionService {
        &self.ctx.production
    }

    pub fn staff(&self) -> &aerotrack_lib::services::StaffService {
        &self.ctx.staff
    }

    pub async fn aircraft(&self, code: &str) -> AircraftView {
        self.production()
            .create_aircraft(CreateAircraftRequest {
                code: code.to_string(),
                model: "E195-E2".to_string(),
                aircraft_type: "commercial".to_string(),
                capacity: 146,
                range: 4800,
            })
            .await
            .expect("Failed to create aircraft")
    }

    pub async fn staff_member(&self, name: &str, level: &str) -> StaffView {
        self.staff()
            .create(CreateStaffRequest {
                name: name.to_string(),
                phone: "+55 12 3456-7890".to_string(),
                address: "Av. Brigadeiro Faria Lima, 1".to_string(),
                username: format!("{}-{}", name.to_lowercase(), short_id()),
                permission_level: level.to_string(),
            })
            .await
            .expect("Failed to create staff")
    }

    pub async fn stage(&self, aircraft_id: Uuid, name: &str, staff_ids: Vec<Uuid>) -> StageView {
        self.production()
            .create_stage(CreateStageRequest {
                aircraft_id,
                name: name.to_string(),
                deadline: "2025-12-31".to_string(),
                status: None,
                staff_ids,
            })
            .await
            .expect("Failed to create stage")
    }

    pub async fn part(&self, aircraft_id: Uuid, name: &str, status: &str) -> PartView {
        self.production()
            .create_part(CreatePartRequest {
                aircraft_id,
                name: name.to_string(),
                part_type: "national".to_string(),
                supplier: "Embraer".to_string(),
                status: Some(status.to_string()),
            })
            .await
            .expect("Failed to create part")
    }

    /// Start and finish every given stage in order.
    pub async fn complete_stages(&self, stages: &[&StageView]) {
        for stage in stages {
            self.production()
                .start_stage(stage.id)
                .await
                .expect("Failed to start stage");
            self.production()
                .finish_stage(stage.id)
                .await
                .expect("Failed to finish stage");
        }
    }

    pub async fn app(
        &self,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    > {
        let ctx = self.ctx.clone();
        test::init_service(App::new().configure(move |cfg| ctx.configure(cfg))).await
    }
}

/// Short random suffix for unique usernames and codes.
pub fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Mint a bearer token the way the identity provider would.
pub fn token_for(level: PermissionLevel) -> String {
    token_with(Uuid::now_v7(), level, TEST_JWT_SECRET)
}

pub fn token_with(staff_id: Uuid, level: PermissionLevel, secret: &str) -> String {
    let claims = Claims {
        sub: staff_id,
        level,
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode token")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

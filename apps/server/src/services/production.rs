//! Production service facade.
//!
//! One method per use case: aircraft, parts and tests are handled here, stage transitions
//! and reports are delegated to [`StageLifecycle`] and [`ReportGenerator`].

use chrono::Utc;
use sea_orm::Set;
use tracing::info;
use uuid::Uuid;

use super::report_generator::ReportGenerator;
use super::report_storage::ReportStorage;
use super::stage_lifecycle::StageLifecycle;
use crate::db::{
    DbPool, aircraft as aircraft_db, parts as part_db, staff as staff_db,
    test_records as test_db,
};
use crate::entity::{aircraft, part};
use crate::error::{AppError, AppResult};
use crate::models::enums::parse_input;
use crate::models::{
    AircraftDetail, AircraftType, AircraftView, CreateAircraftRequest, CreatePartRequest,
    CreateStageRequest, PartStatus, PartType, PartView, RegisterTestRequest, ReportView,
    StageView, StoredEnum, TestResult, TestType, TestView, UpdateAircraftRequest,
    UpdatePartRequest, UpdateStageRequest, non_negative, required_text,
};

/// Use-case entry point shared by the HTTP handlers.
#[derive(Clone)]
pub struct ProductionService {
    pool: DbPool,
    stages: StageLifecycle,
    reports: ReportGenerator,
}

impl ProductionService {
    pub fn new(pool: DbPool, storage: ReportStorage) -> Self {
        ProductionService {
            stages: StageLifecycle::new(pool.clone()),
            reports: ReportGenerator::new(pool.clone(), storage),
            pool,
        }
    }

    // Aircraft

    pub async fn create_aircraft(&self, req: CreateAircraftRequest) -> AppResult<AircraftView> {
        let code = aircraft_code(&req.code)?;
        let aircraft_type: AircraftType = parse_input(&req.aircraft_type)?;

        let created = aircraft_db::insert(
            self.pool.connection(),
            Uuid::now_v7(),
            aircraft_db::NewAircraft {
                code,
                model_name: required_text("model", &req.model)?,
                aircraft_type: aircraft_type.as_str().to_string(),
                capacity: non_negative("capacity", req.capacity)?,
                flight_range: non_negative("range", req.range)?,
            },
            Utc::now(),
        )
        .await?;

        info!(aircraft_id = %created.id, code = %created.code, "Aircraft registered");

        AircraftView::try_from(created)
    }

    /// Partial update. A changed code is re-checked for uniqueness by the store.
    pub async fn update_aircraft(
        &self,
        id: Uuid,
        req: UpdateAircraftRequest,
    ) -> AppResult<AircraftView> {
        let conn = self.pool.connection();
        let current = aircraft_db::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", id))?;

        let mut active: aircraft::ActiveModel = current.into();
        if let Some(code) = req.code.as_deref() {
            active.code = Set(aircraft_code(code)?);
        }
        if let Some(model) = req.model.as_deref() {
            active.model_name = Set(required_text("model", model)?);
        }
        if let Some(kind) = req.aircraft_type.as_deref() {
            let kind: AircraftType = parse_input(kind)?;
            active.aircraft_type = Set(kind.as_str().to_string());
        }
        if let Some(capacity) = req.capacity {
            active.capacity = Set(non_negative("capacity", capacity)?);
        }
        if let Some(range) = req.range {
            active.flight_range = Set(non_negative("range", range)?);
        }
        active.updated_at = Set(Utc::now());

        let updated = aircraft_db::update(conn, active).await?;

        info!(aircraft_id = %id, code = %updated.code, "Aircraft updated");

        AircraftView::try_from(updated)
    }

    /// Aircraft with its parts, stages, tests and report.
    pub async fn get_aircraft(&self, id: Uuid) -> AppResult<AircraftDetail> {
        let conn = self.pool.connection();
        let found = aircraft_db::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", id))?;

        AircraftDetail::from_graph(aircraft_db::load_graph(conn, found).await?)
    }

    pub async fn get_aircraft_by_code(&self, code: &str) -> AppResult<AircraftDetail> {
        let conn = self.pool.connection();
        let found = aircraft_db::find_by_code(conn, code)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", code))?;

        AircraftDetail::from_graph(aircraft_db::load_graph(conn, found).await?)
    }

    /// All aircraft, most recently registered first.
    pub async fn list_aircraft(&self) -> AppResult<Vec<AircraftView>> {
        aircraft_db::list(self.pool.connection())
            .await?
            .into_iter()
            .map(AircraftView::try_from)
            .collect()
    }

    // Parts

    pub async fn create_part(&self, req: CreatePartRequest) -> AppResult<PartView> {
        let part_type: PartType = parse_input(&req.part_type)?;
        let status = match req.status.as_deref() {
            Some(s) => parse_input::<PartStatus>(s)?,
            None => PartStatus::InProduction,
        };
        let name = required_text("name", &req.name)?;
        let supplier = required_text("supplier", &req.supplier)?;

        let conn = self.pool.connection();
        let owner = aircraft_db::find_by_id(conn, req.aircraft_id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", req.aircraft_id))?;

        let created = part_db::insert(
            conn,
            Uuid::now_v7(),
            part_db::NewPart {
                aircraft_id: owner.id,
                name,
                part_type: part_type.as_str().to_string(),
                supplier,
                status: status.as_str().to_string(),
            },
            Utc::now(),
        )
        .await?;

        info!(part_id = %created.id, aircraft = %owner.code, "Part registered");

        PartView::from_model(created, &owner.code)
    }

    /// Edit name, type or supplier. Status is left untouched.
    pub async fn update_part(&self, id: Uuid, req: UpdatePartRequest) -> AppResult<PartView> {
        let (current, code) = self.find_part(id).await?;

        let mut active: part::ActiveModel = current.into();
        if let Some(name) = req.name.as_deref() {
            active.name = Set(required_text("name", name)?);
        }
        if let Some(kind) = req.part_type.as_deref() {
            let kind: PartType = parse_input(kind)?;
            active.part_type = Set(kind.as_str().to_string());
        }
        if let Some(supplier) = req.supplier.as_deref() {
            active.supplier = Set(required_text("supplier", supplier)?);
        }
        active.updated_at = Set(Utc::now());

        let updated = part_db::update(self.pool.connection(), active).await?;
        PartView::from_model(updated, &code)
    }

    /// Set any part status; transitions are not ordered.
    pub async fn set_part_status(&self, id: Uuid, status: &str) -> AppResult<PartView> {
        let status: PartStatus = parse_input(status)?;
        let (current, code) = self.find_part(id).await?;

        let mut active: part::ActiveModel = current.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let updated = part_db::update(self.pool.connection(), active).await?;

        info!(part_id = %id, status = %status, "Part status changed");

        PartView::from_model(updated, &code)
    }

    pub async fn get_part(&self, id: Uuid) -> AppResult<PartView> {
        let (current, code) = self.find_part(id).await?;
        PartView::from_model(current, &code)
    }

    /// All parts, newest first.
    pub async fn list_parts(&self) -> AppResult<Vec<PartView>> {
        part_db::list_with_aircraft(self.pool.connection())
            .await?
            .into_iter()
            .map(|(p, owner)| {
                let code = owner.map(|a| a.code).unwrap_or_default();
                PartView::from_model(p, &code)
            })
            .collect()
    }

    async fn find_part(&self, id: Uuid) -> AppResult<(part::Model, String)> {
        let conn = self.pool.connection();
        let found = part_db::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Part", id))?;
        let owner = aircraft_db::find_by_id(conn, found.aircraft_id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", found.aircraft_id))?;

        Ok((found, owner.code))
    }

    // Stages

    pub async fn create_stage(&self, req: CreateStageRequest) -> AppResult<StageView> {
        self.stages.create_stage(req).await
    }

    pub async fn update_stage(&self, id: Uuid, req: UpdateStageRequest) -> AppResult<StageView> {
        self.stages.update_stage(id, req).await
    }

    pub async fn start_stage(&self, id: Uuid) -> AppResult<StageView> {
        self.stages.start(id).await
    }

    pub async fn finish_stage(&self, id: Uuid) -> AppResult<StageView> {
        self.stages.finish(id).await
    }

    pub async fn assign_staff(&self, stage_id: Uuid, staff_id: Uuid) -> AppResult<StageView> {
        self.stages.assign_staff(stage_id, staff_id).await
    }

    pub async fn get_stage(&self, id: Uuid) -> AppResult<StageView> {
        self.stages.get_stage(id).await
    }

    pub async fn list_stages(&self) -> AppResult<Vec<StageView>> {
        self.stages.list_stages().await
    }

    // Tests

    /// Record a test against an aircraft identified by its business code.
    pub async fn register_test(&self, req: RegisterTestRequest) -> AppResult<TestView> {
        let test_type: TestType = parse_input(&req.test_type)?;
        let result: TestResult = parse_input(&req.result)?;
        let observation = req
            .observation
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());

        let conn = self.pool.connection();
        let owner = aircraft_db::find_by_code(conn, req.aircraft_code.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", req.aircraft_code.trim()))?;
        let technician = staff_db::find_by_id(conn, req.staff_id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff", req.staff_id))?;

        let now = Utc::now();
        let created = test_db::insert(
            conn,
            Uuid::now_v7(),
            test_db::NewTest {
                aircraft_id: owner.id,
                staff_id: technician.id,
                test_type: test_type.as_str().to_string(),
                result: result.as_str().to_string(),
                observation,
                performed_at: req.performed_at.unwrap_or(now),
            },
            now,
        )
        .await?;

        info!(
            test_id = %created.id,
            aircraft = %owner.code,
            test_type = %test_type,
            result = %result,
            "Test registered"
        );

        TestView::from_model(created, &owner.code, Some(technician.name))
    }

    /// All tests, newest first.
    pub async fn list_tests(&self) -> AppResult<Vec<TestView>> {
        let conn = self.pool.connection();
        let rows = test_db::list_with_aircraft(conn).await?;
        let names = staff_db::names_by_id(conn, rows.iter().map(|(t, _)| t.staff_id).collect())
            .await?;

        rows.into_iter()
            .map(|(t, owner)| {
                let code = owner.map(|a| a.code).unwrap_or_default();
                let staff_name = names.get(&t.staff_id).cloned();
                TestView::from_model(t, &code, staff_name)
            })
            .collect()
    }

    // Reports

    pub async fn generate_report(&self, aircraft_id: Uuid) -> AppResult<ReportView> {
        self.reports.generate(aircraft_id).await
    }

    pub async fn list_reports(&self) -> AppResult<Vec<ReportView>> {
        self.reports.list_reports().await
    }

    pub async fn download_report(&self, file_name: &str) -> AppResult<Vec<u8>> {
        self.reports.download(file_name).await
    }
}

/// Aircraft codes become part of report file names, so path syntax is refused.
fn aircraft_code(value: &str) -> AppResult<String> {
    let code = required_text("code", value)?;
    if code.contains("..") || code.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return Err(AppError::InvalidInput(format!(
            "Aircraft code '{}' must not contain path separators or control characters",
            code.escape_debug()
        )));
    }
    Ok(code)
}

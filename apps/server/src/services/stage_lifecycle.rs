//! Stage lifecycle engine.
//!
//! Stages of one aircraft form a linear precedence chain ordered by `sequence`. A stage may
//! only start once every earlier sibling is completed, and may only finish from
//! `in_progress`. Every read-check-write runs in one transaction that first locks the parent
//! aircraft row, so concurrent starts, stage creation and report generation for the same
//! aircraft are serialised.

use chrono::Utc;
use sea_orm::{ConnectionTrait, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, DbPool, aircraft as aircraft_db, staff as staff_db, stages as stage_db};
use crate::entity::{aircraft, stage};
use crate::error::{AppError, AppResult};
use crate::models::enums::{StoredEnum, decode, parse_input};
use crate::models::{
    CreateStageRequest, StageStatus, StageView, UpdateStageRequest, required_text,
};

/// Stage state machine over the aggregate store.
#[derive(Clone)]
pub struct StageLifecycle {
    pool: DbPool,
}

impl StageLifecycle {
    pub fn new(pool: DbPool) -> Self {
        StageLifecycle { pool }
    }

    /// Create a stage at the end of its aircraft's precedence chain.
    ///
    /// The aircraft and every referenced staff member must exist; otherwise nothing is
    /// written.
    pub async fn create_stage(&self, req: CreateStageRequest) -> AppResult<StageView> {
        let name = required_text("name", &req.name)?;
        let deadline = required_text("deadline", &req.deadline)?;
        let status = match req.status.as_deref() {
            Some(s) => parse_input::<StageStatus>(s)?,
            None => StageStatus::Pending,
        };

        let txn = self.pool.begin().await?;

        let aircraft = lock_aircraft(&txn, req.aircraft_id).await?;
        let staff = staff_db::find_all_by_ids(&txn, &req.staff_ids).await?;
        let sequence = stage_db::next_sequence(&txn, aircraft.id).await?;

        let created = stage_db::insert(
            &txn,
            Uuid::now_v7(),
            stage_db::NewStage {
                aircraft_id: aircraft.id,
                sequence,
                name,
                deadline,
                status: status.as_str().to_string(),
            },
            Utc::now(),
        )
        .await?;
        stage_db::replace_staff(&txn, created.id, &req.staff_ids).await?;

        db::commit(txn).await?;

        info!(
            stage_id = %created.id,
            aircraft = %aircraft.code,
            sequence,
            "Stage created"
        );

        StageView::from_model(created, &aircraft.code, staff)
    }

    /// Update a stage's fields. A provided staff list replaces the current set wholesale.
    pub async fn update_stage(&self, id: Uuid, req: UpdateStageRequest) -> AppResult<StageView> {
        let txn = self.pool.begin().await?;

        let (aircraft, current) = lock_stage(&txn, id).await?;

        let mut active: stage::ActiveModel = current.into();
        if let Some(name) = req.name.as_deref() {
            active.name = Set(required_text("name", name)?);
        }
        if let Some(deadline) = req.deadline.as_deref() {
            active.deadline = Set(required_text("deadline", deadline)?);
        }
        if let Some(status) = req.status.as_deref() {
            let status: StageStatus = parse_input(status)?;
            active.status = Set(status.as_str().to_string());
        }
        if let Some(staff_ids) = req.staff_ids.as_deref() {
            staff_db::find_all_by_ids(&txn, staff_ids).await?;
            stage_db::replace_staff(&txn, id, staff_ids).await?;
        }
        active.updated_at = Set(Utc::now());

        let updated = stage_db::update(&txn, active).await?;
        let view = view_of(&txn, updated, &aircraft).await?;

        db::commit(txn).await?;

        info!(stage_id = %id, aircraft = %aircraft.code, "Stage updated");

        Ok(view)
    }

    /// Move a stage to `in_progress`.
    ///
    /// Fails with `PrecedenceViolation` naming the lowest-sequence earlier sibling that is
    /// not completed, then with `AlreadyStarted` if the stage is already in progress.
    pub async fn start(&self, id: Uuid) -> AppResult<StageView> {
        let txn = self.pool.begin().await?;

        let (aircraft, current) = lock_stage(&txn, id).await?;

        let earlier = stage_db::earlier_siblings(&txn, aircraft.id, current.sequence).await?;
        for sibling in earlier {
            if decode::<StageStatus>(&sibling.status)? != StageStatus::Completed {
                warn!(
                    stage_id = %id,
                    blocking_stage = %sibling.name,
                    "Stage start rejected: earlier stage not completed"
                );
                return Err(AppError::PrecedenceViolation {
                    blocking_stage: sibling.name,
                });
            }
        }

        if decode::<StageStatus>(&current.status)? == StageStatus::InProgress {
            warn!(stage_id = %id, "Stage start rejected: already in progress");
            return Err(AppError::AlreadyStarted(current.name));
        }

        let started =
            stage_db::set_status(&txn, current, StageStatus::InProgress.as_str()).await?;
        let view = view_of(&txn, started, &aircraft).await?;

        db::commit(txn).await?;

        info!(stage_id = %id, aircraft = %aircraft.code, "Stage started");

        Ok(view)
    }

    /// Move a stage from `in_progress` to `completed`.
    pub async fn finish(&self, id: Uuid) -> AppResult<StageView> {
        let txn = self.pool.begin().await?;

        let (aircraft, current) = lock_stage(&txn, id).await?;

        match decode::<StageStatus>(&current.status)? {
            StageStatus::Pending => {
                warn!(stage_id = %id, "Stage finish rejected: not started");
                return Err(AppError::NotStarted(current.name));
            }
            StageStatus::Completed => {
                warn!(stage_id = %id, "Stage finish rejected: already completed");
                return Err(AppError::AlreadyCompleted(current.name));
            }
            StageStatus::InProgress => {}
        }

        let finished = stage_db::set_status(&txn, current, StageStatus::Completed.as_str()).await?;
        let view = view_of(&txn, finished, &aircraft).await?;

        db::commit(txn).await?;

        info!(stage_id = %id, aircraft = %aircraft.code, "Stage completed");

        Ok(view)
    }

    /// Add a staff member to a stage. Already-assigned members are left as they are.
    pub async fn assign_staff(&self, stage_id: Uuid, staff_id: Uuid) -> AppResult<StageView> {
        let txn = self.pool.begin().await?;

        let (aircraft, current) = lock_stage(&txn, stage_id).await?;
        staff_db::find_by_id(&txn, staff_id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff", staff_id))?;

        stage_db::add_staff(&txn, stage_id, staff_id).await?;
        let view = view_of(&txn, current, &aircraft).await?;

        db::commit(txn).await?;

        info!(%stage_id, %staff_id, "Staff assigned to stage");

        Ok(view)
    }

    /// Get one stage with its aircraft code and staff.
    pub async fn get_stage(&self, id: Uuid) -> AppResult<StageView> {
        let conn = self.pool.connection();
        let current = stage_db::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Stage", id))?;
        let aircraft = aircraft_db::find_by_id(conn, current.aircraft_id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", current.aircraft_id))?;

        view_of(conn, current, &aircraft).await
    }

    /// All stages, most recent first.
    pub async fn list_stages(&self) -> AppResult<Vec<StageView>> {
        let conn = self.pool.connection();
        let rows = stage_db::list_with_aircraft(conn).await?;
        let mut staff_by_stage =
            stage_db::staff_for_stages(conn, rows.iter().map(|(s, _)| s.id).collect()).await?;

        rows.into_iter()
            .map(|(s, aircraft)| {
                let code = aircraft.map(|a| a.code).unwrap_or_default();
                let staff = staff_by_stage.remove(&s.id).unwrap_or_default();
                StageView::from_model(s, &code, staff)
            })
            .collect()
    }
}

/// Lock the aircraft row or report it missing.
async fn lock_aircraft<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<aircraft::Model> {
    aircraft_db::find_for_update(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Aircraft", id))
}

/// Lock the stage's aircraft, then read the stage under that lock.
async fn lock_stage<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> AppResult<(aircraft::Model, stage::Model)> {
    let unlocked = stage_db::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Stage", id))?;
    let aircraft = lock_aircraft(db, unlocked.aircraft_id).await?;
    let current = stage_db::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Stage", id))?;

    Ok((aircraft, current))
}

async fn view_of<C: ConnectionTrait>(
    db: &C,
    current: stage::Model,
    aircraft: &aircraft::Model,
) -> AppResult<StageView> {
    let staff = stage_db::staff_for_stages(db, vec![current.id])
        .await?
        .remove(&current.id)
        .unwrap_or_default();

    StageView::from_model(current, &aircraft.code, staff)
}

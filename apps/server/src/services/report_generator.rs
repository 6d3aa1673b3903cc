//! Final delivery report generation.
//!
//! A report can be generated once per aircraft, and only when every stage is completed and
//! every part is ready. The report row insert is the duplicate gate; the file is written
//! only after the row is accepted, inside the same transaction.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::report_storage::{ReportStorage, validate_file_name};
use crate::db::{self, DbPool, aircraft as aircraft_db, reports as report_db};
use crate::error::{AppError, AppResult};
use crate::models::{AircraftDetail, PartStatus, ReportView, StageStatus, StoredEnum};

const HEADER: &str = "=== FINAL DELIVERY REPORT ===";
const NOT_AVAILABLE: &str = "N/A";

/// Report generator over the aggregate store and the report directory.
#[derive(Clone)]
pub struct ReportGenerator {
    pool: DbPool,
    storage: ReportStorage,
}

impl ReportGenerator {
    pub fn new(pool: DbPool, storage: ReportStorage) -> Self {
        ReportGenerator { pool, storage }
    }

    /// Generate the delivery report of an aircraft.
    pub async fn generate(&self, aircraft_id: Uuid) -> AppResult<ReportView> {
        let txn = self.pool.begin().await?;

        let aircraft = aircraft_db::find_for_update(&txn, aircraft_id)
            .await?
            .ok_or_else(|| AppError::not_found("Aircraft", aircraft_id))?;
        let code = aircraft.code.clone();

        let graph = aircraft_db::load_graph(&txn, aircraft.clone()).await?;
        let detail = AircraftDetail::from_graph(graph)?;

        if let Err(e) = check_ready(&detail) {
            warn!(aircraft = %code, reason = %e, "Report generation rejected");
            return Err(e);
        }

        let generated_at = Utc::now().trunc_subsecs(0);
        let file_name = report_file_name(&code, generated_at);
        validate_file_name(&file_name)?;

        let report = report_db::insert(&txn, Uuid::now_v7(), &aircraft, &file_name, generated_at)
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::DuplicateReport(_)) {
                    warn!(aircraft = %code, "Report generation rejected: report already exists");
                }
            })?;

        let text = render_report(&detail, generated_at);
        self.storage.put(&file_name, &text).await?;

        if let Err(e) = db::commit(txn).await {
            error!(file = %file_name, "Report commit failed after file write: {}", e);
            if let Err(remove_err) = self.storage.remove(&file_name).await {
                error!(file = %file_name, "Failed to remove orphaned report file: {}", remove_err);
            }
            return Err(e);
        }

        info!(
            aircraft = %code,
            report_id = %report.id,
            file = %file_name,
            "Report generated"
        );

        Ok(ReportView::from_model(report, &code))
    }

    /// All reports, newest first.
    pub async fn list_reports(&self) -> AppResult<Vec<ReportView>> {
        let rows = report_db::list_with_aircraft(self.pool.connection()).await?;
        Ok(rows
            .into_iter()
            .map(|(r, aircraft)| {
                let code = aircraft.map(|a| a.code).unwrap_or_default();
                ReportView::from_model(r, &code)
            })
            .collect())
    }

    /// Read a report file by its bare name.
    pub async fn download(&self, file_name: &str) -> AppResult<Vec<u8>> {
        self.storage.get(file_name).await
    }
}

/// Every stage completed, then every part ready.
pub fn check_ready(detail: &AircraftDetail) -> AppResult<()> {
    if detail
        .stages
        .iter()
        .any(|s| s.status != StageStatus::Completed)
    {
        return Err(AppError::StagesIncomplete);
    }

    if detail.parts.iter().any(|p| p.status != PartStatus::Ready) {
        return Err(AppError::PartsNotReady);
    }

    Ok(())
}

/// `Relatorio_<code>_<YYYY-MM-DD>.txt`
pub fn report_file_name(code: &str, generated_at: DateTime<Utc>) -> String {
    format!("Relatorio_{}_{}.txt", code, generated_at.format("%Y-%m-%d"))
}

/// Render the plain-text delivery report.
///
/// Output depends only on `detail` and `generated_at`.
pub fn render_report(detail: &AircraftDetail, generated_at: DateTime<Utc>) -> String {
    let aircraft = &detail.aircraft;
    let mut lines: Vec<String> = vec![
        HEADER.to_string(),
        String::new(),
        format!(
            "Generated at: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        String::new(),
        "--- AIRCRAFT ---".to_string(),
        format!("Internal ID: {}", aircraft.id),
        format!("Code: {}", aircraft.code),
        format!("Model: {}", aircraft.model),
        format!("Type: {}", aircraft.aircraft_type.report_token()),
        format!("Capacity: {}", aircraft.capacity),
        format!("Range: {}", aircraft.range),
        String::new(),
    ];

    lines.push(format!("--- PARTS ({}) ---", detail.parts.len()));
    for (i, part) in detail.parts.iter().enumerate() {
        lines.push(format!(
            "{}. {} (Supplier: {}, Status: {})",
            i + 1,
            part.name,
            part.supplier,
            part.status.report_token()
        ));
    }
    lines.push(String::new());

    lines.push(format!("--- STAGES ({}) ---", detail.stages.len()));
    for (i, stage) in detail.stages.iter().enumerate() {
        lines.push(format!(
            "{}. {} (Deadline: {}, Status: {}, Responsible: {})",
            i + 1,
            stage.name,
            stage.deadline,
            stage.status.report_token(),
            stage
                .responsible_names()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ));
    }
    lines.push(String::new());

    lines.push(format!("--- TEST RESULTS ({}) ---", detail.tests.len()));
    for (i, test) in detail.tests.iter().enumerate() {
        lines.push(format!(
            "{}. {}: {} (Technician: {})",
            i + 1,
            test.test_type.report_token(),
            test.result.report_token(),
            test.staff_name.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

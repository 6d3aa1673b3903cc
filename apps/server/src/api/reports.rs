//! Delivery report API handlers.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{PermissionLevel, ReportView};
use crate::services::ProductionService;

/// Generate the final delivery report of an aircraft.
///
/// Requires every stage completed and every part ready. At most one report per aircraft.
#[utoipa::path(
    post,
    path = "/api/v1/aircraft/{aircraft_id}/report",
    tag = "Reports",
    params(("aircraft_id" = Uuid, Path, description = "Aircraft UUID")),
    responses(
        (status = 201, description = "Report generated", body = ReportView),
        (status = 404, description = "Aircraft not found", body = ErrorResponse),
        (status = 409, description = "Aircraft not ready or report already generated", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn generate_report(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let report = service.generate_report(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(report))
}

/// List generated reports, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    responses((status = 200, description = "All reports", body = Vec<ReportView>)),
    security(("bearer" = []))
)]
pub async fn list_reports(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_reports().await?))
}

/// Download a report file by name.
#[utoipa::path(
    get,
    path = "/api/v1/reports/files/{file_name}",
    tag = "Reports",
    params(("file_name" = String, Path, description = "Report file name, e.g. Relatorio_A1_2025-03-04.txt")),
    responses(
        (status = 200, description = "Report text", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn download_report(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let file_name = path.into_inner();
    let bytes = service.download_report(&file_name).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename*=UTF-8''{}",
                urlencoding::encode(&file_name)
            ),
        ))
        .body(bytes))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/reports").route(web::get().to(list_reports)))
        .service(
            web::resource("/reports/files/{file_name}").route(web::get().to(download_report)),
        )
        .service(
            web::resource("/aircraft/{aircraft_id}/report").route(web::post().to(generate_report)),
        );
}

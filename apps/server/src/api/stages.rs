//! Stage API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    AssignStaffRequest, CreateStageRequest, PermissionLevel, StageView, UpdateStageRequest,
};
use crate::services::ProductionService;

/// List stages, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/stages",
    tag = "Stages",
    responses((status = 200, description = "All stages", body = Vec<StageView>)),
    security(("bearer" = []))
)]
pub async fn list_stages(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_stages().await?))
}

/// Create a stage at the end of the aircraft's stage sequence.
#[utoipa::path(
    post,
    path = "/api/v1/stages",
    tag = "Stages",
    request_body = CreateStageRequest,
    responses(
        (status = 201, description = "Stage created", body = StageView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Aircraft or staff not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn create_stage(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    body: web::Json<CreateStageRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let created = service.create_stage(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/stages/{stage_id}",
    tag = "Stages",
    params(("stage_id" = Uuid, Path, description = "Stage UUID")),
    responses(
        (status = 200, description = "Stage", body = StageView),
        (status = 404, description = "Stage not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_stage(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_stage(path.into_inner()).await?))
}

/// Update a stage. A provided staff list replaces the assigned staff.
#[utoipa::path(
    patch,
    path = "/api/v1/stages/{stage_id}",
    tag = "Stages",
    params(("stage_id" = Uuid, Path, description = "Stage UUID")),
    request_body = UpdateStageRequest,
    responses(
        (status = 200, description = "Stage updated", body = StageView),
        (status = 404, description = "Stage or staff not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_stage(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStageRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let updated = service
        .update_stage(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Start a stage. Every earlier stage of the aircraft must be completed.
#[utoipa::path(
    post,
    path = "/api/v1/stages/{stage_id}/start",
    tag = "Stages",
    params(("stage_id" = Uuid, Path, description = "Stage UUID")),
    responses(
        (status = 200, description = "Stage in progress", body = StageView),
        (status = 404, description = "Stage not found", body = ErrorResponse),
        (status = 409, description = "Earlier stage incomplete or already started", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn start_stage(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    Ok(HttpResponse::Ok().json(service.start_stage(path.into_inner()).await?))
}

/// Complete a stage that is in progress.
#[utoipa::path(
    post,
    path = "/api/v1/stages/{stage_id}/finish",
    tag = "Stages",
    params(("stage_id" = Uuid, Path, description = "Stage UUID")),
    responses(
        (status = 200, description = "Stage completed", body = StageView),
        (status = 404, description = "Stage not found", body = ErrorResponse),
        (status = 409, description = "Stage not started or already completed", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn finish_stage(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    Ok(HttpResponse::Ok().json(service.finish_stage(path.into_inner()).await?))
}

/// Assign a staff member to a stage.
#[utoipa::path(
    post,
    path = "/api/v1/stages/{stage_id}/staff",
    tag = "Stages",
    params(("stage_id" = Uuid, Path, description = "Stage UUID")),
    request_body = AssignStaffRequest,
    responses(
        (status = 200, description = "Staff assigned", body = StageView),
        (status = 403, description = "Administrator permission required", body = ErrorResponse),
        (status = 404, description = "Stage or staff not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn assign_staff(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
    body: web::Json<AssignStaffRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    let updated = service
        .assign_staff(path.into_inner(), body.staff_id)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/stages")
            .route(web::get().to(list_stages))
            .route(web::post().to(create_stage)),
    )
    .service(
        web::resource("/stages/{stage_id}")
            .route(web::get().to(get_stage))
            .route(web::patch().to(update_stage)),
    )
    .service(web::resource("/stages/{stage_id}/start").route(web::post().to(start_stage)))
    .service(web::resource("/stages/{stage_id}/finish").route(web::post().to(finish_stage)))
    .service(web::resource("/stages/{stage_id}/staff").route(web::post().to(assign_staff)));
}

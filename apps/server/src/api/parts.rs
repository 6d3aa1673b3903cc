//! Part API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatePartRequest, PartView, PermissionLevel, SetPartStatusRequest, UpdatePartRequest,
};
use crate::services::ProductionService;

/// List parts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/parts",
    tag = "Parts",
    responses((status = 200, description = "All parts", body = Vec<PartView>)),
    security(("bearer" = []))
)]
pub async fn list_parts(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_parts().await?))
}

/// Register a part on an aircraft.
#[utoipa::path(
    post,
    path = "/api/v1/parts",
    tag = "Parts",
    request_body = CreatePartRequest,
    responses(
        (status = 201, description = "Part registered", body = PartView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Aircraft not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn create_part(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    body: web::Json<CreatePartRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let created = service.create_part(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/parts/{part_id}",
    tag = "Parts",
    params(("part_id" = Uuid, Path, description = "Part UUID")),
    responses(
        (status = 200, description = "Part", body = PartView),
        (status = 404, description = "Part not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_part(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_part(path.into_inner()).await?))
}

/// Edit a part's name, type or supplier.
#[utoipa::path(
    patch,
    path = "/api/v1/parts/{part_id}",
    tag = "Parts",
    params(("part_id" = Uuid, Path, description = "Part UUID")),
    request_body = UpdatePartRequest,
    responses(
        (status = 200, description = "Part updated", body = PartView),
        (status = 404, description = "Part not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_part(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePartRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let updated = service
        .update_part(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Set a part's status.
#[utoipa::path(
    put,
    path = "/api/v1/parts/{part_id}/status",
    tag = "Parts",
    params(("part_id" = Uuid, Path, description = "Part UUID")),
    request_body = SetPartStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = PartView),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Part not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn set_part_status(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
    body: web::Json<SetPartStatusRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let updated = service
        .set_part_status(path.into_inner(), &body.status)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/parts")
            .route(web::get().to(list_parts))
            .route(web::post().to(create_part)),
    )
    .service(
        web::resource("/parts/{part_id}")
            .route(web::get().to(get_part))
            .route(web::patch().to(update_part)),
    )
    .service(web::resource("/parts/{part_id}/status").route(web::put().to(set_part_status)));
}

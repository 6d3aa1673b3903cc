//! Staff registry API handlers. Every route requires administrator permission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{CreateStaffRequest, PermissionLevel, StaffView, UpdateStaffRequest};
use crate::services::StaffService;

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    tag = "Staff",
    responses(
        (status = 200, description = "All staff", body = Vec<StaffView>),
        (status = 403, description = "Administrator permission required", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_staff(
    auth: StaffAuth,
    service: web::Data<StaffService>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    Ok(HttpResponse::Ok().json(service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/staff",
    tag = "Staff",
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff registered", body = StaffView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn create_staff(
    auth: StaffAuth,
    service: web::Data<StaffService>,
    body: web::Json<CreateStaffRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    let created = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_id}",
    tag = "Staff",
    params(("staff_id" = Uuid, Path, description = "Staff UUID")),
    responses(
        (status = 200, description = "Staff member", body = StaffView),
        (status = 404, description = "Staff not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_staff(
    auth: StaffAuth,
    service: web::Data<StaffService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    Ok(HttpResponse::Ok().json(service.get(path.into_inner()).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/staff/{staff_id}",
    tag = "Staff",
    params(("staff_id" = Uuid, Path, description = "Staff UUID")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Staff updated", body = StaffView),
        (status = 404, description = "Staff not found", body = ErrorResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_staff(
    auth: StaffAuth,
    service: web::Data<StaffService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStaffRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    let updated = service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/staff/{staff_id}",
    tag = "Staff",
    params(("staff_id" = Uuid, Path, description = "Staff UUID")),
    responses(
        (status = 204, description = "Staff deleted"),
        (status = 404, description = "Staff not found", body = ErrorResponse),
        (status = 409, description = "Staff has recorded tests", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_staff(
    auth: StaffAuth,
    service: web::Data<StaffService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Administrator)?;
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/staff")
            .route(web::get().to(list_staff))
            .route(web::post().to(create_staff)),
    )
    .service(
        web::resource("/staff/{staff_id}")
            .route(web::get().to(get_staff))
            .route(web::patch().to(update_staff))
            .route(web::delete().to(delete_staff)),
    );
}

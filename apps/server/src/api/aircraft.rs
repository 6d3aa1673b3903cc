//! Aircraft API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    AircraftDetail, AircraftView, CreateAircraftRequest, PermissionLevel, UpdateAircraftRequest,
};
use crate::services::ProductionService;

/// List aircraft, most recently registered first.
#[utoipa::path(
    get,
    path = "/api/v1/aircraft",
    tag = "Aircraft",
    responses(
        (status = 200, description = "All aircraft", body = Vec<AircraftView>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_aircraft(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_aircraft().await?))
}

/// Register an aircraft.
#[utoipa::path(
    post,
    path = "/api/v1/aircraft",
    tag = "Aircraft",
    request_body = CreateAircraftRequest,
    responses(
        (status = 201, description = "Aircraft registered", body = AircraftView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Engineer permission required", body = ErrorResponse),
        (status = 409, description = "Code already registered", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn create_aircraft(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    body: web::Json<CreateAircraftRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let created = service.create_aircraft(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Get an aircraft with its parts, stages, tests and report.
#[utoipa::path(
    get,
    path = "/api/v1/aircraft/{aircraft_id}",
    tag = "Aircraft",
    params(("aircraft_id" = Uuid, Path, description = "Aircraft UUID")),
    responses(
        (status = 200, description = "Aircraft detail", body = AircraftDetail),
        (status = 404, description = "Aircraft not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_aircraft(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_aircraft(path.into_inner()).await?))
}

/// Get an aircraft by its business code.
#[utoipa::path(
    get,
    path = "/api/v1/aircraft/code/{code}",
    tag = "Aircraft",
    params(("code" = String, Path, description = "Aircraft business code")),
    responses(
        (status = 200, description = "Aircraft detail", body = AircraftDetail),
        (status = 404, description = "Aircraft not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_aircraft_by_code(
    _auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_aircraft_by_code(&path.into_inner()).await?))
}

/// Update an aircraft. Omitted fields are unchanged.
#[utoipa::path(
    patch,
    path = "/api/v1/aircraft/{aircraft_id}",
    tag = "Aircraft",
    params(("aircraft_id" = Uuid, Path, description = "Aircraft UUID")),
    request_body = UpdateAircraftRequest,
    responses(
        (status = 200, description = "Aircraft updated", body = AircraftView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Aircraft not found", body = ErrorResponse),
        (status = 409, description = "Code already registered", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_aircraft(
    auth: StaffAuth,
    service: web::Data<ProductionService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAircraftRequest>,
) -> AppResult<HttpResponse> {
    auth.require(PermissionLevel::Engineer)?;
    let updated = service
        .update_aircraft(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/aircraft")
            .route(web::get().to(list_aircraft))
            .route(web::post().to(create_aircraft)),
    )
    .service(web::resource("/aircraft/code/{code}").route(web::get().to(get_aircraft_by_code)))
    .service(
        web::resource("/aircraft/{aircraft_id}")
            .route(web::get().to(get_aircraft))
            .route(web::patch().to(update_aircraft)),
    );
}

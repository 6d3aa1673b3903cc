//! Enumeration catalogue for form dropdowns.

use actix_web::{HttpResponse, get, web};

use crate::auth::StaffAuth;
use crate::models::EnumCatalogue;

/// Value/label pairs for every enumeration.
#[utoipa::path(
    get,
    path = "/api/v1/enums",
    tag = "Enums",
    responses((status = 200, description = "Enumeration catalogue", body = EnumCatalogue)),
    security(("bearer" = []))
)]
#[get("/enums")]
pub async fn list_enums(_auth: StaffAuth) -> HttpResponse {
    HttpResponse::Ok().json(EnumCatalogue::build())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_enums);
}

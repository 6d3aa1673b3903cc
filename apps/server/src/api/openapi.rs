//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AeroTrack Server",
        version = "0.1.0",
        description = "Aircraft production tracking: stages, parts, tests and final delivery reports"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::aircraft::list_aircraft,
        api::aircraft::create_aircraft,
        api::aircraft::get_aircraft,
        api::aircraft::get_aircraft_by_code,
        api::aircraft::update_aircraft,
        api::parts::list_parts,
        api::parts::create_part,
        api::parts::get_part,
        api::parts::update_part,
        api::parts::set_part_status,
        api::stages::list_stages,
        api::stages::create_stage,
        api::stages::get_stage,
        api::stages::update_stage,
        api::stages::start_stage,
        api::stages::finish_stage,
        api::stages::assign_staff,
        api::aircraft_tests::list_tests,
        api::aircraft_tests::register_test,
        api::reports::generate_report,
        api::reports::list_reports,
        api::reports::download_report,
        api::staff::list_staff,
        api::staff::create_staff,
        api::staff::get_staff,
        api::staff::update_staff,
        api::staff::delete_staff,
        api::enums::list_enums,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            models::AircraftType,
            models::PartType,
            models::PartStatus,
            models::StageStatus,
            models::TestType,
            models::TestResult,
            models::PermissionLevel,
            models::EnumOption,
            models::EnumCatalogue,
            models::CreateAircraftRequest,
            models::UpdateAircraftRequest,
            models::AircraftView,
            models::AircraftDetail,
            models::CreatePartRequest,
            models::UpdatePartRequest,
            models::SetPartStatusRequest,
            models::PartView,
            models::CreateStageRequest,
            models::UpdateStageRequest,
            models::AssignStaffRequest,
            models::StageView,
            models::StaffRef,
            models::CreateStaffRequest,
            models::UpdateStaffRequest,
            models::StaffView,
            models::RegisterTestRequest,
            models::TestView,
            models::ReportView,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Aircraft", description = "Aircraft registry"),
        (name = "Parts", description = "Parts and their supply status"),
        (name = "Stages", description = "Production stages and their lifecycle"),
        (name = "Tests", description = "Aircraft test results"),
        (name = "Reports", description = "Final delivery reports"),
        (name = "Staff", description = "Staff registry"),
        (name = "Enums", description = "Enumeration catalogue")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

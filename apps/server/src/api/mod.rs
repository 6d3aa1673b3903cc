//! API endpoint modules.

pub mod aircraft;
pub mod enums;
pub mod health;
pub mod openapi;
pub mod parts;
pub mod reports;
pub mod staff;
pub mod stages;

use actix_web::web;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Register every `/api/v1` route on the given scope.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(aircraft::configure_routes)
        .configure(parts::configure_routes)
        .configure(stages::configure_routes)
        .configure(aircraft_tests::configure_routes)
        .configure(reports::configure_routes)
        .configure(staff::configure_routes)
        .configure(enums::configure_routes);
}

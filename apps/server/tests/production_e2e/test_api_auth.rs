//! HTTP tests: bearer authentication, permission levels and error status mapping.

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use aerotrack_lib::middleware::{PROCESSING_TIME_HEADER, REQUEST_ID_HEADER, RequestLogger};
use aerotrack_lib::models::{PermissionLevel, RegisterTestRequest};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_helpers::{TestEnv, bearer, token_for, token_with};

fn aircraft_body(code: &str) -> Value {
    json!({
        "code": code,
        "model": "E175",
        "aircraft_type": "commercial",
        "capacity": 88,
        "range": 3700
    })
}

#[actix_rt::test]
async fn test_health_needs_no_token() {
    let env = TestEnv::new().await;
    let app = env.app().await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let env = TestEnv::new().await;
    let app = env.app().await;

    let req = test::TestRequest::get().uri("/api/v1/aircraft").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let forged = token_with(
        Uuid::now_v7(),
        PermissionLevel::Administrator,
        "some-other-secret-with-enough-length",
    );
    let req = test::TestRequest::get()
        .uri("/api/v1/aircraft")
        .insert_header(bearer(&forged))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn test_operator_can_read_but_not_register_aircraft() {
    let env = TestEnv::new().await;
    let app = env.app().await;
    let operator = token_for(PermissionLevel::Operator);

    let req = test::TestRequest::post()
        .uri("/api/v1/aircraft")
        .insert_header(bearer(&operator))
        .set_json(aircraft_body("OP-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/aircraft")
        .insert_header(bearer(&operator))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[actix_rt::test]
async fn test_engineer_registers_aircraft() {
    let env = TestEnv::new().await;
    let app = env.app().await;
    let engineer = token_for(PermissionLevel::Engineer);

    let req = test::TestRequest::post()
        .uri("/api/v1/aircraft")
        .insert_header(bearer(&engineer))
        .set_json(aircraft_body("ENG-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "ENG-1");
    assert_eq!(body["aircraft_type"], "commercial");

    let req = test::TestRequest::post()
        .uri("/api/v1/aircraft")
        .insert_header(bearer(&engineer))
        .set_json(aircraft_body("ENG-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[actix_rt::test]
async fn test_staff_management_requires_administrator() {
    let env = TestEnv::new().await;
    let app = env.app().await;
    let staff_body = json!({
        "name": "Ana",
        "phone": "+55 12 3456-7890",
        "address": "Av. Brigadeiro Faria Lima, 1",
        "username": "ana",
        "permission_level": "engineer"
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/staff")
        .insert_header(bearer(&token_for(PermissionLevel::Engineer)))
        .set_json(&staff_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin = token_for(PermissionLevel::Administrator);
    let req = test::TestRequest::post()
        .uri("/api/v1/staff")
        .insert_header(bearer(&admin))
        .set_json(&staff_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().expect("staff id").to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/staff/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_deleting_staff_with_recorded_tests_is_conflict() {
    let env = TestEnv::new().await;
    env.aircraft("DEL-2").await;
    let ana = env.staff_member("Ana", "engineer").await;
    env.production()
        .register_test(RegisterTestRequest {
            aircraft_code: "DEL-2".to_string(),
            staff_id: ana.id,
            test_type: "hydraulic".to_string(),
            result: "approved".to_string(),
            observation: None,
            performed_at: None,
        })
        .await
        .unwrap();
    let app = env.app().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/staff/{}", ana.id))
        .insert_header(bearer(&token_for(PermissionLevel::Administrator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");
    assert!(env.staff().get(ana.id).await.is_ok());
}

#[actix_rt::test]
async fn test_request_logger_sets_id_and_processing_time_headers() {
    let env = TestEnv::new().await;
    let ctx = env.ctx.clone();
    let app = test::init_service(
        App::new()
            .wrap(RequestLogger)
            .configure(move |cfg| ctx.configure(cfg)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let request_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(Uuid::parse_str(request_id).is_ok());

    let elapsed = resp
        .headers()
        .get(PROCESSING_TIME_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("processing time header");
    assert!(elapsed.parse::<u64>().is_ok());
}

#[actix_rt::test]
async fn test_precedence_violation_maps_to_conflict() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("HTTP-1").await;
    env.stage(aircraft.id, "Fuselage", vec![]).await;
    let s2 = env.stage(aircraft.id, "Wings", vec![]).await;
    let app = env.app().await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/stages/{}/start", s2.id))
        .insert_header(bearer(&token_for(PermissionLevel::Engineer)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PRECEDENCE_VIOLATION");
    assert!(body["message"].as_str().unwrap_or_default().contains("Fuselage"));
}

#[actix_rt::test]
async fn test_unknown_stage_maps_to_not_found() {
    let env = TestEnv::new().await;
    let app = env.app().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/stages/{}", Uuid::now_v7()))
        .insert_header(bearer(&token_for(PermissionLevel::Operator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_report_generation_and_download_over_http() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("HTTP-2").await;
    let app = env.app().await;
    let engineer = token_for(PermissionLevel::Engineer);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/aircraft/{}/report", aircraft.id))
        .insert_header(bearer(&token_for(PermissionLevel::Operator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/aircraft/{}/report", aircraft.id))
        .insert_header(bearer(&engineer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let report: Value = test::read_body_json(resp).await;
    let file_name = report["file_name"].as_str().expect("file name").to_string();
    assert!(file_name.starts_with("Relatorio_HTTP-2_"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/reports/files/{}", file_name))
        .insert_header(bearer(&engineer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains(&file_name));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"=== FINAL DELIVERY REPORT ==="));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/aircraft/{}/report", aircraft.id))
        .insert_header(bearer(&engineer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DUPLICATE_REPORT");
}

#[actix_rt::test]
async fn test_enum_catalogue_lists_every_enumeration() {
    let env = TestEnv::new().await;
    let app = env.app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/enums")
        .insert_header(bearer(&token_for(PermissionLevel::Operator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let statuses: Vec<&str> = body["stage_statuses"]
        .as_array()
        .expect("stage statuses")
        .iter()
        .filter_map(|o| o["value"].as_str())
        .collect();
    assert_eq!(statuses, vec!["pending", "in_progress", "completed"]);
    assert_eq!(body["part_statuses"][0]["label"], "In production");
    assert_eq!(body["permission_levels"].as_array().map(Vec::len), Some(3));
}

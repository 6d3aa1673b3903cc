//! Registry tests: aircraft, parts, tests and staff.

use aerotrack_lib::error::AppError;
use aerotrack_lib::models::{
    CreateAircraftRequest, CreatePartRequest, PartStatus, RegisterTestRequest, TestResult,
    UpdateAircraftRequest, UpdatePartRequest, UpdateStaffRequest,
};
use uuid::Uuid;

use crate::test_helpers::TestEnv;

fn aircraft_request(code: &str) -> CreateAircraftRequest {
    CreateAircraftRequest {
        code: code.to_string(),
        model: "KC-390".to_string(),
        aircraft_type: "military".to_string(),
        capacity: 80,
        range: 5820,
    }
}

#[actix_rt::test]
async fn test_aircraft_code_must_be_unique() {
    let env = TestEnv::new().await;
    env.aircraft("DUP-A").await;

    let err = env
        .production()
        .create_aircraft(aircraft_request("DUP-A"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_rt::test]
async fn test_update_aircraft_to_taken_code_conflicts() {
    let env = TestEnv::new().await;
    env.aircraft("TAKEN").await;
    let other = env.aircraft("FREE").await;

    let err = env
        .production()
        .update_aircraft(
            other.id,
            UpdateAircraftRequest {
                code: Some("TAKEN".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let renamed = env
        .production()
        .update_aircraft(
            other.id,
            UpdateAircraftRequest {
                capacity: Some(150),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.code, "FREE");
    assert_eq!(renamed.capacity, 150);
}

#[actix_rt::test]
async fn test_aircraft_input_is_validated() {
    let env = TestEnv::new().await;

    let mut bad_type = aircraft_request("V-1");
    bad_type.aircraft_type = "cargo".to_string();
    let mut negative = aircraft_request("V-2");
    negative.capacity = -1;
    let mut blank = aircraft_request("   ");
    blank.model = "E2".to_string();

    for req in [bad_type, negative, blank, aircraft_request("../etc")] {
        let err = env.production().create_aircraft(req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "got {:?}", err);
    }

    assert!(env.production().list_aircraft().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_aircraft_lookup_by_code() {
    let env = TestEnv::new().await;
    let created = env.aircraft("PR-XYZ").await;

    let detail = env
        .production()
        .get_aircraft_by_code("PR-XYZ")
        .await
        .unwrap();
    assert_eq!(detail.aircraft.id, created.id);
    assert!(detail.report.is_none());

    let err = env
        .production()
        .get_aircraft_by_code("PR-NONE")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Aircraft", .. }));
}

#[actix_rt::test]
async fn test_part_defaults_and_status_changes() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("PART-1").await;

    let part = env
        .production()
        .create_part(CreatePartRequest {
            aircraft_id: aircraft.id,
            name: "Rudder".to_string(),
            part_type: "imported".to_string(),
            supplier: "Aerostructures Ltd".to_string(),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(part.status, PartStatus::InProduction);
    assert_eq!(part.aircraft_code, "PART-1");

    // Any status may follow any other.
    let ready = env
        .production()
        .set_part_status(part.id, "ready")
        .await
        .unwrap();
    assert_eq!(ready.status, PartStatus::Ready);
    let back = env
        .production()
        .set_part_status(part.id, "in_production")
        .await
        .unwrap();
    assert_eq!(back.status, PartStatus::InProduction);

    let err = env
        .production()
        .set_part_status(part.id, "lost")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let edited = env
        .production()
        .update_part(
            part.id,
            UpdatePartRequest {
                supplier: Some("Embraer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.supplier, "Embraer");
    assert_eq!(edited.status, PartStatus::InProduction);
}

#[actix_rt::test]
async fn test_part_for_unknown_aircraft_is_not_found() {
    let env = TestEnv::new().await;

    let err = env
        .production()
        .create_part(CreatePartRequest {
            aircraft_id: Uuid::now_v7(),
            name: "Rudder".to_string(),
            part_type: "national".to_string(),
            supplier: "Embraer".to_string(),
            status: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Aircraft", .. }));

    let err = env.production().get_part(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Part", .. }));
}

#[actix_rt::test]
async fn test_register_test_by_aircraft_code() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("TST-1").await;
    let ana = env.staff_member("Ana", "operator").await;

    let recorded = env
        .production()
        .register_test(RegisterTestRequest {
            aircraft_code: "TST-1".to_string(),
            staff_id: ana.id,
            test_type: "aerodynamic".to_string(),
            result: "rejected".to_string(),
            observation: Some("  Flutter at Mach 0.8  ".to_string()),
            performed_at: None,
        })
        .await
        .unwrap();

    assert_eq!(recorded.aircraft_id, aircraft.id);
    assert_eq!(recorded.result, TestResult::Rejected);
    assert_eq!(recorded.staff_name.as_deref(), Some("Ana"));
    assert_eq!(recorded.observation.as_deref(), Some("Flutter at Mach 0.8"));

    let listed = env.production().list_tests().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].aircraft_code, "TST-1");
}

#[actix_rt::test]
async fn test_register_test_with_unknown_references() {
    let env = TestEnv::new().await;
    env.aircraft("TST-2").await;
    let ana = env.staff_member("Ana", "operator").await;

    let err = env
        .production()
        .register_test(RegisterTestRequest {
            aircraft_code: "NOPE".to_string(),
            staff_id: ana.id,
            test_type: "electrical".to_string(),
            result: "approved".to_string(),
            observation: None,
            performed_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Aircraft", .. }));

    let err = env
        .production()
        .register_test(RegisterTestRequest {
            aircraft_code: "TST-2".to_string(),
            staff_id: Uuid::now_v7(),
            test_type: "electrical".to_string(),
            result: "approved".to_string(),
            observation: None,
            performed_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Staff", .. }));
}

#[actix_rt::test]
async fn test_staff_username_must_be_unique() {
    let env = TestEnv::new().await;
    let ana = env.staff_member("Ana", "engineer").await;
    let bruno = env.staff_member("Bruno", "operator").await;

    let err = env
        .staff()
        .update(
            bruno.id,
            UpdateStaffRequest {
                username: Some(ana.username.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(msg) if msg.contains(&ana.username)));
}

#[actix_rt::test]
async fn test_staff_permission_level_is_validated() {
    let env = TestEnv::new().await;
    let ana = env.staff_member("Ana", "engineer").await;

    let err = env
        .staff()
        .update(
            ana.id,
            UpdateStaffRequest {
                permission_level: Some("superuser".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[actix_rt::test]
async fn test_staff_referenced_by_test_cannot_be_deleted() {
    let env = TestEnv::new().await;
    env.aircraft("DEL-1").await;
    let ana = env.staff_member("Ana", "operator").await;
    let bruno = env.staff_member("Bruno", "operator").await;

    env.production()
        .register_test(RegisterTestRequest {
            aircraft_code: "DEL-1".to_string(),
            staff_id: ana.id,
            test_type: "electrical".to_string(),
            result: "approved".to_string(),
            observation: None,
            performed_at: None,
        })
        .await
        .unwrap();

    let err = env.staff().delete(ana.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    env.staff().delete(bruno.id).await.unwrap();
    let remaining: Vec<_> = env
        .staff()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(remaining, vec!["Ana".to_string()]);
}

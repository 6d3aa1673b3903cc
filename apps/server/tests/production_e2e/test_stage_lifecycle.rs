//! Stage lifecycle tests: precedence, state transitions and staff assignment.

use aerotrack_lib::error::AppError;
use aerotrack_lib::models::{CreateStageRequest, StageStatus, UpdateStageRequest};
use uuid::Uuid;

use crate::test_helpers::TestEnv;

#[actix_rt::test]
async fn test_stages_are_sequenced_in_creation_order() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("SEQ-1").await;

    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;
    let s2 = env.stage(aircraft.id, "Wings", vec![]).await;
    let s3 = env.stage(aircraft.id, "Avionics", vec![]).await;

    assert_eq!((s1.sequence, s2.sequence, s3.sequence), (1, 2, 3));
    assert_eq!(s1.status, StageStatus::Pending);
    assert_eq!(s2.aircraft_code, "SEQ-1");
}

#[actix_rt::test]
async fn test_start_names_first_incomplete_earlier_stage() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("PREC-1").await;

    let _s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;
    let _s2 = env.stage(aircraft.id, "Wings", vec![]).await;
    let s3 = env.stage(aircraft.id, "Avionics", vec![]).await;

    let err = env.production().start_stage(s3.id).await.unwrap_err();
    match err {
        AppError::PrecedenceViolation { blocking_stage } => {
            assert_eq!(blocking_stage, "Fuselage")
        }
        other => panic!("expected PrecedenceViolation, got {:?}", other),
    }

    let unchanged = env.production().get_stage(s3.id).await.unwrap();
    assert_eq!(unchanged.status, StageStatus::Pending);
}

#[actix_rt::test]
async fn test_start_allowed_once_earlier_stages_complete() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("PREC-2").await;

    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;
    let s2 = env.stage(aircraft.id, "Wings", vec![]).await;

    env.complete_stages(&[&s1]).await;

    let started = env.production().start_stage(s2.id).await.unwrap();
    assert_eq!(started.status, StageStatus::InProgress);
}

#[actix_rt::test]
async fn test_precedence_ignores_other_aircraft() {
    let env = TestEnv::new().await;
    let first = env.aircraft("ISO-1").await;
    let second = env.aircraft("ISO-2").await;

    let _pending = env.stage(first.id, "Fuselage", vec![]).await;
    let other = env.stage(second.id, "Fuselage", vec![]).await;

    assert_eq!(other.sequence, 1);
    let started = env.production().start_stage(other.id).await.unwrap();
    assert_eq!(started.status, StageStatus::InProgress);
}

#[actix_rt::test]
async fn test_start_twice_is_rejected() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("TWICE-1").await;
    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;

    env.production().start_stage(s1.id).await.unwrap();
    let err = env.production().start_stage(s1.id).await.unwrap_err();

    assert!(matches!(err, AppError::AlreadyStarted(name) if name == "Fuselage"));
}

#[actix_rt::test]
async fn test_finish_requires_in_progress() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("FIN-1").await;
    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;

    let err = env.production().finish_stage(s1.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotStarted(_)));

    env.production().start_stage(s1.id).await.unwrap();
    let finished = env.production().finish_stage(s1.id).await.unwrap();
    assert_eq!(finished.status, StageStatus::Completed);

    let err = env.production().finish_stage(s1.id).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyCompleted(_)));
}

#[actix_rt::test]
async fn test_unknown_stage_is_not_found() {
    let env = TestEnv::new().await;

    let err = env.production().start_stage(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Stage", .. }));
}

#[actix_rt::test]
async fn test_create_stage_with_missing_references_writes_nothing() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("REF-1").await;

    let err = env
        .production()
        .create_stage(CreateStageRequest {
            aircraft_id: Uuid::now_v7(),
            name: "Fuselage".to_string(),
            deadline: "2025-12-31".to_string(),
            status: None,
            staff_ids: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Aircraft", .. }));

    let err = env
        .production()
        .create_stage(CreateStageRequest {
            aircraft_id: aircraft.id,
            name: "Fuselage".to_string(),
            deadline: "2025-12-31".to_string(),
            status: None,
            staff_ids: vec![Uuid::now_v7()],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Staff", .. }));

    assert!(env.production().list_stages().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_stage_rejects_unknown_status() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("BAD-1").await;

    let err = env
        .production()
        .create_stage(CreateStageRequest {
            aircraft_id: aircraft.id,
            name: "Fuselage".to_string(),
            deadline: "2025-12-31".to_string(),
            status: Some("paused".to_string()),
            staff_ids: vec![],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[actix_rt::test]
async fn test_assign_staff_is_idempotent() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("ASSIGN-1").await;
    let ana = env.staff_member("Ana", "engineer").await;
    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;

    let once = env.production().assign_staff(s1.id, ana.id).await.unwrap();
    let twice = env.production().assign_staff(s1.id, ana.id).await.unwrap();

    assert_eq!(once.staff.len(), 1);
    assert_eq!(twice.staff.len(), 1);
    assert_eq!(twice.staff[0].name, "Ana");
}

#[actix_rt::test]
async fn test_assign_unknown_staff_is_not_found() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("ASSIGN-2").await;
    let s1 = env.stage(aircraft.id, "Fuselage", vec![]).await;

    let err = env
        .production()
        .assign_staff(s1.id, Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Staff", .. }));
}

#[actix_rt::test]
async fn test_update_replaces_staff_set() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("UPD-1").await;
    let ana = env.staff_member("Ana", "engineer").await;
    let bruno = env.staff_member("Bruno", "operator").await;
    let carla = env.staff_member("Carla", "operator").await;

    let s1 = env.stage(aircraft.id, "Fuselage", vec![ana.id, bruno.id]).await;
    let names: Vec<_> = s1.staff.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bruno"]);

    let updated = env
        .production()
        .update_stage(
            s1.id,
            UpdateStageRequest {
                name: Some("Fuselage assembly".to_string()),
                staff_ids: Some(vec![carla.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Fuselage assembly");
    assert_eq!(updated.staff.len(), 1);
    assert_eq!(updated.staff[0].id, carla.id);
    assert_eq!(updated.sequence, 1);
}

#[actix_rt::test]
async fn test_list_stages_newest_first() {
    let env = TestEnv::new().await;
    let aircraft = env.aircraft("LIST-1").await;

    env.stage(aircraft.id, "Fuselage", vec![]).await;
    env.stage(aircraft.id, "Wings", vec![]).await;

    let stages = env.production().list_stages().await.unwrap();
    let names: Vec<_> = stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Wings", "Fuselage"]);
}

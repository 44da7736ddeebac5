//! HTTP-level tests for the process, task and statistics endpoints.
//!
//! Each test spawns the in-process stub backend on an ephemeral port and
//! talks to it through `PortalApi`.

mod common;

use assert_matches::assert_matches;
use axum::routing::get;
use axum::Router;

use hrportal_client::{ClientConfig, ClientError, PortalApi};
use hrportal_core::models::process::{CreateProcess, ProcessListParams, UpdateProcessStatus};
use hrportal_core::models::task::{CreateTask, UpdateTaskStatus};
use hrportal_core::process_status::{ProcessStatus, ProcessType};
use hrportal_core::task_status::TaskStatus;
use hrportal_core::task_type::{DetailTaskType, TaskType};

fn create_process_input(template_id: Option<i64>) -> CreateProcess {
    CreateProcess {
        process_type: ProcessType::Onboarding,
        title: "Indiensttreding Sanne".into(),
        description: None,
        employee_name: "Sanne Peeters".into(),
        employee_email: Some("sanne@example.nl".into()),
        planned_start_date: None,
        desired_end_date: None,
        responsible_id: Some(1),
        template_id,
    }
}

// ---------------------------------------------------------------------------
// Processes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_process_unwraps_envelope() {
    let (_stub, api) = common::seeded_backend().await;

    let process = api.get_process(1).await.unwrap();
    assert_eq!(process.id, 1);
    assert_eq!(process.status, ProcessStatus::InProgress);
    assert_eq!(process.tasks.len(), 4);
    assert_eq!(process.completion().percent(), 25);
}

#[tokio::test]
async fn test_list_processes_applies_filters() {
    let (_stub, api) = common::seeded_backend().await;

    let all = api.list_processes(&ProcessListParams::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let offboarding = api
        .list_processes(&ProcessListParams {
            process_type: Some(ProcessType::Offboarding),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(offboarding.len(), 1);
    assert_eq!(offboarding[0].id, 2);

    let finished = api
        .list_processes(&ProcessListParams {
            process_type: None,
            status: Some(ProcessStatus::Voltooid),
        })
        .await
        .unwrap();
    assert!(finished.is_empty());
}

#[tokio::test]
async fn test_missing_process_is_not_found() {
    let (_stub, api) = common::seeded_backend().await;

    let err = api.get_process(999).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound { ref message } if message == "Process 999 not found");
}

#[tokio::test]
async fn test_create_process_from_template_expands_definitions() {
    let (_stub, api) = common::seeded_backend().await;

    let process = api.create_process(&create_process_input(Some(1))).await.unwrap();
    assert_eq!(process.status, ProcessStatus::Nieuw);
    assert_eq!(process.template_id, Some(1));

    let tasks = process.ordered_tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].order, 1);
    assert_eq!(
        tasks[0].task_type.template_type(),
        Some(TaskType::AccountAanmaken)
    );
    assert!(tasks.iter().all(|t| t.status == TaskStatus::NietGestart));
}

#[tokio::test]
async fn test_create_process_with_unknown_template_is_not_found() {
    let (_stub, api) = common::seeded_backend().await;

    let err = api
        .create_process(&create_process_input(Some(42)))
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::NotFound { .. });
}

#[tokio::test]
async fn test_process_status_transition_is_enforced_by_backend() {
    let (_stub, api) = common::seeded_backend().await;

    let paused = api
        .update_process_status(
            1,
            &UpdateProcessStatus {
                status: ProcessStatus::OnHold,
            },
        )
        .await
        .unwrap();
    assert_eq!(paused.status, ProcessStatus::OnHold);

    let err = api
        .update_process_status(
            1,
            &UpdateProcessStatus {
                status: ProcessStatus::Voltooid,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation { .. });
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_task_status_change_records_notes() {
    let (_stub, api) = common::seeded_backend().await;

    let task = api
        .update_task_status(
            12,
            &UpdateTaskStatus {
                status: TaskStatus::Voltooid,
                notes: Some("Laptop overhandigd".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Voltooid);
    assert_eq!(task.completion_notes.as_deref(), Some("Laptop overhandigd"));
    assert!(task.completed_at.is_some());

    let process = api.get_process(1).await.unwrap();
    assert_eq!(process.completion().completed, 2);
    assert_eq!(process.completion().percent(), 50);
}

#[tokio::test]
async fn test_rejected_task_transition_is_validation_error() {
    let (_stub, api) = common::seeded_backend().await;

    let err = api
        .update_task_status(
            11,
            &UpdateTaskStatus {
                status: TaskStatus::Bezig,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation { ref message } if message.contains("Cannot transition"));
}

#[tokio::test]
async fn test_create_task_appends_after_last_order() {
    let (_stub, api) = common::seeded_backend().await;

    let input = CreateTask {
        task_type: DetailTaskType::Hardware.into(),
        title: "Tweede scherm".into(),
        description: None,
        is_mandatory: false,
        expected_duration_days: 2,
        deadline: None,
        assigned_to_id: None,
    };
    let task = api.create_task(1, &input).await.unwrap();
    assert_eq!(task.order, 5);
    assert_eq!(task.task_type.detail_type(), Some(DetailTaskType::Hardware));
    assert_eq!(task.status, TaskStatus::NietGestart);
}

#[tokio::test]
async fn test_delete_task_removes_it_from_process() {
    let (stub, api) = common::seeded_backend().await;

    api.delete_task(14).await.unwrap();
    let process = api.get_process(1).await.unwrap();
    assert!(process.task(14).is_none());
    assert_eq!(stub.count("DELETE", "/api/onboarding/tasks/14"), 1);

    let err = api.delete_task(14).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound { .. });
}

#[tokio::test]
async fn test_statistics_reflect_backend_state() {
    let (_stub, api) = common::seeded_backend().await;

    let stats = api.statistics().await.unwrap();
    assert_eq!(stats.active_onboardings, 1);
    assert_eq!(stats.active_offboardings, 1);
    assert_eq!(stats.open_tasks, 4);
    assert_eq!(stats.completed_processes, 0);
}

// ---------------------------------------------------------------------------
// Transport concerns
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_every_request_carries_a_request_id() {
    let (stub, api) = common::seeded_backend().await;

    api.get_process(1).await.unwrap();
    api.statistics().await.unwrap();

    let ids: Vec<String> = stub
        .state()
        .requests
        .iter()
        .map(|r| r.request_id.clone().expect("request id header"))
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    for id in ids {
        assert!(uuid::Uuid::parse_str(&id).is_ok(), "{id}");
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent_when_configured() {
    let stub = common::Stub::seeded();
    let base_url = common::spawn(stub.clone()).await;
    let api = PortalApi::new(&ClientConfig {
        api_url: format!("{base_url}/"),
        api_token: Some("geheim".into()),
        ..ClientConfig::default()
    })
    .unwrap();

    api.list_employees().await.unwrap();
    let state = stub.state();
    assert_eq!(state.requests[0].path, "/api/employees");
    assert_eq!(
        state.requests[0].authorization.as_deref(),
        Some("Bearer geheim")
    );
}

#[tokio::test]
async fn test_body_without_envelope_is_decode_error() {
    let app = Router::new().route(
        "/api/onboarding/statistics",
        get(|| async { axum::Json(serde_json::json!({ "activeOnboardings": 3 })) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = common::api(&format!("http://{addr}"));
    let err = api.statistics().await.unwrap_err();
    assert_matches!(err, ClientError::Decode(_));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = common::api(&format!("http://{addr}"));
    let err = api.get_process(1).await.unwrap_err();
    assert_matches!(err, ClientError::Transport(_));
    assert!(err.user_message().contains("niet bereikbaar"));
}

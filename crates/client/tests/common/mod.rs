//! In-process stub of the portal backend for client integration tests.
//!
//! Serves the onboarding, personnel and group routes from in-memory state
//! on an ephemeral port, records every request, and enforces the same
//! status transition tables the client checks locally.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use hrportal_client::api::REQUEST_ID_HEADER;
use hrportal_client::{ClientConfig, PortalApi};
use hrportal_core::models::employee::Employee;
use hrportal_core::models::group::{DirectoryGroup, DistributionGroup, DynamicGroup};
use hrportal_core::models::process::{
    CreateProcess, OnboardingProcess, ProcessListParams, UpdateProcessStatus,
};
use hrportal_core::models::statistics::OnboardingStatistics;
use hrportal_core::models::task::{CreateTask, OnboardingTask, UpdateTask, UpdateTaskStatus};
use hrportal_core::models::template::{
    CreateTemplate, DuplicateTemplate, OnboardingTemplate, TemplateListParams, UpdateTemplate,
};
use hrportal_core::process_status::{self, ProcessStatus, ProcessType};
use hrportal_core::response::{DataResponse, ErrorResponse};
use hrportal_core::task_status::{self, TaskStatus};
use hrportal_core::task_type::TaskType;
use hrportal_core::template::{self, TemplateTaskDefinition};
use hrportal_core::types::DbId;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub processes: BTreeMap<DbId, OnboardingProcess>,
    pub templates: BTreeMap<DbId, OnboardingTemplate>,
    pub employees: Vec<Employee>,
    pub directory_groups: Vec<DirectoryGroup>,
    pub dynamic_groups: Vec<DynamicGroup>,
    pub distribution_groups: Vec<DistributionGroup>,
    pub requests: Vec<RecordedRequest>,
    /// Forced failure for the next non-GET request.
    pub fail_next: Option<(StatusCode, String)>,
    /// Forced failure for the next GET whose path starts with the prefix.
    pub fail_next_get: Option<(String, (StatusCode, String))>,
    /// Artificial latency applied to non-GET requests.
    pub mutation_delay_ms: u64,
    next_id: DbId,
}

impl StubState {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn task_mut(&mut self, task_id: DbId) -> Option<&mut OnboardingTask> {
        self.processes
            .values_mut()
            .flat_map(|p| p.tasks.iter_mut())
            .find(|t| t.id == task_id)
    }
}

/// Shared handle to the stub's state.
#[derive(Debug, Clone, Default)]
pub struct Stub(Arc<Mutex<StubState>>);

impl Stub {
    /// A stub populated with two processes, three templates, employees and
    /// one group of each source.
    pub fn seeded() -> Self {
        let stub = Self::default();
        {
            let mut state = stub.state();
            state.next_id = 100;

            state.employees = vec![
                employee(1, "Anna de Vries", true),
                employee(2, "Bram Jansen", true),
                employee(3, "Oud Medewerker", false),
            ];

            state.processes.insert(
                1,
                process(
                    1,
                    ProcessType::Onboarding,
                    ProcessStatus::InProgress,
                    vec![
                        task(11, 1, 1, TaskStatus::Voltooid),
                        task(12, 1, 2, TaskStatus::Bezig),
                        task(13, 1, 3, TaskStatus::NietGestart),
                        task(14, 1, 4, TaskStatus::NietGestart),
                    ],
                ),
            );
            state.processes.insert(
                2,
                process(
                    2,
                    ProcessType::Offboarding,
                    ProcessStatus::OnHold,
                    vec![task(21, 2, 1, TaskStatus::NietGestart)],
                ),
            );

            let definitions = vec![
                definition(TaskType::AccountAanmaken, 1),
                definition(TaskType::HardwareUitgeven, 2),
            ];
            state.templates.insert(
                1,
                template_record(
                    1,
                    "Standaard onboarding",
                    ProcessType::Onboarding,
                    true,
                    template::encode(&definitions).unwrap(),
                ),
            );
            state.templates.insert(
                2,
                template_record(2, "Stagiair", ProcessType::Onboarding, false, "[]".into()),
            );
            state.templates.insert(
                3,
                template_record(
                    3,
                    "Vertrek",
                    ProcessType::Offboarding,
                    true,
                    "{not json".into(),
                ),
            );

            state.directory_groups = vec![DirectoryGroup {
                object_id: "aad-1".into(),
                display_name: "finance".into(),
                mail: Some("finance@example.nl".into()),
                member_count: 12,
                description: None,
            }];
            state.dynamic_groups = vec![DynamicGroup {
                id: 1,
                name: "Alle medewerkers".into(),
                rule: "user.department -ne null".into(),
                member_ids: vec![1, 2],
                description: None,
            }];
            state.distribution_groups = vec![DistributionGroup {
                id: 1,
                name: "Bestuur".into(),
                smtp_address: Some("bestuur@example.nl".into()),
                members: vec!["anna@example.nl".into()],
            }];
        }
        stub
    }

    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.0.lock().unwrap()
    }

    /// Number of recorded requests with this method and path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn fail_next(&self, status: StatusCode, message: &str) {
        self.state().fail_next = Some((status, message.to_string()));
    }

    pub fn fail_next_get(&self, path_prefix: &str, status: StatusCode, message: &str) {
        self.state().fail_next_get = Some((
            path_prefix.to_string(),
            (status, message.to_string()),
        ));
    }

    pub fn set_mutation_delay(&self, millis: u64) {
        self.state().mutation_delay_ms = millis;
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn employee(id: DbId, name: &str, active: bool) -> Employee {
    Employee {
        id,
        display_name: name.to_string(),
        email: Some(format!(
            "{}@example.nl",
            name.split_whitespace().next().unwrap_or("x").to_lowercase()
        )),
        department: Some("ICT".into()),
        job_title: None,
        is_active: active,
    }
}

pub fn task(id: DbId, process_id: DbId, order: u32, status: TaskStatus) -> OnboardingTask {
    OnboardingTask {
        id,
        process_id,
        task_type: TaskType::Overig.into(),
        title: format!("Taak {order}"),
        description: None,
        order,
        is_mandatory: true,
        expected_duration_days: 1,
        status,
        deadline: None,
        assigned_to_id: None,
        assigned_to_name: None,
        started_at: None,
        completed_at: None,
        completion_notes: None,
        completed_by_name: None,
    }
}

pub fn process(
    id: DbId,
    process_type: ProcessType,
    status: ProcessStatus,
    tasks: Vec<OnboardingTask>,
) -> OnboardingProcess {
    let now = Utc::now();
    OnboardingProcess {
        id,
        process_type,
        title: format!("{} {id}", process_type.label()),
        description: None,
        employee_name: format!("Medewerker {id}"),
        employee_email: None,
        planned_start_date: None,
        desired_end_date: None,
        status,
        responsible_id: Some(1),
        responsible_name: Some("Anna de Vries".into()),
        template_id: None,
        tasks,
        created_at: now,
        updated_at: now,
    }
}

pub fn definition(task_type: TaskType, order: u32) -> TemplateTaskDefinition {
    TemplateTaskDefinition {
        order,
        ..TemplateTaskDefinition::new(task_type)
    }
}

pub fn template_record(
    id: DbId,
    name: &str,
    process_type: ProcessType,
    is_default: bool,
    task_definitions: String,
) -> OnboardingTemplate {
    let now = Utc::now();
    OnboardingTemplate {
        id,
        name: name.to_string(),
        process_type,
        description: None,
        default_duration_days: 14,
        is_default,
        is_active: true,
        task_definitions,
        created_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Serve `stub` on an ephemeral local port; returns the base URL.
pub async fn spawn(stub: Stub) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(stub);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A client pointed at `base_url` with test-friendly timeouts.
pub fn api(base_url: &str) -> PortalApi {
    let config = ClientConfig {
        api_url: base_url.to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        ..ClientConfig::default()
    };
    PortalApi::new(&config).unwrap()
}

/// Spawn a seeded stub and return it with a client.
pub async fn seeded_backend() -> (Stub, PortalApi) {
    let stub = Stub::seeded();
    let base_url = spawn(stub.clone()).await;
    (stub, api(&base_url))
}

fn router(stub: Stub) -> Router {
    let api = Router::new()
        .route(
            "/onboarding/processes",
            get(list_processes).post(create_process),
        )
        .route("/onboarding/processes/{id}", get(get_process))
        .route(
            "/onboarding/processes/{id}/status",
            put(update_process_status),
        )
        .route(
            "/onboarding/processes/{id}/tasks",
            axum::routing::post(create_task),
        )
        .route("/onboarding/tasks/{id}", put(update_task).delete(delete_task))
        .route("/onboarding/tasks/{id}/status", put(update_task_status))
        .route(
            "/onboarding/templates",
            get(list_templates).post(create_template),
        )
        .route(
            "/onboarding/templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .route(
            "/onboarding/templates/{id}/duplicate",
            axum::routing::post(duplicate_template),
        )
        .route("/onboarding/templates/{id}/default", put(set_default_template))
        .route("/onboarding/statistics", get(statistics))
        .route("/employees", get(list_employees))
        .route("/groups/directory", get(directory_groups))
        .route("/groups/dynamic", get(dynamic_groups))
        .route("/groups/distribution", get(distribution_groups));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(stub.clone(), record))
        .with_state(stub)
}

/// Record the request, then apply any configured latency or forced failure.
async fn record(State(stub): State<Stub>, request: Request, next: Next) -> Response {
    let is_mutation = *request.method() != Method::GET;
    // Built in its own scope: the header closure borrows the request, which
    // must not be held across the await below.
    let recorded = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            request_id: header(REQUEST_ID_HEADER),
            authorization: header("authorization"),
        }
    };

    let (delay, forced) = {
        let mut state = stub.state();
        let forced = if is_mutation {
            state.fail_next.take()
        } else {
            let matches = state
                .fail_next_get
                .as_ref()
                .is_some_and(|(prefix, _)| recorded.path.starts_with(prefix.as_str()));
            if matches {
                state.fail_next_get.take().map(|(_, failure)| failure)
            } else {
                None
            }
        };
        state.requests.push(recorded);
        (state.mutation_delay_ms, forced)
    };

    if is_mutation && delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if let Some((status, message)) = forced {
        return error(status, &message);
    }
    next.run(request).await
}

fn data<T: Serialize>(status: StatusCode, value: T) -> Response {
    (status, Json(DataResponse { data: value })).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    let code = match status {
        StatusCode::BAD_REQUEST => "VALIDATION_ERROR",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        _ => "INTERNAL_ERROR",
    };
    let body = ErrorResponse {
        error: message.to_string(),
        code: Some(code.to_string()),
    };
    (status, Json(body)).into_response()
}

fn not_found(entity: &str, id: DbId) -> Response {
    error(StatusCode::NOT_FOUND, &format!("{entity} {id} not found"))
}

// ---------------------------------------------------------------------------
// Process handlers
// ---------------------------------------------------------------------------

async fn list_processes(
    State(stub): State<Stub>,
    Query(params): Query<ProcessListParams>,
) -> Response {
    let state = stub.state();
    let processes: Vec<OnboardingProcess> = state
        .processes
        .values()
        .filter(|p| params.process_type.map_or(true, |t| p.process_type == t))
        .filter(|p| params.status.map_or(true, |s| p.status == s))
        .cloned()
        .collect();
    data(StatusCode::OK, processes)
}

async fn get_process(State(stub): State<Stub>, Path(id): Path<DbId>) -> Response {
    match stub.state().processes.get(&id) {
        Some(process) => data(StatusCode::OK, process.clone()),
        None => not_found("Process", id),
    }
}

async fn create_process(State(stub): State<Stub>, Json(input): Json<CreateProcess>) -> Response {
    if let Err(e) = input.check() {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    let mut state = stub.state();
    let definitions = match input.template_id {
        Some(template_id) => match state.templates.get(&template_id) {
            Some(t) => template::decode_or_empty(&t.task_definitions),
            None => return not_found("Template", template_id),
        },
        None => Vec::new(),
    };

    let id = state.next_id();
    let mut tasks = Vec::with_capacity(definitions.len());
    for def in definitions {
        let task_id = state.next_id();
        tasks.push(OnboardingTask {
            task_type: def.task_type,
            title: def.title,
            description: def.description,
            is_mandatory: def.is_mandatory,
            expected_duration_days: def.expected_duration_days,
            ..task(task_id, id, def.order, TaskStatus::NietGestart)
        });
    }

    let mut created = process(id, input.process_type, ProcessStatus::Nieuw, tasks);
    created.title = input.title;
    created.employee_name = input.employee_name;
    created.employee_email = input.employee_email;
    created.template_id = input.template_id;
    state.processes.insert(id, created.clone());
    data(StatusCode::CREATED, created)
}

async fn update_process_status(
    State(stub): State<Stub>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProcessStatus>,
) -> Response {
    let mut state = stub.state();
    let Some(process) = state.processes.get_mut(&id) else {
        return not_found("Process", id);
    };
    if let Err(e) = process_status::validate_transition(process.status, input.status) {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    process.status = input.status;
    process.updated_at = Utc::now();
    data(StatusCode::OK, process.clone())
}

// ---------------------------------------------------------------------------
// Task handlers
// ---------------------------------------------------------------------------

async fn create_task(
    State(stub): State<Stub>,
    Path(process_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> Response {
    if let Err(e) = input.check() {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    let mut state = stub.state();
    if !state.processes.contains_key(&process_id) {
        return not_found("Process", process_id);
    }
    let task_id = state.next_id();
    let Some(process) = state.processes.get_mut(&process_id) else {
        return not_found("Process", process_id);
    };
    let order = process.tasks.iter().map(|t| t.order).max().unwrap_or(0) + 1;
    let created = OnboardingTask {
        task_type: input.task_type,
        title: input.title,
        description: input.description,
        is_mandatory: input.is_mandatory,
        expected_duration_days: input.expected_duration_days,
        deadline: input.deadline,
        assigned_to_id: input.assigned_to_id,
        ..task(task_id, process_id, order, TaskStatus::NietGestart)
    };
    process.tasks.push(created.clone());
    data(StatusCode::CREATED, created)
}

async fn update_task(
    State(stub): State<Stub>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> Response {
    let mut state = stub.state();
    let assignee_name = input.assigned_to_id.and_then(|employee_id| {
        state
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .map(|e| e.display_name.clone())
    });
    let Some(task) = state.task_mut(id) else {
        return not_found("Task", id);
    };
    if let Some(title) = input.title {
        task.title = title;
    }
    if input.description.is_some() {
        task.description = input.description;
    }
    if let Some(mandatory) = input.is_mandatory {
        task.is_mandatory = mandatory;
    }
    if let Some(days) = input.expected_duration_days {
        task.expected_duration_days = days;
    }
    if input.deadline.is_some() {
        task.deadline = input.deadline;
    }
    if input.assigned_to_id.is_some() {
        task.assigned_to_id = input.assigned_to_id;
        task.assigned_to_name = assignee_name;
    }
    data(StatusCode::OK, task.clone())
}

async fn delete_task(State(stub): State<Stub>, Path(id): Path<DbId>) -> Response {
    let mut state = stub.state();
    for process in state.processes.values_mut() {
        if let Some(index) = process.tasks.iter().position(|t| t.id == id) {
            process.tasks.remove(index);
            return StatusCode::NO_CONTENT.into_response();
        }
    }
    not_found("Task", id)
}

async fn update_task_status(
    State(stub): State<Stub>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStatus>,
) -> Response {
    let mut state = stub.state();
    let Some(task) = state.task_mut(id) else {
        return not_found("Task", id);
    };
    if let Err(e) = task_status::validate_transition(task.status, input.status) {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    let now = Utc::now();
    match input.status {
        TaskStatus::Bezig if task.started_at.is_none() => task.started_at = Some(now),
        TaskStatus::Voltooid => {
            task.completed_at = Some(now);
            task.completion_notes = input.notes;
        }
        _ => {}
    }
    task.status = input.status;
    data(StatusCode::OK, task.clone())
}

// ---------------------------------------------------------------------------
// Template handlers
// ---------------------------------------------------------------------------

async fn list_templates(
    State(stub): State<Stub>,
    Query(params): Query<TemplateListParams>,
) -> Response {
    let templates: Vec<OnboardingTemplate> = stub
        .state()
        .templates
        .values()
        .filter(|t| params.process_type.map_or(true, |pt| t.process_type == pt))
        .cloned()
        .collect();
    data(StatusCode::OK, templates)
}

async fn get_template(State(stub): State<Stub>, Path(id): Path<DbId>) -> Response {
    match stub.state().templates.get(&id) {
        Some(t) => data(StatusCode::OK, t.clone()),
        None => not_found("Template", id),
    }
}

async fn create_template(State(stub): State<Stub>, Json(input): Json<CreateTemplate>) -> Response {
    if let Err(e) = input.check() {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    let mut state = stub.state();
    let id = state.next_id();
    let mut created = template_record(
        id,
        &input.name,
        input.process_type,
        false,
        input.task_definitions,
    );
    created.description = input.description;
    created.default_duration_days = input.default_duration_days;
    state.templates.insert(id, created.clone());
    data(StatusCode::CREATED, created)
}

async fn update_template(
    State(stub): State<Stub>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> Response {
    if let Err(e) = input.check() {
        return error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    let mut state = stub.state();
    let Some(existing) = state.templates.get_mut(&id) else {
        return not_found("Template", id);
    };
    if let Some(name) = input.name {
        existing.name = name;
    }
    if let Some(description) = input.description {
        existing.description = description;
    }
    if let Some(days) = input.default_duration_days {
        existing.default_duration_days = days;
    }
    if let Some(definitions) = input.task_definitions {
        existing.task_definitions = definitions;
    }
    existing.updated_at = Utc::now();
    data(StatusCode::OK, existing.clone())
}

async fn duplicate_template(
    State(stub): State<Stub>,
    Path(id): Path<DbId>,
    Json(input): Json<DuplicateTemplate>,
) -> Response {
    let mut state = stub.state();
    let Some(source) = state.templates.get(&id).cloned() else {
        return not_found("Template", id);
    };
    let copy_id = state.next_id();
    let copy = OnboardingTemplate {
        id: copy_id,
        name: input
            .name
            .unwrap_or_else(|| format!("{} (kopie)", source.name)),
        is_default: false,
        ..source
    };
    state.templates.insert(copy_id, copy.clone());
    data(StatusCode::CREATED, copy)
}

async fn delete_template(State(stub): State<Stub>, Path(id): Path<DbId>) -> Response {
    let mut state = stub.state();
    let Some(is_default) = state.templates.get(&id).map(|t| t.is_default) else {
        return not_found("Template", id);
    };
    if is_default {
        return error(
            StatusCode::CONFLICT,
            "Een standaard template kan niet worden verwijderd",
        );
    }
    state.templates.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

async fn set_default_template(State(stub): State<Stub>, Path(id): Path<DbId>) -> Response {
    let mut state = stub.state();
    let Some(process_type) = state.templates.get(&id).map(|t| t.process_type) else {
        return not_found("Template", id);
    };
    for t in state.templates.values_mut() {
        if t.process_type == process_type {
            t.is_default = t.id == id;
        }
    }
    data(StatusCode::OK, state.templates[&id].clone())
}

// ---------------------------------------------------------------------------
// Statistics, personnel, groups
// ---------------------------------------------------------------------------

async fn statistics(State(stub): State<Stub>) -> Response {
    let state = stub.state();
    let count_active = |pt: ProcessType| {
        state
            .processes
            .values()
            .filter(|p| p.process_type == pt && p.status.is_active())
            .count() as u32
    };
    let stats = OnboardingStatistics {
        active_onboardings: count_active(ProcessType::Onboarding),
        active_offboardings: count_active(ProcessType::Offboarding),
        open_tasks: state
            .processes
            .values()
            .flat_map(|p| p.tasks.iter())
            .filter(|t| !t.status.is_terminal())
            .count() as u32,
        completed_processes: state
            .processes
            .values()
            .filter(|p| p.status == ProcessStatus::Voltooid)
            .count() as u32,
    };
    data(StatusCode::OK, stats)
}

async fn list_employees(State(stub): State<Stub>) -> Response {
    data(StatusCode::OK, stub.state().employees.clone())
}

async fn directory_groups(State(stub): State<Stub>) -> Response {
    data(StatusCode::OK, stub.state().directory_groups.clone())
}

async fn dynamic_groups(State(stub): State<Stub>) -> Response {
    data(StatusCode::OK, stub.state().dynamic_groups.clone())
}

async fn distribution_groups(State(stub): State<Stub>) -> Response {
    data(StatusCode::OK, stub.state().distribution_groups.clone())
}

//! Detail page of one onboarding/offboarding process.

use std::future::Future;
use std::sync::{Arc, Mutex};

use hrportal_core::error::CoreError;
use hrportal_core::models::process::{OnboardingProcess, UpdateProcessStatus};
use hrportal_core::models::task::{CreateTask, OnboardingTask, UpdateTask, UpdateTaskStatus};
use hrportal_core::process_status::{self, ProcessAction};
use hrportal_core::task_status::{self, TaskStatus};
use hrportal_core::types::DbId;

use crate::backend::PortalBackend;
use crate::cache::EmployeeDirectory;
use crate::error::{ClientError, ClientResult};
use crate::pending::{EntityKey, PendingOps};
use crate::views::{lock, Banner};

/// Holds the process as last returned by the backend.
///
/// Mutations on different tasks may run side by side; a second mutation on
/// the same task or on the process itself is ignored while the first is in
/// flight. After every successful mutation the whole process is fetched
/// again, so progress and task statuses are never patched locally.
pub struct ProcessDetailView {
    backend: Arc<dyn PortalBackend>,
    directory: EmployeeDirectory,
    process_id: DbId,
    process: Mutex<Option<OnboardingProcess>>,
    banner: Banner,
    pending: PendingOps,
}

impl ProcessDetailView {
    pub fn new(
        backend: Arc<dyn PortalBackend>,
        directory: EmployeeDirectory,
        process_id: DbId,
    ) -> Self {
        Self {
            backend,
            directory,
            process_id,
            process: Mutex::new(None),
            banner: Banner::default(),
            pending: PendingOps::new(),
        }
    }

    pub fn process_id(&self) -> DbId {
        self.process_id
    }

    /// The process as last fetched, if any fetch has succeeded.
    pub fn process(&self) -> Option<OnboardingProcess> {
        lock(&self.process).clone()
    }

    pub fn error(&self) -> Option<String> {
        self.banner.get()
    }

    pub fn dismiss_error(&self) {
        self.banner.dismiss();
    }

    pub fn is_pending(&self, key: EntityKey) -> bool {
        self.pending.is_pending(key)
    }

    /// Fetch the process. On failure the previous copy stays in place.
    pub async fn load(&self) -> bool {
        match self.backend.get_process(self.process_id).await {
            Ok(process) => {
                tracing::debug!(
                    process_id = self.process_id,
                    tasks = process.tasks.len(),
                    "Loaded process"
                );
                *lock(&self.process) = Some(process);
                true
            }
            Err(e) => {
                tracing::warn!(process_id = self.process_id, error = %e, "Failed to load process");
                self.banner.show(&e);
                false
            }
        }
    }

    /// Manual recovery path: fetch again and clear the banner on success.
    pub async fn refresh(&self) -> bool {
        let loaded = self.load().await;
        if loaded {
            self.banner.dismiss();
        }
        loaded
    }

    /// Status actions offered for a task; empty while it has a request in
    /// flight or when the task is unknown.
    pub fn task_actions(&self, task_id: DbId) -> Vec<TaskStatus> {
        if self.pending.is_pending(EntityKey::Task(task_id)) {
            return Vec::new();
        }
        self.current_task(task_id)
            .map(|task| task.available_transitions().to_vec())
            .unwrap_or_default()
    }

    /// Process-level controls; empty while a process mutation is in flight.
    pub fn process_actions(&self) -> Vec<ProcessAction> {
        if self.pending.is_pending(EntityKey::Process(self.process_id)) {
            return Vec::new();
        }
        lock(&self.process)
            .as_ref()
            .map(|p| p.available_actions().to_vec())
            .unwrap_or_default()
    }

    // ---- task mutations ----

    /// Move a task to `to`. Transitions outside the table are rejected
    /// locally without contacting the backend.
    pub async fn change_task_status(
        &self,
        task_id: DbId,
        to: TaskStatus,
        notes: Option<String>,
    ) -> bool {
        let from = match self.require_task(task_id) {
            Ok(task) => task.status,
            Err(e) => return self.reject(e),
        };
        if let Err(e) = task_status::validate_transition(from, to) {
            return self.reject(e.into());
        }

        let input = UpdateTaskStatus { status: to, notes };
        tracing::info!(task_id, from = %from, to = %to, "Changing task status");
        self.run(
            EntityKey::Task(task_id),
            "change task status",
            self.backend.update_task_status(task_id, &input),
        )
        .await
    }

    pub async fn add_task(&self, input: CreateTask) -> bool {
        if let Err(e) = input.check() {
            return self.reject(e.into());
        }
        tracing::info!(process_id = self.process_id, title = %input.title, "Adding task");
        self.run(
            EntityKey::NewRecord,
            "add task",
            self.backend.create_task(self.process_id, &input),
        )
        .await
    }

    pub async fn update_task(&self, task_id: DbId, input: UpdateTask) -> bool {
        if let Err(e) = self.require_task(task_id) {
            return self.reject(e);
        }
        if let Err(e) = input.check() {
            return self.reject(e.into());
        }
        self.run(
            EntityKey::Task(task_id),
            "update task",
            self.backend.update_task(task_id, &input),
        )
        .await
    }

    /// Assign a task to an employee from the personnel directory.
    pub async fn assign_task(&self, task_id: DbId, employee_id: DbId) -> bool {
        match self.directory.find(employee_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return self.reject(
                    CoreError::NotFound {
                        entity: "Employee",
                        id: employee_id,
                    }
                    .into(),
                )
            }
            Err(e) => return self.reject(e),
        }
        let input = UpdateTask {
            assigned_to_id: Some(employee_id),
            ..UpdateTask::default()
        };
        self.update_task(task_id, input).await
    }

    pub async fn delete_task(&self, task_id: DbId) -> bool {
        if let Err(e) = self.require_task(task_id) {
            return self.reject(e);
        }
        tracing::info!(task_id, "Deleting task");
        self.run(
            EntityKey::Task(task_id),
            "delete task",
            self.backend.delete_task(task_id),
        )
        .await
    }

    // ---- process mutations ----

    pub async fn change_process_status(&self, action: ProcessAction) -> bool {
        let from = match lock(&self.process).as_ref() {
            Some(process) => process.status,
            None => {
                return self.reject(
                    CoreError::NotFound {
                        entity: "Process",
                        id: self.process_id,
                    }
                    .into(),
                )
            }
        };
        let to = action.target();
        if let Err(e) = process_status::validate_transition(from, to) {
            return self.reject(e.into());
        }

        let input = UpdateProcessStatus { status: to };
        tracing::info!(process_id = self.process_id, from = %from, to = %to, "Changing process status");
        self.run(
            EntityKey::Process(self.process_id),
            action.label(),
            self.backend.update_process_status(self.process_id, &input),
        )
        .await
    }

    // ---- private helpers ----

    /// Send one mutation under the pending guard for `key`, then re-fetch.
    ///
    /// `request` is not polled until the guard is held, so a refused
    /// attempt never reaches the backend. Returns `true` once the backend
    /// accepted the mutation; a failed re-fetch keeps the previous process
    /// and leaves its error in the banner.
    async fn run<T, F>(&self, key: EntityKey, action: &str, request: F) -> bool
    where
        F: Future<Output = ClientResult<T>>,
    {
        let _guard = match self.pending.try_begin(key) {
            Ok(guard) => guard,
            Err(_) => {
                tracing::debug!(%key, action, "Request already in flight, ignoring");
                return false;
            }
        };

        if let Err(e) = request.await {
            tracing::warn!(process_id = self.process_id, %key, action, error = %e, "Mutation failed");
            self.banner.show(&e);
            return false;
        }
        self.load().await;
        true
    }

    fn reject(&self, error: ClientError) -> bool {
        tracing::warn!(process_id = self.process_id, error = %error, "Rejected before sending");
        self.banner.show(&error);
        false
    }

    fn current_task(&self, task_id: DbId) -> Option<OnboardingTask> {
        lock(&self.process)
            .as_ref()
            .and_then(|p| p.task(task_id))
            .cloned()
    }

    fn require_task(&self, task_id: DbId) -> Result<OnboardingTask, ClientError> {
        self.current_task(task_id).ok_or_else(|| {
            CoreError::NotFound {
                entity: "Task",
                id: task_id,
            }
            .into()
        })
    }
}

//! Process overview with statistics header.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use hrportal_core::models::process::{CreateProcess, OnboardingProcess, ProcessListParams};
use hrportal_core::models::statistics::OnboardingStatistics;
use hrportal_core::process_status::{ProcessStatus, ProcessType};
use hrportal_core::progress::ProgressSummary;
use hrportal_core::types::{Date, DbId};

use crate::backend::PortalBackend;
use crate::cache::EmployeeDirectory;
use crate::error::ClientError;
use crate::pending::{EntityKey, PendingOps};
use crate::views::{lock, Banner};

/// One line of the process overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRow {
    pub id: DbId,
    pub process_type: ProcessType,
    pub title: String,
    pub employee_name: String,
    pub status: ProcessStatus,
    pub responsible_name: Option<String>,
    pub planned_start_date: Option<Date>,
    pub progress: ProgressSummary,
}

impl ProcessRow {
    pub fn new(process: &OnboardingProcess, today: Date) -> Self {
        Self {
            id: process.id,
            process_type: process.process_type,
            title: process.title.clone(),
            employee_name: process.employee_name.clone(),
            status: process.status,
            responsible_name: process.responsible_name.clone(),
            planned_start_date: process.planned_start_date,
            progress: process.summary(today),
        }
    }
}

pub struct ProcessListView {
    backend: Arc<dyn PortalBackend>,
    directory: EmployeeDirectory,
    filter: Mutex<ProcessListParams>,
    processes: Mutex<Vec<OnboardingProcess>>,
    statistics: Mutex<Option<OnboardingStatistics>>,
    banner: Banner,
    pending: PendingOps,
}

impl ProcessListView {
    pub fn new(backend: Arc<dyn PortalBackend>, directory: EmployeeDirectory) -> Self {
        Self {
            backend,
            directory,
            filter: Mutex::new(ProcessListParams::default()),
            processes: Mutex::new(Vec::new()),
            statistics: Mutex::new(None),
            banner: Banner::default(),
            pending: PendingOps::new(),
        }
    }

    pub fn filter(&self) -> ProcessListParams {
        lock(&self.filter).clone()
    }

    pub fn processes(&self) -> Vec<OnboardingProcess> {
        lock(&self.processes).clone()
    }

    pub fn statistics(&self) -> Option<OnboardingStatistics> {
        lock(&self.statistics).clone()
    }

    pub fn error(&self) -> Option<String> {
        self.banner.get()
    }

    pub fn dismiss_error(&self) {
        self.banner.dismiss();
    }

    /// Rows for the overview, progress evaluated against `today`.
    pub fn rows(&self, today: Date) -> Vec<ProcessRow> {
        lock(&self.processes)
            .iter()
            .map(|p| ProcessRow::new(p, today))
            .collect()
    }

    /// Fetch the filtered list and the statistics together.
    pub async fn load(&self) -> bool {
        let filter = self.filter();
        let result = futures::try_join!(
            self.backend.list_processes(&filter),
            self.backend.statistics()
        );
        match result {
            Ok((processes, statistics)) => {
                tracing::debug!(count = processes.len(), "Loaded process list");
                *lock(&self.processes) = processes;
                *lock(&self.statistics) = Some(statistics);
                self.banner.dismiss();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load process list");
                self.banner.show(&e);
                false
            }
        }
    }

    /// Replace the filter and reload.
    pub async fn set_filter(&self, filter: ProcessListParams) -> bool {
        *lock(&self.filter) = filter;
        self.load().await
    }

    /// Start a new process, optionally from a template. Returns its id.
    ///
    /// The backend may create a personnel record for the new employee, so
    /// the employee directory is invalidated afterwards.
    pub async fn create_process(&self, input: CreateProcess) -> Option<DbId> {
        if let Err(e) = input.check() {
            tracing::warn!(error = %e, "Rejected process before sending");
            self.banner.show(&ClientError::from(e));
            return None;
        }
        let _guard = match self.pending.try_begin(EntityKey::NewRecord) {
            Ok(guard) => guard,
            Err(_) => return None,
        };

        match self.backend.create_process(&input).await {
            Ok(process) => {
                tracing::info!(
                    process_id = process.id,
                    process_type = %process.process_type,
                    template_id = ?process.template_id,
                    "Created process"
                );
                self.directory.invalidate().await;
                self.load().await;
                Some(process.id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create process");
                self.banner.show(&e);
                None
            }
        }
    }
}

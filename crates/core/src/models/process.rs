//! Onboarding/offboarding process record and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::models::task::OnboardingTask;
use crate::process_status::{self, ProcessAction, ProcessStatus, ProcessType};
use crate::progress::{Completion, ProgressSummary};
use crate::types::{Date, DbId, Timestamp};

/// A tracked onboarding or offboarding workflow with its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProcess {
    pub id: DbId,
    #[serde(rename = "type")]
    pub process_type: ProcessType,
    pub title: String,
    pub description: Option<String>,
    pub employee_name: String,
    pub employee_email: Option<String>,
    pub planned_start_date: Option<Date>,
    pub desired_end_date: Option<Date>,
    pub status: ProcessStatus,
    pub responsible_id: Option<DbId>,
    pub responsible_name: Option<String>,
    pub template_id: Option<DbId>,
    #[serde(default)]
    pub tasks: Vec<OnboardingTask>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OnboardingProcess {
    /// Tasks sorted by their ordering index.
    pub fn ordered_tasks(&self) -> Vec<&OnboardingTask> {
        let mut tasks: Vec<&OnboardingTask> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| (t.order, t.id));
        tasks
    }

    pub fn task(&self, task_id: DbId) -> Option<&OnboardingTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn completion(&self) -> Completion {
        Completion::from_statuses(self.tasks.iter().map(|t| t.status))
    }

    pub fn summary(&self, today: Date) -> ProgressSummary {
        ProgressSummary::from_tasks(&self.tasks, today)
    }

    /// Process-level controls offered in the current status.
    pub fn available_actions(&self) -> &'static [ProcessAction] {
        process_status::available_actions(self.status)
    }
}

/// DTO for creating a process, optionally seeded from a template.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcess {
    #[serde(rename = "type")]
    pub process_type: ProcessType,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub employee_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub employee_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_end_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<DbId>,
}

impl CreateProcess {
    /// Field checks plus end date not before start date.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        if let (Some(start), Some(end)) = (self.planned_start_date, self.desired_end_date) {
            if end < start {
                return Err(CoreError::Validation(format!(
                    "Desired end date {end} is before planned start date {start}"
                )));
            }
        }
        Ok(())
    }
}

/// DTO for a process status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessStatus {
    pub status: ProcessStatus,
}

/// Query filters for the process list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessListParams {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub process_type: Option<ProcessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessStatus>,
}

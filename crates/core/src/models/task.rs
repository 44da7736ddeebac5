//! Onboarding task record and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::task_status::{self, TaskStatus};
use crate::task_type::TaskTypeCode;
use crate::types::{Date, DbId, Timestamp};

/// A task within an onboarding/offboarding process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTask {
    pub id: DbId,
    pub process_id: DbId,
    pub task_type: TaskTypeCode,
    pub title: String,
    pub description: Option<String>,
    pub order: u32,
    pub is_mandatory: bool,
    pub expected_duration_days: u32,
    pub status: TaskStatus,
    pub deadline: Option<Date>,
    pub assigned_to_id: Option<DbId>,
    pub assigned_to_name: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completion_notes: Option<String>,
    pub completed_by_name: Option<String>,
}

impl OnboardingTask {
    /// Statuses this task offers as actions.
    pub fn available_transitions(&self) -> &'static [TaskStatus] {
        task_status::valid_transitions(self.status)
    }

    /// Past its deadline while still open.
    pub fn is_overdue(&self, today: Date) -> bool {
        !self.status.is_terminal() && self.deadline.is_some_and(|d| d < today)
    }
}

/// DTO for adding a task to a process.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub task_type: TaskTypeCode,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_mandatory: bool,
    #[validate(range(max = 365))]
    pub expected_duration_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<DbId>,
}

impl CreateTask {
    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

/// DTO for editing a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mandatory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 365))]
    pub expected_duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<DbId>,
}

impl UpdateTask {
    pub fn check(&self) -> Result<(), CoreError> {
        Ok(self.validate()?)
    }
}

/// DTO for a task status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

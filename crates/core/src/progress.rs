//! Process progress aggregation.
//!
//! Always computed from the task list the backend last returned; nothing
//! here is accumulated across mutations.

use serde::Serialize;

use crate::models::task::OnboardingTask;
use crate::task_status::TaskStatus;
use crate::types::Date;

/// Completed versus total task count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    /// Count `Voltooid` tasks among `statuses`.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut acc, status| {
                acc.total += 1;
                if status == TaskStatus::Voltooid {
                    acc.completed += 1;
                }
                acc
            })
    }

    pub fn percent(&self) -> u8 {
        percent_complete(self.completed, self.total)
    }
}

/// `round(completed / total * 100)`, or 0 for an empty process.
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

/// Everything the process list shows about a process's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    /// Mandatory tasks not yet finished (neither completed nor skipped).
    pub mandatory_open: usize,
    /// Open tasks whose deadline lies before `today`.
    pub overdue: usize,
}

impl ProgressSummary {
    pub fn from_tasks(tasks: &[OnboardingTask], today: Date) -> Self {
        let completion = Completion::from_statuses(tasks.iter().map(|t| t.status));
        Self {
            completed: completion.completed,
            total: completion.total,
            percent: completion.percent(),
            mandatory_open: tasks
                .iter()
                .filter(|t| t.is_mandatory && !t.status.is_terminal())
                .count(),
            overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

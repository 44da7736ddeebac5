//! Onboarding task status and transition rules.
//!
//! [`valid_transitions`] is the only place that decides which status
//! actions a task offers. The backend validates every request against a
//! compatible table and may still reject it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a single onboarding/offboarding task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    NietGestart,
    Bezig,
    Voltooid,
    Geblokkeerd,
    Overgeslagen,
    Mislukt,
}

/// All task statuses in display order.
pub const ALL_TASK_STATUSES: &[TaskStatus] = &[
    TaskStatus::NietGestart,
    TaskStatus::Bezig,
    TaskStatus::Voltooid,
    TaskStatus::Geblokkeerd,
    TaskStatus::Overgeslagen,
    TaskStatus::Mislukt,
];

impl TaskStatus {
    /// Wire name of the status, as sent to and received from the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NietGestart => "NietGestart",
            Self::Bezig => "Bezig",
            Self::Voltooid => "Voltooid",
            Self::Geblokkeerd => "Geblokkeerd",
            Self::Overgeslagen => "Overgeslagen",
            Self::Mislukt => "Mislukt",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        ALL_TASK_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid task status '{s}'. Must be one of: NietGestart, Bezig, Voltooid, \
                     Geblokkeerd, Overgeslagen, Mislukt"
                ))
            })
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NietGestart => "Niet gestart",
            Self::Bezig => "Bezig",
            Self::Voltooid => "Voltooid",
            Self::Geblokkeerd => "Geblokkeerd",
            Self::Overgeslagen => "Overgeslagen",
            Self::Mislukt => "Mislukt",
        }
    }

    /// Label of the action button that moves a task *into* this status.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::NietGestart => "Terugzetten",
            Self::Bezig => "Starten",
            Self::Voltooid => "Afronden",
            Self::Geblokkeerd => "Blokkeren",
            Self::Overgeslagen => "Overslaan",
            Self::Mislukt => "Mislukt melden",
        }
    }

    /// Terminal statuses offer no further transitions.
    pub fn is_terminal(self) -> bool {
        valid_transitions(self).is_empty()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns the statuses a task in `from` may move to, in button order.
///
/// - `NietGestart` -> `Bezig`, `Overgeslagen`
/// - `Bezig`       -> `Voltooid`, `Geblokkeerd`, `Mislukt`
/// - `Geblokkeerd` -> `Bezig`, `Overgeslagen`
/// - `Mislukt`     -> `Bezig`, `Overgeslagen`
/// - `Voltooid`, `Overgeslagen` are terminal.
pub fn valid_transitions(from: TaskStatus) -> &'static [TaskStatus] {
    use TaskStatus::*;
    match from {
        NietGestart => &[Bezig, Overgeslagen],
        Bezig => &[Voltooid, Geblokkeerd, Mislukt],
        Geblokkeerd => &[Bezig, Overgeslagen],
        Mislukt => &[Bezig, Overgeslagen],
        Voltooid | Overgeslagen => &[],
    }
}

/// Check whether a task may move from `from` to `to`.
pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a task status transition.
pub fn validate_transition(from: TaskStatus, to: TaskStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition task from '{from}' to '{to}'. Allowed transitions: {:?}",
            valid_transitions(from)
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

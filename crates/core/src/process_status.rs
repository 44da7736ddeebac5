//! Process type, process status and process-level status controls.
//!
//! Independent of the task table: a process can be `InProgress` while its
//! tasks sit in any mix of statuses.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Process type
// ---------------------------------------------------------------------------

/// Whether a process brings an employee in or takes one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    Onboarding,
    Offboarding,
}

impl ProcessType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Onboarding => "Onboarding",
            Self::Offboarding => "Offboarding",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "Onboarding" => Ok(Self::Onboarding),
            "Offboarding" => Ok(Self::Offboarding),
            _ => Err(CoreError::Validation(format!(
                "Invalid process type '{s}'. Must be one of: Onboarding, Offboarding"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Onboarding => "Indiensttreding",
            Self::Offboarding => "Uitdiensttreding",
        }
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Process status
// ---------------------------------------------------------------------------

/// Lifecycle status of an onboarding/offboarding process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    Nieuw,
    InProgress,
    Voltooid,
    Geannuleerd,
    OnHold,
}

/// All process statuses in display order.
pub const ALL_PROCESS_STATUSES: &[ProcessStatus] = &[
    ProcessStatus::Nieuw,
    ProcessStatus::InProgress,
    ProcessStatus::OnHold,
    ProcessStatus::Voltooid,
    ProcessStatus::Geannuleerd,
];

impl ProcessStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nieuw => "Nieuw",
            Self::InProgress => "InProgress",
            Self::Voltooid => "Voltooid",
            Self::Geannuleerd => "Geannuleerd",
            Self::OnHold => "OnHold",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        ALL_PROCESS_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid process status '{s}'. Must be one of: Nieuw, InProgress, OnHold, \
                     Voltooid, Geannuleerd"
                ))
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nieuw => "Nieuw",
            Self::InProgress => "In behandeling",
            Self::Voltooid => "Voltooid",
            Self::Geannuleerd => "Geannuleerd",
            Self::OnHold => "On hold",
        }
    }

    /// `Voltooid` and `Geannuleerd` accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Voltooid | Self::Geannuleerd)
    }

    /// Whether the process still counts as open work.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A process-level control offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessAction {
    Complete,
    Pause,
    Resume,
    Cancel,
}

impl ProcessAction {
    /// Status the backend is asked to move the process to.
    pub fn target(self) -> ProcessStatus {
        match self {
            Self::Complete => ProcessStatus::Voltooid,
            Self::Pause => ProcessStatus::OnHold,
            Self::Resume => ProcessStatus::InProgress,
            Self::Cancel => ProcessStatus::Geannuleerd,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Complete => "Afronden",
            Self::Pause => "Pauzeren",
            Self::Resume => "Hervatten",
            Self::Cancel => "Annuleren",
        }
    }
}

/// Actions offered for a process in `status`, in button order.
///
/// - `InProgress` -> complete, pause, cancel
/// - `OnHold`     -> resume, cancel
/// - `Nieuw`      -> cancel
/// - `Voltooid`, `Geannuleerd` -> none
pub fn available_actions(status: ProcessStatus) -> &'static [ProcessAction] {
    use ProcessAction::*;
    match status {
        ProcessStatus::InProgress => &[Complete, Pause, Cancel],
        ProcessStatus::OnHold => &[Resume, Cancel],
        ProcessStatus::Nieuw => &[Cancel],
        ProcessStatus::Voltooid | ProcessStatus::Geannuleerd => &[],
    }
}

/// Statuses reachable from `status`.
pub fn valid_transitions(status: ProcessStatus) -> Vec<ProcessStatus> {
    available_actions(status)
        .iter()
        .map(|action| action.target())
        .collect()
}

/// Check whether a process may move from `from` to `to`.
pub fn can_transition(from: ProcessStatus, to: ProcessStatus) -> bool {
    available_actions(from)
        .iter()
        .any(|action| action.target() == to)
}

/// Validate a process status transition.
pub fn validate_transition(from: ProcessStatus, to: ProcessStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition process from '{from}' to '{to}'. Allowed transitions: {:?}",
            valid_transitions(from)
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

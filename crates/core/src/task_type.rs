//! Task type enumerations.
//!
//! Two sets are in use and they do not fully overlap:
//!
//! - [`TaskType`]: the template-editor set, grouped by [`TaskCategory`].
//! - [`DetailTaskType`]: the smaller set offered when adding a task from the
//!   process detail page.
//!
//! Tasks carry their type as a [`TaskTypeCode`] string so either set can be
//! resolved from the same record without coercing one into the other.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Department responsible for a task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    It,
    Hr,
    Preventie,
    Management,
}

impl TaskCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Hr => "HR",
            Self::Preventie => "Preventie",
            Self::Management => "Management",
        }
    }
}

// ---------------------------------------------------------------------------
// Template-editor task types
// ---------------------------------------------------------------------------

/// Task types offered by the template editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    // IT
    AccountAanmaken,
    EmailInstellen,
    LicentieToewijzen,
    GroepslidmaatschapToevoegen,
    HardwareUitgeven,
    SoftwareInstalleren,
    AccountDeactiveren,
    LicentieIntrekken,
    HardwareInnemen,
    // HR
    ContractOpstellen,
    PersoneelsdossierAanmaken,
    WelkomstgesprekPlannen,
    ExitgesprekPlannen,
    EindafrekeningVerwerken,
    // Preventie
    BadgeUitgeven,
    VeiligheidsinstructieGeven,
    BadgeInnemen,
    // Management
    BuddyToewijzen,
    InwerkplanOpstellen,
    TeamIntroductie,
    Overig,
}

/// All template-editor task types in picker order.
pub const ALL_TASK_TYPES: &[TaskType] = &[
    TaskType::AccountAanmaken,
    TaskType::EmailInstellen,
    TaskType::LicentieToewijzen,
    TaskType::GroepslidmaatschapToevoegen,
    TaskType::HardwareUitgeven,
    TaskType::SoftwareInstalleren,
    TaskType::AccountDeactiveren,
    TaskType::LicentieIntrekken,
    TaskType::HardwareInnemen,
    TaskType::ContractOpstellen,
    TaskType::PersoneelsdossierAanmaken,
    TaskType::WelkomstgesprekPlannen,
    TaskType::ExitgesprekPlannen,
    TaskType::EindafrekeningVerwerken,
    TaskType::BadgeUitgeven,
    TaskType::VeiligheidsinstructieGeven,
    TaskType::BadgeInnemen,
    TaskType::BuddyToewijzen,
    TaskType::InwerkplanOpstellen,
    TaskType::TeamIntroductie,
    TaskType::Overig,
];

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountAanmaken => "AccountAanmaken",
            Self::EmailInstellen => "EmailInstellen",
            Self::LicentieToewijzen => "LicentieToewijzen",
            Self::GroepslidmaatschapToevoegen => "GroepslidmaatschapToevoegen",
            Self::HardwareUitgeven => "HardwareUitgeven",
            Self::SoftwareInstalleren => "SoftwareInstalleren",
            Self::AccountDeactiveren => "AccountDeactiveren",
            Self::LicentieIntrekken => "LicentieIntrekken",
            Self::HardwareInnemen => "HardwareInnemen",
            Self::ContractOpstellen => "ContractOpstellen",
            Self::PersoneelsdossierAanmaken => "PersoneelsdossierAanmaken",
            Self::WelkomstgesprekPlannen => "WelkomstgesprekPlannen",
            Self::ExitgesprekPlannen => "ExitgesprekPlannen",
            Self::EindafrekeningVerwerken => "EindafrekeningVerwerken",
            Self::BadgeUitgeven => "BadgeUitgeven",
            Self::VeiligheidsinstructieGeven => "VeiligheidsinstructieGeven",
            Self::BadgeInnemen => "BadgeInnemen",
            Self::BuddyToewijzen => "BuddyToewijzen",
            Self::InwerkplanOpstellen => "InwerkplanOpstellen",
            Self::TeamIntroductie => "TeamIntroductie",
            Self::Overig => "Overig",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        ALL_TASK_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown task type '{s}'")))
    }

    pub fn category(self) -> TaskCategory {
        use TaskType::*;
        match self {
            AccountAanmaken | EmailInstellen | LicentieToewijzen | GroepslidmaatschapToevoegen
            | HardwareUitgeven | SoftwareInstalleren | AccountDeactiveren | LicentieIntrekken
            | HardwareInnemen => TaskCategory::It,
            ContractOpstellen | PersoneelsdossierAanmaken | WelkomstgesprekPlannen
            | ExitgesprekPlannen | EindafrekeningVerwerken => TaskCategory::Hr,
            BadgeUitgeven | VeiligheidsinstructieGeven | BadgeInnemen => TaskCategory::Preventie,
            BuddyToewijzen | InwerkplanOpstellen | TeamIntroductie | Overig => {
                TaskCategory::Management
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AccountAanmaken => "Account aanmaken",
            Self::EmailInstellen => "E-mail instellen",
            Self::LicentieToewijzen => "Licentie toewijzen",
            Self::GroepslidmaatschapToevoegen => "Groepslidmaatschap toevoegen",
            Self::HardwareUitgeven => "Hardware uitgeven",
            Self::SoftwareInstalleren => "Software installeren",
            Self::AccountDeactiveren => "Account deactiveren",
            Self::LicentieIntrekken => "Licentie intrekken",
            Self::HardwareInnemen => "Hardware innemen",
            Self::ContractOpstellen => "Contract opstellen",
            Self::PersoneelsdossierAanmaken => "Personeelsdossier aanmaken",
            Self::WelkomstgesprekPlannen => "Welkomstgesprek plannen",
            Self::ExitgesprekPlannen => "Exitgesprek plannen",
            Self::EindafrekeningVerwerken => "Eindafrekening verwerken",
            Self::BadgeUitgeven => "Toegangsbadge uitgeven",
            Self::VeiligheidsinstructieGeven => "Veiligheidsinstructie geven",
            Self::BadgeInnemen => "Toegangsbadge innemen",
            Self::BuddyToewijzen => "Buddy toewijzen",
            Self::InwerkplanOpstellen => "Inwerkplan opstellen",
            Self::TeamIntroductie => "Team introductie",
            Self::Overig => "Overig",
        }
    }

    /// Task types in a category, in picker order.
    pub fn in_category(category: TaskCategory) -> impl Iterator<Item = TaskType> {
        ALL_TASK_TYPES
            .iter()
            .copied()
            .filter(move |t| t.category() == category)
    }
}

// ---------------------------------------------------------------------------
// Detail-page task types
// ---------------------------------------------------------------------------

/// Task types offered when adding a task from the process detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailTaskType {
    AccountAanmaken,
    Licentie,
    Hardware,
    Toegangsbadge,
    Email,
    Groepen,
    Training,
    Overig,
}

/// All detail-page task types in picker order.
pub const ALL_DETAIL_TASK_TYPES: &[DetailTaskType] = &[
    DetailTaskType::AccountAanmaken,
    DetailTaskType::Licentie,
    DetailTaskType::Hardware,
    DetailTaskType::Toegangsbadge,
    DetailTaskType::Email,
    DetailTaskType::Groepen,
    DetailTaskType::Training,
    DetailTaskType::Overig,
];

impl DetailTaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountAanmaken => "AccountAanmaken",
            Self::Licentie => "Licentie",
            Self::Hardware => "Hardware",
            Self::Toegangsbadge => "Toegangsbadge",
            Self::Email => "Email",
            Self::Groepen => "Groepen",
            Self::Training => "Training",
            Self::Overig => "Overig",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        ALL_DETAIL_TASK_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown detail task type '{s}'")))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AccountAanmaken => "Account aanmaken",
            Self::Licentie => "Licentie",
            Self::Hardware => "Hardware",
            Self::Toegangsbadge => "Toegangsbadge",
            Self::Email => "E-mail",
            Self::Groepen => "Groepen",
            Self::Training => "Training",
            Self::Overig => "Overig",
        }
    }
}

// ---------------------------------------------------------------------------
// Wire code
// ---------------------------------------------------------------------------

/// Task type as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTypeCode(pub String);

impl TaskTypeCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the template-editor set.
    pub fn template_type(&self) -> Option<TaskType> {
        TaskType::parse(&self.0).ok()
    }

    /// Resolve against the detail-page set.
    pub fn detail_type(&self) -> Option<DetailTaskType> {
        DetailTaskType::parse(&self.0).ok()
    }

    /// Display label: template set first, then detail set, then the raw code.
    pub fn label(&self) -> &str {
        if let Some(t) = self.template_type() {
            t.label()
        } else if let Some(t) = self.detail_type() {
            t.label()
        } else {
            &self.0
        }
    }

    /// Category, when the code belongs to the template-editor set.
    pub fn category(&self) -> Option<TaskCategory> {
        self.template_type().map(TaskType::category)
    }
}

impl From<TaskType> for TaskTypeCode {
    fn from(value: TaskType) -> Self {
        Self(value.as_str().to_string())
    }
}

impl From<DetailTaskType> for TaskTypeCode {
    fn from(value: DetailTaskType) -> Self {
        Self(value.as_str().to_string())
    }
}

impl std::fmt::Display for TaskTypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

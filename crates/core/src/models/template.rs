//! Onboarding template record and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::process_status::ProcessType;
use crate::template::{self, TemplateTaskDefinition};
use crate::types::{DbId, Timestamp};

/// A reusable blueprint of task definitions.
///
/// `task_definitions` is the serialized list exactly as stored by the
/// backend; use [`OnboardingTemplate::definitions`] to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTemplate {
    pub id: DbId,
    pub name: String,
    pub process_type: ProcessType,
    pub description: Option<String>,
    pub default_duration_days: u32,
    pub is_default: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub task_definitions: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_active() -> bool {
    true
}

impl OnboardingTemplate {
    /// Decoded task definitions; malformed data reads as an empty list.
    pub fn definitions(&self) -> Vec<TemplateTaskDefinition> {
        template::decode_or_empty(&self.task_definitions)
    }
}

/// DTO for creating a template. The process type cannot change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub process_type: ProcessType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 365))]
    pub default_duration_days: u32,
    pub task_definitions: String,
}

impl CreateTemplate {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        template::validate_definitions(&template::decode(&self.task_definitions)?)
    }
}

/// DTO for editing a template. Absent fields are left unchanged.
///
/// `description` uses `Option<Option<String>>` so it can be cleared:
/// `Some(None)` is sent as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::clearable"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 365))]
    pub default_duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definitions: Option<String>,
}

impl UpdateTemplate {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        match &self.task_definitions {
            Some(encoded) => template::validate_definitions(&template::decode(encoded)?),
            None => Ok(()),
        }
    }
}

/// DTO for duplicating a template under a new name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Query filters for the template list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type: Option<ProcessType>,
}

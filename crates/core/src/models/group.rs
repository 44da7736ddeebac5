//! The three group list shapes served by the backend.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A group synchronised from Azure AD / Entra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
    pub object_id: String,
    pub display_name: String,
    pub mail: Option<String>,
    pub member_count: u32,
    pub description: Option<String>,
}

/// A group whose membership is evaluated from a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicGroup {
    pub id: DbId,
    pub name: String,
    pub rule: String,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
    pub description: Option<String>,
}

/// A manually curated local or Exchange distribution group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionGroup {
    pub id: DbId,
    pub name: String,
    pub smtp_address: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

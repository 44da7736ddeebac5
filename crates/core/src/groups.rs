//! Unified group list.
//!
//! Merges directory-synced, rule-evaluated and manually curated groups into
//! one display shape. Pure presentation: nothing here writes back.

use serde::Serialize;

use crate::models::group::{DirectoryGroup, DistributionGroup, DynamicGroup};

/// Where a unified group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupSource {
    Directory,
    Dynamic,
    Local,
}

impl GroupSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "Azure AD",
            Self::Dynamic => "Dynamisch",
            Self::Local => "Distributielijst",
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Dynamic => "dynamic",
            Self::Local => "local",
        }
    }
}

/// One row of the merged group list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedGroup {
    /// Unique across sources, e.g. `dynamic:12`.
    pub key: String,
    pub display_name: String,
    pub email: Option<String>,
    pub source: GroupSource,
    pub member_count: usize,
    pub description: Option<String>,
}

impl From<&DirectoryGroup> for UnifiedGroup {
    fn from(g: &DirectoryGroup) -> Self {
        Self {
            key: format!("{}:{}", GroupSource::Directory.key_prefix(), g.object_id),
            display_name: g.display_name.clone(),
            email: g.mail.clone(),
            source: GroupSource::Directory,
            member_count: g.member_count as usize,
            description: g.description.clone(),
        }
    }
}

impl From<&DynamicGroup> for UnifiedGroup {
    fn from(g: &DynamicGroup) -> Self {
        Self {
            key: format!("{}:{}", GroupSource::Dynamic.key_prefix(), g.id),
            display_name: g.name.clone(),
            email: None,
            source: GroupSource::Dynamic,
            member_count: g.member_ids.len(),
            description: g.description.clone().or_else(|| Some(g.rule.clone())),
        }
    }
}

impl From<&DistributionGroup> for UnifiedGroup {
    fn from(g: &DistributionGroup) -> Self {
        Self {
            key: format!("{}:{}", GroupSource::Local.key_prefix(), g.id),
            display_name: g.name.clone(),
            email: g.smtp_address.clone(),
            source: GroupSource::Local,
            member_count: g.members.len(),
            description: None,
        }
    }
}

/// Merge the three sources, sorted case-insensitively by display name.
pub fn merge_groups(
    directory: &[DirectoryGroup],
    dynamic: &[DynamicGroup],
    local: &[DistributionGroup],
) -> Vec<UnifiedGroup> {
    let mut merged: Vec<UnifiedGroup> = directory
        .iter()
        .map(UnifiedGroup::from)
        .chain(dynamic.iter().map(UnifiedGroup::from))
        .chain(local.iter().map(UnifiedGroup::from))
        .collect();
    merged.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });
    merged
}

/// Groups whose name or email contains `query`, case-insensitive.
pub fn filter_groups<'a>(groups: &'a [UnifiedGroup], query: &str) -> Vec<&'a UnifiedGroup> {
    let needle = query.trim().to_lowercase();
    groups
        .iter()
        .filter(|g| {
            needle.is_empty()
                || g.display_name.to_lowercase().contains(&needle)
                || g
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Per-source counts for the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub directory: usize,
    pub dynamic: usize,
    pub local: usize,
}

impl GroupCounts {
    pub fn of(groups: &[UnifiedGroup]) -> Self {
        groups.iter().fold(Self::default(), |mut acc, g| {
            match g.source {
                GroupSource::Directory => acc.directory += 1,
                GroupSource::Dynamic => acc.dynamic += 1,
                GroupSource::Local => acc.local += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.directory + self.dynamic + self.local
    }
}

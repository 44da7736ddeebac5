//! Group overview across the three group sources.

use std::sync::{Arc, Mutex};

use hrportal_core::groups::{self, GroupCounts, UnifiedGroup};

use crate::backend::PortalBackend;
use crate::views::{lock, Banner};

pub struct GroupsView {
    backend: Arc<dyn PortalBackend>,
    groups: Mutex<Vec<UnifiedGroup>>,
    banner: Banner,
}

impl GroupsView {
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            backend,
            groups: Mutex::new(Vec::new()),
            banner: Banner::default(),
        }
    }

    /// Fetch all three sources; if any fails, the previous list stays.
    pub async fn load(&self) -> bool {
        let result = futures::try_join!(
            self.backend.list_directory_groups(),
            self.backend.list_dynamic_groups(),
            self.backend.list_distribution_groups()
        );
        match result {
            Ok((directory, dynamic, local)) => {
                let merged = groups::merge_groups(&directory, &dynamic, &local);
                tracing::debug!(
                    directory = directory.len(),
                    dynamic = dynamic.len(),
                    local = local.len(),
                    "Loaded groups"
                );
                *lock(&self.groups) = merged;
                self.banner.dismiss();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load groups");
                self.banner.show(&e);
                false
            }
        }
    }

    pub fn groups(&self) -> Vec<UnifiedGroup> {
        lock(&self.groups).clone()
    }

    /// Groups matching `query` on name or email.
    pub fn search(&self, query: &str) -> Vec<UnifiedGroup> {
        let all = lock(&self.groups);
        groups::filter_groups(&all, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> GroupCounts {
        GroupCounts::of(&lock(&self.groups))
    }

    pub fn error(&self) -> Option<String> {
        self.banner.get()
    }

    pub fn dismiss_error(&self) {
        self.banner.dismiss();
    }
}

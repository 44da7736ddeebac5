//! Template overview grouped by process type.

use std::future::Future;
use std::sync::{Arc, Mutex};

use hrportal_core::models::template::{DuplicateTemplate, OnboardingTemplate, TemplateListParams};
use hrportal_core::process_status::ProcessType;
use hrportal_core::types::DbId;

use crate::backend::PortalBackend;
use crate::error::ClientResult;
use crate::pending::{EntityKey, PendingOps};
use crate::views::{lock, Banner};

pub struct TemplateListView {
    backend: Arc<dyn PortalBackend>,
    templates: Mutex<Vec<OnboardingTemplate>>,
    banner: Banner,
    pending: PendingOps,
}

impl TemplateListView {
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            backend,
            templates: Mutex::new(Vec::new()),
            banner: Banner::default(),
            pending: PendingOps::new(),
        }
    }

    pub fn templates(&self) -> Vec<OnboardingTemplate> {
        lock(&self.templates).clone()
    }

    /// Templates for one process type, default first, then by name.
    pub fn by_type(&self, process_type: ProcessType) -> Vec<OnboardingTemplate> {
        let mut templates: Vec<OnboardingTemplate> = lock(&self.templates)
            .iter()
            .filter(|t| t.process_type == process_type)
            .cloned()
            .collect();
        templates.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        templates
    }

    /// The template the backend currently marks as default for a type.
    pub fn default_for(&self, process_type: ProcessType) -> Option<OnboardingTemplate> {
        lock(&self.templates)
            .iter()
            .find(|t| t.process_type == process_type && t.is_default)
            .cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.banner.get()
    }

    pub fn dismiss_error(&self) {
        self.banner.dismiss();
    }

    pub fn is_pending(&self, template_id: DbId) -> bool {
        self.pending.is_pending(EntityKey::Template(template_id))
    }

    pub async fn load(&self) -> bool {
        match self
            .backend
            .list_templates(&TemplateListParams::default())
            .await
        {
            Ok(templates) => {
                tracing::debug!(count = templates.len(), "Loaded templates");
                *lock(&self.templates) = templates;
                self.banner.dismiss();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load templates");
                self.banner.show(&e);
                false
            }
        }
    }

    /// Copy a template. Returns the id of the copy.
    pub async fn duplicate(&self, template_id: DbId, name: Option<String>) -> Option<DbId> {
        let input = DuplicateTemplate { name };
        self.run(
            template_id,
            "duplicate template",
            self.backend.duplicate_template(template_id, &input),
        )
        .await
        .map(|copy| copy.id)
    }

    pub async fn delete(&self, template_id: DbId) -> bool {
        self.run(
            template_id,
            "delete template",
            self.backend.delete_template(template_id),
        )
        .await
        .is_some()
    }

    /// Ask the backend to make this the default for its process type.
    ///
    /// Other templates are not touched locally; the re-fetched list shows
    /// whatever the backend decided.
    pub async fn set_default(&self, template_id: DbId) -> bool {
        self.run(
            template_id,
            "set default template",
            self.backend.set_default_template(template_id),
        )
        .await
        .is_some()
    }

    async fn run<T, F>(&self, template_id: DbId, action: &str, request: F) -> Option<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let key = EntityKey::Template(template_id);
        let _guard = match self.pending.try_begin(key) {
            Ok(guard) => guard,
            Err(_) => {
                tracing::debug!(template_id, action, "Request already in flight, ignoring");
                return None;
            }
        };

        match request.await {
            Ok(value) => {
                tracing::info!(template_id, action, "Template updated");
                self.load().await;
                Some(value)
            }
            Err(e) => {
                tracing::warn!(template_id, action, error = %e, "Template mutation failed");
                self.banner.show(&e);
                None
            }
        }
    }
}

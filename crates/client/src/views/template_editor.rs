//! Template editor: header fields plus the ordered task definitions.

use std::sync::Arc;

use hrportal_core::models::template::{CreateTemplate, OnboardingTemplate, UpdateTemplate};
use hrportal_core::process_status::ProcessType;
use hrportal_core::task_type::TaskType;
use hrportal_core::template::{self, TemplateEditor, TemplateTaskDefinition};
use hrportal_core::types::DbId;

use crate::backend::PortalBackend;
use crate::error::{ClientError, ClientResult};

/// Default lead time for a new template.
const DEFAULT_DURATION_DAYS: u32 = 14;

/// Editable header fields of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub process_type: ProcessType,
    pub description: Option<String>,
    pub default_duration_days: u32,
}

impl TemplateDraft {
    pub fn new(process_type: ProcessType) -> Self {
        Self {
            name: String::new(),
            process_type,
            description: None,
            default_duration_days: DEFAULT_DURATION_DAYS,
        }
    }

    fn from_template(template: &OnboardingTemplate) -> Self {
        Self {
            name: template.name.clone(),
            process_type: template.process_type,
            description: template.description.clone(),
            default_duration_days: template.default_duration_days,
        }
    }
}

/// Edits one template. Owned by a single caller, so there is never a
/// second save in flight.
pub struct TemplateEditorView {
    backend: Arc<dyn PortalBackend>,
    template_id: Option<DbId>,
    draft: TemplateDraft,
    editor: TemplateEditor,
    error: Option<String>,
}

impl TemplateEditorView {
    /// Start a template that does not exist yet.
    pub fn create(backend: Arc<dyn PortalBackend>, process_type: ProcessType) -> Self {
        Self {
            backend,
            template_id: None,
            draft: TemplateDraft::new(process_type),
            editor: TemplateEditor::default(),
            error: None,
        }
    }

    /// Fetch and open an existing template.
    ///
    /// Unlike the other view operations this returns the error: without the
    /// stored template there is no view to put a banner on.
    pub async fn open(backend: Arc<dyn PortalBackend>, template_id: DbId) -> ClientResult<Self> {
        let template = backend.get_template(template_id).await?;
        let mut view = Self {
            backend,
            template_id: Some(template_id),
            draft: TemplateDraft::from_template(&template),
            editor: TemplateEditor::default(),
            error: None,
        };
        view.reset_to(&template);
        Ok(view)
    }

    pub fn template_id(&self) -> Option<DbId> {
        self.template_id
    }

    pub fn draft(&self) -> &TemplateDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TemplateDraft {
        &mut self.draft
    }

    pub fn editor(&self) -> &TemplateEditor {
        &self.editor
    }

    pub fn tasks(&self) -> &[TemplateTaskDefinition] {
        self.editor.tasks()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ---- definition editing ----

    /// Append a definition of `task_type`; returns its order.
    pub fn add_task(&mut self, task_type: TaskType) -> u32 {
        self.editor.add(TemplateTaskDefinition::new(task_type))
    }

    pub fn remove_task(&mut self, order: u32) -> bool {
        self.editor.remove(order).is_some()
    }

    pub fn move_up(&mut self, order: u32) -> bool {
        self.editor.move_up(order)
    }

    pub fn move_down(&mut self, order: u32) -> bool {
        self.editor.move_down(order)
    }

    pub fn update_task<F>(&mut self, order: u32, edit: F) -> bool
    where
        F: FnOnce(&mut TemplateTaskDefinition),
    {
        self.editor.update(order, edit)
    }

    // ---- persistence ----

    /// Validate and store the template, then reopen it from the backend.
    ///
    /// Creates the template on the first save. Returns `true` once the
    /// backend has accepted the template; from then on the view keeps its
    /// id, so a later save updates instead of creating another one. If only
    /// the reload fails, the edits stay in place and the banner says so.
    /// On any other failure the edits stay in place, the banner is set and
    /// `false` is returned.
    pub async fn save(&mut self) -> bool {
        let template_id = match self.store().await {
            Ok(template_id) => template_id,
            Err(e) => {
                tracing::warn!(template_id = ?self.template_id, error = %e, "Failed to save template");
                self.error = Some(e.user_message());
                return false;
            }
        };
        self.template_id = Some(template_id);
        tracing::info!(template_id, tasks = self.editor.len(), "Saved template");

        match self.backend.get_template(template_id).await {
            Ok(template) => {
                self.reset_to(&template);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(template_id, error = %e, "Failed to reload saved template");
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Send the create or update request; returns the stored id.
    async fn store(&self) -> Result<DbId, ClientError> {
        self.editor.validate()?;
        let encoded = self.editor.encode()?;

        match self.template_id {
            Some(template_id) => {
                let input = UpdateTemplate {
                    name: Some(self.draft.name.trim().to_string()),
                    description: Some(self.draft.description.clone()),
                    default_duration_days: Some(self.draft.default_duration_days),
                    task_definitions: Some(encoded),
                };
                input.check()?;
                Ok(self.backend.update_template(template_id, &input).await?.id)
            }
            None => {
                let input = CreateTemplate {
                    name: self.draft.name.trim().to_string(),
                    process_type: self.draft.process_type,
                    description: self.draft.description.clone(),
                    default_duration_days: self.draft.default_duration_days,
                    task_definitions: encoded,
                };
                input.check()?;
                Ok(self.backend.create_template(&input).await?.id)
            }
        }
    }

    /// Replace the draft and the definitions with the stored template.
    ///
    /// Malformed stored definitions open as an empty list.
    fn reset_to(&mut self, template: &OnboardingTemplate) {
        let definitions = template::decode(&template.task_definitions).unwrap_or_else(|e| {
            tracing::warn!(
                template_id = template.id,
                error = %e,
                "Stored task definitions are malformed, opening empty"
            );
            Vec::new()
        });
        self.draft = TemplateDraft::from_template(template);
        self.editor = TemplateEditor::new(definitions);
    }
}

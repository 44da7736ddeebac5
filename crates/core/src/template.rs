//! Template task definitions: codec, validation and the ordering editor.
//!
//! A template stores its task definitions as one serialized JSON array.
//! [`decode_or_empty`] is the fail-soft read path: a malformed or empty
//! stored value reads as an empty list. [`decode`] is the strict variant
//! used when validating input before it is sent.
//!
//! [`TemplateEditor`] keeps order indices contiguous (`1..=N`) under every
//! add, remove and move.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::task_type::{TaskType, TaskTypeCode};

/// Maximum expected duration accepted for a single task definition.
pub const MAX_EXPECTED_DURATION_DAYS: u32 = 365;

/// One task blueprint inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTaskDefinition {
    pub task_type: TaskTypeCode,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: u32,
    pub is_mandatory: bool,
    pub expected_duration_days: u32,
}

impl TemplateTaskDefinition {
    /// A mandatory definition titled after its type's label.
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type: task_type.into(),
            title: task_type.label().to_string(),
            description: None,
            order: 0,
            is_mandatory: true,
            expected_duration_days: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Serialize a definition list for storage.
pub fn encode(definitions: &[TemplateTaskDefinition]) -> Result<String, CoreError> {
    serde_json::to_string(definitions)
        .map_err(|e| CoreError::Internal(format!("Failed to encode task definitions: {e}")))
}

/// Parse a stored definition list, failing on malformed input.
pub fn decode(encoded: &str) -> Result<Vec<TemplateTaskDefinition>, CoreError> {
    serde_json::from_str(encoded)
        .map_err(|e| CoreError::Validation(format!("Malformed task definitions: {e}")))
}

/// Parse a stored definition list; malformed, empty or `null` input yields
/// an empty list.
pub fn decode_or_empty(encoded: &str) -> Vec<TemplateTaskDefinition> {
    decode(encoded).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Every definition needs a non-blank title and a sane duration.
pub fn validate_definitions(definitions: &[TemplateTaskDefinition]) -> Result<(), CoreError> {
    for (index, def) in definitions.iter().enumerate() {
        if def.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Task definition {} has an empty title",
                index + 1
            )));
        }
        if def.expected_duration_days > MAX_EXPECTED_DURATION_DAYS {
            return Err(CoreError::Validation(format!(
                "Task definition '{}' exceeds the maximum duration of {} days (got {})",
                def.title, MAX_EXPECTED_DURATION_DAYS, def.expected_duration_days
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Ordered definition list being edited. Orders are always `1..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateEditor {
    tasks: Vec<TemplateTaskDefinition>,
}

impl TemplateEditor {
    /// Start editing `definitions`, sorted by their stored order and
    /// renumbered so stored gaps or duplicates disappear.
    pub fn new(mut definitions: Vec<TemplateTaskDefinition>) -> Self {
        definitions.sort_by_key(|d| d.order);
        let mut editor = Self { tasks: definitions };
        editor.renumber();
        editor
    }

    /// Start editing a stored value, reading malformed data as empty.
    pub fn from_encoded(encoded: &str) -> Self {
        Self::new(decode_or_empty(encoded))
    }

    pub fn tasks(&self) -> &[TemplateTaskDefinition] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn orders(&self) -> Vec<u32> {
        self.tasks.iter().map(|t| t.order).collect()
    }

    pub fn get(&self, order: u32) -> Option<&TemplateTaskDefinition> {
        self.index_of(order).map(|i| &self.tasks[i])
    }

    /// Append a definition; returns the order it was placed at.
    pub fn add(&mut self, mut definition: TemplateTaskDefinition) -> u32 {
        let order = self.next_order();
        definition.order = order;
        self.tasks.push(definition);
        order
    }

    /// Remove the definition at `order` and close the gap.
    pub fn remove(&mut self, order: u32) -> Option<TemplateTaskDefinition> {
        let index = self.index_of(order)?;
        let removed = self.tasks.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Swap with the previous definition. No-op for the first.
    pub fn move_up(&mut self, order: u32) -> bool {
        match self.index_of(order) {
            Some(index) if index > 0 => {
                self.tasks.swap(index, index - 1);
                self.renumber();
                true
            }
            _ => false,
        }
    }

    /// Swap with the next definition. No-op for the last.
    pub fn move_down(&mut self, order: u32) -> bool {
        match self.index_of(order) {
            Some(index) if index + 1 < self.tasks.len() => {
                self.tasks.swap(index, index + 1);
                self.renumber();
                true
            }
            _ => false,
        }
    }

    /// Edit the definition at `order` in place. Its order is kept.
    pub fn update<F>(&mut self, order: u32, edit: F) -> bool
    where
        F: FnOnce(&mut TemplateTaskDefinition),
    {
        match self.index_of(order) {
            Some(index) => {
                edit(&mut self.tasks[index]);
                self.tasks[index].order = order;
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_definitions(&self.tasks)
    }

    pub fn encode(&self) -> Result<String, CoreError> {
        encode(&self.tasks)
    }

    /// Sum of expected durations, the sequential lead time of the template.
    pub fn total_duration_days(&self) -> u32 {
        self.tasks.iter().map(|t| t.expected_duration_days).sum()
    }

    pub fn into_definitions(self) -> Vec<TemplateTaskDefinition> {
        self.tasks
    }

    fn next_order(&self) -> u32 {
        self.tasks.len() as u32 + 1
    }

    fn index_of(&self, order: u32) -> Option<usize> {
        self.tasks.iter().position(|t| t.order == order)
    }

    fn renumber(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index as u32 + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! View controllers.
//!
//! Each view owns the authoritative copy of what it shows, a dismissible
//! error banner, and the bookkeeping that keeps one mutation per entity in
//! flight. View operations never return errors: failures end up in the
//! banner and the operation reports `false` or `None`. A mutation the
//! backend accepted reports success even if the reload after it fails; the
//! banner then holds the reload error.

pub mod groups;
pub mod process_detail;
pub mod process_list;
pub mod template_editor;
pub mod template_list;

use std::sync::{Mutex, MutexGuard};

use crate::error::ClientError;

pub use groups::GroupsView;
pub use process_detail::ProcessDetailView;
pub use process_list::{ProcessListView, ProcessRow};
pub use template_editor::{TemplateDraft, TemplateEditorView};
pub use template_list::TemplateListView;

/// The error banner shown above a view.
#[derive(Debug, Default)]
pub struct Banner {
    message: Mutex<Option<String>>,
}

impl Banner {
    pub fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    pub fn show(&self, error: &ClientError) {
        *self.slot() = Some(error.user_message());
    }

    pub fn dismiss(&self) {
        self.slot().take();
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.message.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lock a view's state mutex, ignoring poisoning.
///
/// State is only ever replaced wholesale, never left half-written.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

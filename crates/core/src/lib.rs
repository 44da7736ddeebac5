//! Domain core of the HR portal onboarding client.
//!
//! Status transition tables, progress aggregation, the template
//! task-definition codec and editor, task types, group merging and
//! presentation mappings. No I/O and no internal dependencies, so the
//! client crate and the CLI can both build on it.

pub mod error;
pub mod groups;
pub mod models;
pub mod presentation;
pub mod process_status;
pub mod progress;
pub mod response;
pub mod task_status;
pub mod task_type;
pub mod template;
pub mod types;

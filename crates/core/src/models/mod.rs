//! Backend record shapes and request DTOs.
//!
//! Field names follow the backend's camelCase JSON contract.

use serde::{Deserialize, Deserializer};

pub mod employee;
pub mod group;
pub mod process;
pub mod statistics;
pub mod task;
pub mod template;

/// Read a clearable field: absent stays `None` (via `#[serde(default)]`),
/// an explicit `null` becomes `Some(None)`.
pub(crate) fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

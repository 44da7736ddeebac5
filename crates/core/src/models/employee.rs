//! Personnel records used to resolve employee and assignee references.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// An employee as listed by the personnel endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: DbId,
    pub display_name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Find an employee by id.
pub fn find_employee(employees: &[Employee], id: DbId) -> Option<&Employee> {
    employees.iter().find(|e| e.id == id)
}

/// Active employees whose name or email contains `query`, case-insensitive.
pub fn search_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    employees
        .iter()
        .filter(|e| e.is_active)
        .filter(|e| {
            needle.is_empty()
                || e.display_name.to_lowercase().contains(&needle)
                || e
                    .email
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&needle))
        })
        .collect()
}

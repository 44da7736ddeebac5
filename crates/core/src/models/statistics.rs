//! Dashboard counters returned by the statistics endpoint.

use serde::{Deserialize, Serialize};

/// Aggregate counts across all processes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatistics {
    pub active_onboardings: u32,
    pub active_offboardings: u32,
    pub open_tasks: u32,
    pub completed_processes: u32,
}

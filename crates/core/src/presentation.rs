//! Badge colours for statuses, process types and task categories.
//!
//! Exhaustive matches: adding an enum variant breaks the build until every
//! table here covers it.

use serde::Serialize;

use crate::groups::GroupSource;
use crate::process_status::{ProcessStatus, ProcessType};
use crate::task_status::TaskStatus;
use crate::task_type::TaskCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeColor {
    Gray,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
        }
    }
}

pub fn task_status_color(status: TaskStatus) -> BadgeColor {
    match status {
        TaskStatus::NietGestart => BadgeColor::Gray,
        TaskStatus::Bezig => BadgeColor::Blue,
        TaskStatus::Voltooid => BadgeColor::Green,
        TaskStatus::Geblokkeerd => BadgeColor::Orange,
        TaskStatus::Overgeslagen => BadgeColor::Yellow,
        TaskStatus::Mislukt => BadgeColor::Red,
    }
}

pub fn process_status_color(status: ProcessStatus) -> BadgeColor {
    match status {
        ProcessStatus::Nieuw => BadgeColor::Gray,
        ProcessStatus::InProgress => BadgeColor::Blue,
        ProcessStatus::OnHold => BadgeColor::Yellow,
        ProcessStatus::Voltooid => BadgeColor::Green,
        ProcessStatus::Geannuleerd => BadgeColor::Red,
    }
}

pub fn process_type_color(process_type: ProcessType) -> BadgeColor {
    match process_type {
        ProcessType::Onboarding => BadgeColor::Green,
        ProcessType::Offboarding => BadgeColor::Orange,
    }
}

pub fn category_color(category: TaskCategory) -> BadgeColor {
    match category {
        TaskCategory::It => BadgeColor::Blue,
        TaskCategory::Hr => BadgeColor::Purple,
        TaskCategory::Preventie => BadgeColor::Orange,
        TaskCategory::Management => BadgeColor::Gray,
    }
}

pub fn group_source_color(source: GroupSource) -> BadgeColor {
    match source {
        GroupSource::Directory => BadgeColor::Blue,
        GroupSource::Dynamic => BadgeColor::Purple,
        GroupSource::Local => BadgeColor::Gray,
    }
}

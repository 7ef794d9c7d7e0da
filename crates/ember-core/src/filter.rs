use chrono::{DateTime, Utc};

use crate::priority::{self, Priority};
use crate::task::Task;

/// The four view modes the filter bar offers. UI state only; never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
    Today,
}

impl FilterMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "today" => Some(Self::Today),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Today => "today",
        }
    }
}

/// Order-preserving projection of the visible subset. Never mutates.
#[must_use]
pub fn select<'a>(tasks: &'a [Task], mode: FilterMode, now: DateTime<Utc>) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches(task, mode, now))
        .collect()
}

fn matches(task: &Task, mode: FilterMode, now: DateTime<Utc>) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Active => !task.completed,
        FilterMode::Completed => task.completed,
        FilterMode::Today => {
            task.due.is_some() && priority::classify(task.due, now) == Priority::Today
        }
    }
}

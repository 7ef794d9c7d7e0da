use chrono::{DateTime, Utc};

use crate::datetime::fractional_days_until;

/// Urgency bucket derived from due-date proximity. `Today` covers overdue
/// tasks as well as anything due within 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    None,
    Upcoming,
    Today,
}

/// Pure classification against `now`; callers re-evaluate on every render
/// since the clock keeps moving.
#[must_use]
pub fn classify(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Priority {
    let Some(due) = due else {
        return Priority::None;
    };

    let days_remaining = fractional_days_until(due, now);
    if days_remaining <= 1.0 {
        Priority::Today
    } else if days_remaining <= 3.0 {
        Priority::Upcoming
    } else {
        Priority::None
    }
}

use tracing::debug;

use crate::task::Task;

/// Result of one progress pass over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Completed share, floored to whole percent. 0 for an empty list.
    pub percent: u8,
    pub streak_incremented: bool,
}

/// Whole-percent completion share; an empty list counts as 0, not NaN.
#[must_use]
pub fn completion_percent(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    (completed * 100 / total) as u8
}

/// Daily-streak counter. The streak bumps on every update that observes a
/// non-empty, fully completed list, not only on the transition into that
/// state.
#[derive(Debug)]
pub struct ProgressTracker {
    streak: u64,
}

impl ProgressTracker {
    pub fn new(streak: u64) -> Self {
        Self { streak }
    }

    pub fn streak(&self) -> u64 {
        self.streak
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn update(&mut self, tasks: &[Task]) -> Progress {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let percent = completion_percent(tasks);

        let streak_incremented = total > 0 && completed == total;
        if streak_incremented {
            self.streak += 1;
        }

        debug!(
            percent,
            completed,
            total,
            streak = self.streak,
            "progress updated"
        );

        Progress {
            percent,
            streak_incremented,
        }
    }
}

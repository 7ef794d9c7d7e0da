use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::datastore::DataStore;
use crate::filter::{self, FilterMode};
use crate::parser;
use crate::progress::{Progress, ProgressTracker, completion_percent};
use crate::store::TaskStore;
use crate::task::Task;
use crate::voice::TranscriptionProvider;

/// The whole application state: task collection, streak tracker, current
/// filter. Handlers mutate it, persist, and report fresh progress; a
/// renderer of any kind sits on top and is never called back into.
#[derive(Debug)]
pub struct App {
    store: TaskStore,
    progress: ProgressTracker,
    filter: FilterMode,
}

impl App {
    /// Opens the datastore under `data_dir` and loads persisted state. A
    /// progress pass runs immediately, so a list that loads already fully
    /// completed bumps the streak right away.
    #[instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data = DataStore::open(data_dir)?;
        let streak = data.load_streak()?;
        let store = TaskStore::load(data)?;

        let mut app = Self {
            store,
            progress: ProgressTracker::new(streak),
            filter: FilterMode::default(),
        };

        let initial = app.refresh_progress()?;
        info!(
            tasks = app.store.tasks().len(),
            percent = initial.percent,
            streak = app.progress.streak(),
            "opened application state"
        );
        Ok(app)
    }

    /// Adds a task parsed from raw input. Whitespace-only input is a
    /// no-op.
    #[instrument(skip(self, raw, now))]
    pub fn on_add_task(&mut self, raw: &str, now: DateTime<Utc>) -> anyhow::Result<Progress> {
        let text = raw.trim();
        if text.is_empty() {
            debug!("empty input; nothing added");
            return Ok(self.progress_snapshot());
        }

        let task = parser::parse(text, now);
        let id = self.store.add(task)?;
        debug!(%id, "task added");
        self.refresh_progress()
    }

    #[instrument(skip(self))]
    pub fn on_toggle(&mut self, id: Uuid) -> anyhow::Result<Progress> {
        self.store.toggle_complete(id)?;
        self.refresh_progress()
    }

    #[instrument(skip(self))]
    pub fn on_delete(&mut self, id: Uuid) -> anyhow::Result<Progress> {
        self.store.remove(id)?;
        self.refresh_progress()
    }

    /// Pure UI-state change; nothing is persisted and progress is left
    /// alone.
    #[instrument(skip(self))]
    pub fn on_filter_change(&mut self, mode: FilterMode) {
        debug!(mode = mode.as_str(), "filter changed");
        self.filter = mode;
    }

    /// Runs one dictation round through the provider. A missing or blank
    /// transcript adds nothing.
    #[instrument(skip(self, provider, now))]
    pub fn on_voice_command(
        &mut self,
        provider: &mut dyn TranscriptionProvider,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Progress> {
        let mut transcript: Option<String> = None;
        provider.start(Box::new(|result| transcript = result));

        match transcript {
            Some(text) => self.on_add_task(&text, now),
            None => {
                debug!("no transcript; nothing added");
                Ok(self.progress_snapshot())
            }
        }
    }

    /// The subset the current filter lets through, in insertion order.
    #[must_use]
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Task> {
        filter::select(self.store.tasks(), self.filter, now)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn streak(&self) -> u64 {
        self.progress.streak()
    }

    pub fn percent(&self) -> u8 {
        completion_percent(self.store.tasks())
    }

    fn progress_snapshot(&self) -> Progress {
        Progress {
            percent: completion_percent(self.store.tasks()),
            streak_incremented: false,
        }
    }

    fn refresh_progress(&mut self) -> anyhow::Result<Progress> {
        let report = self.progress.update(self.store.tasks());
        if report.streak_incremented {
            self.store.data().save_streak(self.progress.streak())?;
        }
        Ok(report)
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::task::Task;

/// File-per-key persistence under a data directory: the task collection
/// lives in `tasks.json`, the streak counter in `streak`. Malformed or
/// empty values load as their defaults, never as errors.
#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub tasks_path: PathBuf,
    pub streak_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join("tasks.json");
        let streak_path = data_dir.join("streak");

        if !tasks_path.exists() {
            fs::write(&tasks_path, "[]")?;
        }
        if !streak_path.exists() {
            fs::write(&streak_path, "0")?;
        }

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            streak = %streak_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            tasks_path,
            streak_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Vec<Task>> {
        let raw = fs::read_to_string(&self.tasks_path)
            .with_context(|| format!("failed reading {}", self.tasks_path.display()))?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(vec![]);
        }

        match serde_json::from_str::<Vec<Task>>(trimmed) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded task collection");
                Ok(tasks)
            }
            Err(err) => {
                warn!(
                    file = %self.tasks_path.display(),
                    error = %err,
                    "malformed task collection; starting empty"
                );
                Ok(vec![])
            }
        }
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(tasks)?;
        write_atomic(&self.tasks_path, &serialized).context("failed to save tasks.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_streak(&self) -> anyhow::Result<u64> {
        let raw = fs::read_to_string(&self.streak_path)
            .with_context(|| format!("failed reading {}", self.streak_path.display()))?;

        match raw.trim().parse::<u64>() {
            Ok(streak) => Ok(streak),
            Err(err) => {
                warn!(
                    file = %self.streak_path.display(),
                    error = %err,
                    "malformed streak counter; resetting to zero"
                );
                Ok(0)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn save_streak(&self, streak: u64) -> anyhow::Result<()> {
        write_atomic(&self.streak_path, &streak.to_string()).context("failed to save streak")
    }
}

#[tracing::instrument(skip(path, payload))]
fn write_atomic(path: &Path, payload: &str) -> anyhow::Result<()> {
    debug!(file = %path.display(), bytes = payload.len(), "writing atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(payload.as_bytes())?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use super::DataStore;
    use crate::task::Task;

    #[test]
    fn fresh_store_loads_empty_defaults() {
        let temp = tempdir().expect("tempdir");
        let store = DataStore::open(temp.path()).expect("open datastore");

        assert!(store.load_tasks().expect("load tasks").is_empty());
        assert_eq!(store.load_streak().expect("load streak"), 0);
    }

    #[test]
    fn malformed_task_collection_loads_empty() {
        let temp = tempdir().expect("tempdir");
        let store = DataStore::open(temp.path()).expect("open datastore");

        std::fs::write(&store.tasks_path, "{not json").expect("corrupt tasks file");
        assert!(store.load_tasks().expect("load tasks").is_empty());
    }

    #[test]
    fn malformed_streak_loads_zero() {
        let temp = tempdir().expect("tempdir");
        let store = DataStore::open(temp.path()).expect("open datastore");

        std::fs::write(&store.streak_path, "three").expect("corrupt streak file");
        assert_eq!(store.load_streak().expect("load streak"), 0);

        store.save_streak(7).expect("save streak");
        assert_eq!(store.load_streak().expect("load streak"), 7);
    }

    #[test]
    fn task_collection_roundtrips_time_equal() {
        let temp = tempdir().expect("tempdir");
        let store = DataStore::open(temp.path()).expect("open datastore");

        let mut task = Task::new("Water the plants tomorrow".to_string());
        task.due = Some(
            Utc.with_ymd_and_hms(2026, 2, 17, 5, 0, 0)
                .single()
                .expect("valid due"),
        );
        let mut done = Task::new("Call mom".to_string());
        done.completed = true;

        store
            .save_tasks(&[task.clone(), done.clone()])
            .expect("save tasks");
        let reloaded = store.load_tasks().expect("load tasks");

        assert_eq!(reloaded, vec![task, done]);
    }
}

use anyhow::anyhow;
use tracing::{debug, info};
use uuid::Uuid;

use crate::datastore::DataStore;
use crate::task::Task;

/// Insertion-ordered task collection with synchronous write-through: every
/// mutation rewrites the persisted collection before returning.
#[derive(Debug)]
pub struct TaskStore {
    data: DataStore,
    tasks: Vec<Task>,
}

impl TaskStore {
    #[tracing::instrument(skip(data))]
    pub fn load(data: DataStore) -> anyhow::Result<Self> {
        let tasks = data.load_tasks()?;
        info!(count = tasks.len(), "loaded task store");
        Ok(Self { data, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    #[tracing::instrument(skip(self, task), fields(id = %task.id))]
    pub fn add(&mut self, task: Task) -> anyhow::Result<Uuid> {
        let id = task.id;
        self.tasks.push(task);
        self.persist()?;
        debug!(count = self.tasks.len(), "task added");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: Uuid) -> anyhow::Result<bool> {
        let completed = {
            let task = self
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| anyhow!("task not found: {id}"))?;
            task.completed = !task.completed;
            task.completed
        };

        self.persist()?;
        debug!(completed, "task toggled");
        Ok(completed)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: Uuid) -> anyhow::Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| anyhow!("task not found: {id}"))?;

        let task = self.tasks.remove(idx);
        self.persist()?;
        debug!(count = self.tasks.len(), "task removed");
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    pub fn persist(&self) -> anyhow::Result<()> {
        self.data.save_tasks(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use uuid::Uuid;

    use super::TaskStore;
    use crate::datastore::DataStore;
    use crate::task::Task;

    fn open_store(dir: &std::path::Path) -> TaskStore {
        let data = DataStore::open(dir).expect("open datastore");
        TaskStore::load(data).expect("load store")
    }

    #[test]
    fn mutations_write_through() {
        let temp = tempdir().expect("tempdir");
        let mut store = open_store(temp.path());

        let id = store
            .add(Task::new("Buy milk".to_string()))
            .expect("add task");
        assert!(store.toggle_complete(id).expect("toggle"));

        // a second store over the same directory sees every mutation
        let reread = open_store(temp.path());
        assert_eq!(reread.tasks().len(), 1);
        assert!(reread.tasks()[0].completed);

        drop(reread);
        store.remove(id).expect("remove");
        assert!(open_store(temp.path()).tasks().is_empty());
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let temp = tempdir().expect("tempdir");
        let mut store = open_store(temp.path());

        let id = store
            .add(Task::new("Buy milk".to_string()))
            .expect("add task");
        assert!(store.toggle_complete(id).expect("first toggle"));
        assert!(!store.toggle_complete(id).expect("second toggle"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let temp = tempdir().expect("tempdir");
        let mut store = open_store(temp.path());

        for text in ["first", "second", "third"] {
            store.add(Task::new(text.to_string())).expect("add task");
        }

        let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let mut store = open_store(temp.path());

        assert!(store.toggle_complete(Uuid::new_v4()).is_err());
        assert!(store.remove(Uuid::new_v4()).is_err());
    }
}

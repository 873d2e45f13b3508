use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use thiserror::Error;

use crate::task::{next_id, parse_record, Task};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task file IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write task records: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of a load: the tasks that parsed, plus how many stored records
/// were dropped as malformed.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub skipped: usize,
}

/// File-backed task store. Every operation is one synchronous
/// load-mutate-save pass over the whole collection; the file is the only
/// state that survives between invocations.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection, creating the file when absent. Malformed
    /// records are counted in the outcome instead of failing the load.
    pub fn load(&self) -> Result<LoadOutcome, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::write(&self.path, "")?;
                String::new()
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut tasks = Vec::new();
        let mut skipped = 0;
        for record in reader.records() {
            match parse_record(&record?) {
                Ok(task) => tasks.push(task),
                Err(_) => skipped += 1,
            }
        }
        Ok(LoadOutcome { tasks, skipped })
    }

    /// Rewrites the file with the given collection. Writes go to a sibling
    /// temp file first and land via rename, so an interrupted save cannot
    /// truncate the previous contents.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)?;
        for task in tasks {
            writer.serialize(task)?;
        }
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Appends a task under a fresh id and persists the collection.
    /// Returns the stored task so callers can report the assigned id.
    pub fn add(&self, description: &str) -> Result<Task, StoreError> {
        let LoadOutcome { mut tasks, .. } = self.load()?;
        let task = Task {
            id: next_id(&tasks),
            description: description.to_string(),
        };
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    /// Read-only view of the collection in stored order.
    pub fn list(&self) -> Result<LoadOutcome, StoreError> {
        self.load()
    }

    /// Removes the task with the given id, keeping every other task in its
    /// relative order. Deleting an id that is not present is a no-op; the
    /// return value reports whether anything was removed.
    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let LoadOutcome { mut tasks, .. } = self.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        let removed = tasks.len() != before;
        self.save(&tasks)?;
        Ok(removed)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

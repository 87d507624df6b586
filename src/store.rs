//! Local key-value storage and the task list persistence adapter.
//!
//! The task list lives under a single fixed key. Every save writes the whole
//! list; a failed read or write is logged and otherwise ignored, since the
//! in-memory list is authoritative for the running session.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};

use crate::error::StoreError;
use crate::task::Task;

/// Key the task list is stored under.
pub const TASKS_KEY: &str = "todos";

/// String-keyed storage for serialized values.
pub trait KeyValueStore {
    /// Read the value stored at `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored at `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        FileStore {
            dir: dir.to_path_buf(),
        }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.sync_all()?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// Serializes the task list to and from a [`KeyValueStore`].
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        PersistenceAdapter { store }
    }

    /// Write the whole list under [`TASKS_KEY`]. Failures are logged and dropped.
    pub fn save(&mut self, tasks: &[Task]) {
        if let Err(e) = self.try_save(tasks) {
            error!("failed to save {} task(s): {e}", tasks.len());
        }
    }

    /// Read the stored list. A missing key, unreadable store or malformed payload
    /// all yield an empty list; the latter two are logged.
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => {
                info!("loaded {} task(s)", tasks.len());
                tasks
            }
            Ok(None) => {
                info!("no stored tasks, starting empty");
                Vec::new()
            }
            Err(e) => {
                error!("failed to load tasks, starting empty: {e}");
                Vec::new()
            }
        }
    }

    pub fn try_save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let value = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &value)
    }

    pub fn try_load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        match self.store.get(TASKS_KEY)? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }
}

/// Saves task list snapshots on a dedicated thread.
///
/// `submit` never blocks. When several snapshots queue up while a write is in
/// flight, only the newest is written.
pub struct BackgroundWriter {
    tx: Option<Sender<Vec<Task>>>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundWriter {
    /// Move `adapter` onto a new writer thread.
    pub fn spawn<S>(mut adapter: PersistenceAdapter<S>) -> std::io::Result<Self>
    where
        S: KeyValueStore + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Vec<Task>>();
        let handle = thread::Builder::new()
            .name("todo-writer".into())
            .spawn(move || {
                while let Ok(mut snapshot) = rx.recv() {
                    let mut skipped = 0usize;
                    while let Ok(newer) = rx.try_recv() {
                        snapshot = newer;
                        skipped += 1;
                    }
                    if skipped > 0 {
                        debug!("coalesced {skipped} queued snapshot(s)");
                    }
                    adapter.save(&snapshot);
                }
                debug!("writer thread exiting");
            })?;

        Ok(BackgroundWriter {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a snapshot for writing.
    pub fn submit(&self, tasks: Vec<Task>) {
        match &self.tx {
            Some(tx) => {
                if tx.send(tasks).is_err() {
                    error!("writer thread is gone, snapshot dropped");
                }
            }
            None => warn!("writer already flushed, snapshot dropped"),
        }
    }

    /// Write everything still queued and stop the writer thread.
    pub fn flush(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("writer thread panicked");
            }
        }
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        self.flush();
    }
}

/// In-memory store shared between clones, for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStore {
    /// Raw value at `key`, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

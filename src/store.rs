//! Durable key-value storage for scores
use crate::util::error_chain;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use thiserror::Error;

/// Key under which the best score is stored
pub(crate) const HIGH_SCORE_KEY: &str = "high_score";

/// A key-value store of non-negative integers
pub(crate) trait ScoreStore {
    /// Return the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// A store that lives only as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(HashMap<String, u32>);

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.0.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A store backed by a JSON object in a file on disk.  The whole file is
/// rewritten on every `set()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Read the store at `path`.  A nonexistent file is treated as an empty
    /// store and is only created on the first `set()`.
    pub(crate) fn load(path: PathBuf) -> Result<JsonFileStore, LoadError> {
        let values = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).map_err(LoadError::deserialize)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(JsonFileStore { path, values })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&self.values).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        self.save()?;
        Ok(())
    }
}

/// Wraps another store so that writes happen on a dedicated thread and never
/// block the caller.  Failed writes are logged by that thread.
///
/// Dropping a `BackgroundStore` waits for all queued writes to finish.
#[derive(Debug)]
pub(crate) struct BackgroundStore<S> {
    inner: Arc<Mutex<S>>,
    sender: Option<Sender<(String, u32)>>,
    worker: Option<JoinHandle<()>>,
}

impl<S: ScoreStore + Send + 'static> BackgroundStore<S> {
    pub(crate) fn spawn(store: S) -> BackgroundStore<S> {
        let inner = Arc::new(Mutex::new(store));
        let (sender, receiver) = channel::<(String, u32)>();
        let shared = Arc::clone(&inner);
        let worker = std::thread::spawn(move || {
            for (key, value) in receiver {
                let Ok(mut store) = shared.lock() else {
                    log::error!("Score store lock poisoned; dropping remaining writes");
                    return;
                };
                match store.set(&key, value) {
                    Ok(()) => log::debug!("Stored {key} = {value}"),
                    Err(e) => log::warn!("Failed to store {key} = {value}: {}", error_chain(&e)),
                }
            }
        });
        BackgroundStore {
            inner,
            sender: Some(sender),
            worker: Some(worker),
        }
    }
}

impl<S: ScoreStore> ScoreStore for BackgroundStore<S> {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.sender
            .as_ref()
            .ok_or(StoreError::WriterGone)?
            .send((key.to_owned(), value))
            .map_err(|_| StoreError::WriterGone)
    }
}

impl<S> Drop for BackgroundStore<S> {
    fn drop(&mut self) {
        // Closing the channel ends the worker's loop once the queue drains.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Score store writer thread panicked");
            }
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to write score store")]
    Save(#[from] SaveError),
    #[error("score store writer thread has exited")]
    WriterGone,
    #[error("score store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
#[error("Failed to save scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize scores")]
    Deserialize(#[source] serde_json::Error),
}

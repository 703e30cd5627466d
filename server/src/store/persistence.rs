use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::models::Registration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to load registrations from {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("failed to persist registrations to {path}: {reason}")]
    Persist { path: String, reason: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("persistence sink error: {0}")]
    Sink(String),
}

/// Storage backend behind the registration store.
///
/// `load` returns `Ok(None)` when nothing has been stored yet.
pub trait PersistenceSink: Send + Sync + 'static {
    fn load(&self) -> Result<Option<Vec<Registration>>, StoreError>;
    fn save(&self, registrations: &[Registration]) -> Result<(), StoreError>;
    fn describe(&self) -> String;
}

/// Pretty-printed JSON array overwritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn load_error(&self, reason: impl ToString) -> StoreError {
        StoreError::Load {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn persist_error(&self, reason: impl ToString) -> StoreError {
        StoreError::Persist {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl PersistenceSink for JsonFileSink {
    fn load(&self) -> Result<Option<Vec<Registration>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.load_error(err)),
        };

        let registrations: Vec<Registration> =
            serde_json::from_str(&content).map_err(|e| self.load_error(e))?;

        Ok(Some(registrations))
    }

    fn save(&self, registrations: &[Registration]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(registrations)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.persist_error(e))?;
            }
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        fs::write(&self.path, body).map_err(|e| self.persist_error(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the last saved snapshot in memory. Used by tests and by embedders
/// that do not want a file.
#[derive(Clone, Default)]
pub struct InMemorySink {
    snapshot: Arc<Mutex<Option<Vec<Registration>>>>,
    fail_saves: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(registrations: Vec<Registration>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Some(registrations))),
            fail_saves: false,
        }
    }

    /// A sink whose every save fails, like a read-only filesystem.
    pub fn failing() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
            fail_saves: true,
        }
    }

    pub fn snapshot(&self) -> Option<Vec<Registration>> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl PersistenceSink for InMemorySink {
    fn load(&self) -> Result<Option<Vec<Registration>>, StoreError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Sink(format!("mutex poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save(&self, registrations: &[Registration]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Sink("read-only sink".to_string()));
        }

        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| StoreError::Sink(format!("mutex poisoned: {}", e)))?;
        *guard = Some(registrations.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::RegistrationFields;

    fn sample(name: &str) -> Registration {
        Registration::new(RegistrationFields {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("registrations.json"));

        assert!(sink.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("registrations.json");
        let sink = JsonFileSink::new(&path);

        sink.save(&[sample("Asha")]).unwrap();

        assert!(path.exists());
        let loaded = sink.load().unwrap().expect("saved snapshot");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Asha");
    }

    #[test]
    fn saved_file_is_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.json");
        let sink = JsonFileSink::new(&path);

        sink.save(&[sample("Asha")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n"));
        assert!(content.contains("\n  {"));
    }

    #[test]
    fn concurrent_saves_leave_a_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("registrations.json"));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    let batch: Vec<Registration> =
                        (0..=worker).map(|n| sample(&format!("{worker}-{n}"))).collect();
                    for _ in 0..20 {
                        sink.save(&batch).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = sink.load().unwrap().expect("saved snapshot");
        assert!((1..=4).contains(&loaded.len()));
    }

    #[test]
    fn corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.json");
        fs::write(&path, "{not json").unwrap();

        let result = JsonFileSink::new(&path).load();
        assert!(matches!(result, Err(StoreError::Load { .. })));
    }

    #[test]
    fn unwritable_location_is_a_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let sink = JsonFileSink::new(blocker.join("registrations.json"));

        let result = sink.save(&[sample("Asha")]);
        assert!(matches!(result, Err(StoreError::Persist { .. })));
    }

    #[test]
    fn in_memory_sink_keeps_last_snapshot() {
        let sink = InMemorySink::new();
        assert!(sink.load().unwrap().is_none());

        sink.save(&[sample("a"), sample("b")]).unwrap();
        sink.save(&[sample("c")]).unwrap();

        let snapshot = sink.snapshot().expect("snapshot");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "c");
    }

    #[test]
    fn failing_sink_rejects_saves() {
        let sink = InMemorySink::failing();
        assert!(sink.save(&[sample("a")]).is_err());
        assert!(sink.snapshot().is_none());
    }
}

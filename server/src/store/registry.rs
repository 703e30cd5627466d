use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::export;
use super::models::{Registration, RegistrationFields};
use super::persistence::{PersistenceSink, StoreError};

/// Ordered, append-only collection of registrations.
///
/// The in-memory list is the system of record. Every mutation is followed by
/// a best-effort save of the whole list to the sink; a failed save is logged
/// and otherwise ignored.
#[derive(Clone)]
pub struct RegistrationStore {
    records: Arc<RwLock<Vec<Registration>>>,
    sink: Arc<dyn PersistenceSink>,
}

impl RegistrationStore {
    /// Empty store that has not read the sink.
    pub fn new(sink: Arc<dyn PersistenceSink>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            sink,
        }
    }

    /// Builds a store and fills it from the sink. Never fails.
    pub fn open(sink: Arc<dyn PersistenceSink>) -> Self {
        let store = Self::new(sink);
        store.load();
        store
    }

    pub fn append(&self, fields: RegistrationFields) -> Registration {
        let registration = Registration::new(fields);

        self.write().push(registration.clone());
        self.persist();

        registration
    }

    pub fn list(&self) -> Vec<Registration> {
        self.read().clone()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn clear(&self) {
        let cleared = {
            let mut records = self.write();
            let cleared = records.len();
            records.clear();
            cleared
        };
        log::info!("Cleared {} registrations", cleared);
        self.persist();
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        export::to_json(&self.read())
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, StoreError> {
        export::to_csv(&self.read())
    }

    pub fn storage(&self) -> String {
        self.sink.describe()
    }

    // Saves from a read guard: a save always sees the latest list and no
    // mutation lands until it is written.
    fn persist(&self) {
        let records = self.read();
        if let Err(err) = self.sink.save(&records) {
            log::warn!("Could not persist registrations (keeping in memory): {}", err);
        }
    }

    fn load(&self) {
        let loaded = match self.sink.load() {
            Ok(Some(registrations)) => {
                log::info!(
                    "Loaded {} registrations from {}",
                    registrations.len(),
                    self.sink.describe()
                );
                registrations
            }
            Ok(None) => {
                log::info!(
                    "No stored registrations at {}, starting empty",
                    self.sink.describe()
                );
                Vec::new()
            }
            Err(err) => {
                log::error!("{}; starting with an empty store", err);
                Vec::new()
            }
        };

        *self.write() = loaded;
    }

    // Poisoning is ignored: push and clear never leave the list half-written.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Registration>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Registration>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

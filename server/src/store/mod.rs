pub mod export;
pub mod models;
pub mod persistence;
pub mod registry;

pub use models::{Registration, RegistrationFields, EXPORT_COLUMNS};
pub use persistence::{InMemorySink, JsonFileSink, PersistenceSink, StoreError};
pub use registry::RegistrationStore;

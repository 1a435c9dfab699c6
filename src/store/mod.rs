mod memory;
mod realtime_db;
mod record;
mod traits;

use std::sync::Arc;

pub use memory::{MemoryStore, StoredRecord};
pub use realtime_db::RealtimeDbStore;
pub use record::{FormRecord, Timestamp};
pub use traits::RecordStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::AppResult;

pub fn open_store(config: &StoreConfig) -> AppResult<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::RealtimeDb => Arc::new(RealtimeDbStore::new(config)?),
    };
    tracing::info!(store = %store.describe(), "record store ready");
    Ok(store)
}

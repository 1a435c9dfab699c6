use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::record::{FormRecord, Timestamp};
use super::traits::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub key: String,
    pub collection: String,
    pub record: FormRecord,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    attempts: usize,
    failure: Option<String>,
}

/// In-process store used by the playground and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following append fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.with_inner(|inner| inner.failure = Some(reason.into()));
    }

    pub fn succeed(&self) {
        self.with_inner(|inner| inner.failure = None);
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.with_inner(|inner| inner.records.clone())
    }

    pub fn attempts(&self) -> usize {
        self.with_inner(|inner| inner.attempts)
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, collection: &str, record: &FormRecord) -> AppResult<String> {
        self.with_inner(|inner| {
            inner.attempts += 1;
            if let Some(reason) = &inner.failure {
                return Err(AppError::store(reason.clone()));
            }
            let mut record = record.clone();
            if record.timestamp == Timestamp::Server {
                record.timestamp = Timestamp::At(chrono::Utc::now().timestamp_millis());
            }
            let key = format!("rec-{}", inner.records.len() + 1);
            inner.records.push(StoredRecord {
                key: key.clone(),
                collection: collection.to_string(),
                record,
            });
            Ok(key)
        })
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}

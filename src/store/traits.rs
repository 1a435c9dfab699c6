use async_trait::async_trait;

use crate::error::AppResult;

use super::record::FormRecord;

/// Append-only remote collection. One call is one write attempt; callers
/// never retry.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Appends `record` to `collection` and returns the key the store assigned.
    async fn append(&self, collection: &str, record: &FormRecord) -> AppResult<String>;

    fn describe(&self) -> String;
}

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::error::{AppError, AppResult};

use super::record::FormRecord;
use super::traits::RecordStore;

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Realtime-database REST backend: each append is a `POST` to
/// `{database_url}/{collection}.json`, which generates a push key.
#[derive(Debug, Clone)]
pub struct RealtimeDbStore {
    client: reqwest::Client,
    database_url: String,
}

impl RealtimeDbStore {
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let database_url = config.database_url.trim().trim_end_matches('/').to_string();
        if database_url.is_empty() {
            return Err(AppError::config("store.database_url must not be empty"));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| AppError::config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            database_url,
        })
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}.json", self.database_url, collection.trim_matches('/'))
    }
}

#[async_trait]
impl RecordStore for RealtimeDbStore {
    async fn append(&self, collection: &str, record: &FormRecord) -> AppResult<String> {
        let url = self.collection_url(collection);
        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|err| AppError::store(format!("could not reach the database: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = body.trim();
            tracing::warn!(%status, "record store rejected write");
            return Err(AppError::store(if detail.is_empty() {
                format!("database answered {status}")
            } else {
                format!("database answered {status}: {detail}")
            }));
        }

        let pushed: PushResponse = response
            .json()
            .await
            .map_err(|err| AppError::store(format!("unexpected database response: {err}")))?;
        Ok(pushed.name)
    }

    fn describe(&self) -> String {
        format!("realtime database at {}", self.database_url)
    }
}

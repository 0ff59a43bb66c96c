//! PostgREST-backed store implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;

use super::{Query, RaceStore, StoreError};
use crate::config::DatabaseConfig;

/// Store backed by a PostgREST endpoint (e.g. a Supabase project).
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
}

impl PostgrestStore {
    /// Build a client for the configured endpoint. The API key, when
    /// present, is sent as both the `apikey` header and a bearer token,
    /// which is what Supabase expects for service access.
    pub fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let mut apikey = HeaderValue::from_str(key)?;
            apikey.set_sensitive(true);
            headers.insert("apikey", apikey);
            let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RaceStore for PostgrestStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/{}", self.base_url, query.table);
        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Database {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

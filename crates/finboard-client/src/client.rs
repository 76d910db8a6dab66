//! reqwest-backed client for the transactions API

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::types::{ListQuery, Transaction};
use crate::TransactionSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("finboard/", env!("CARGO_PKG_VERSION"));

const HEALTH_PATH: &str = "/health";
const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

/// Client for the backend's `/health` and `/api/v1/transactions` endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the default timeout
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Build { message: e.to_string() })?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`; Ok when the backend answers with a success status
    pub async fn health(&self) -> ClientResult<()> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        check_status(&response)?;
        Ok(())
    }

    /// `GET /api/v1/transactions` with optional `skip`/`limit`
    pub async fn list(&self, query: ListQuery) -> ClientResult<Vec<Transaction>> {
        let request = self
            .client
            .get(self.url(TRANSACTIONS_PATH))
            .query(&query.to_pairs());
        self.fetch_json(request).await
    }

    /// The dashboard's mount-time fetch: `GET /api/v1/transactions/?limit=N`
    pub async fn list_for_view(&self, limit: u32) -> ClientResult<Vec<Transaction>> {
        let request = self
            .client
            .get(self.url(&format!("{}/", TRANSACTIONS_PATH)))
            .query(&ListQuery::limit(limit).to_pairs());
        self.fetch_json(request).await
    }

    /// `GET /api/v1/transactions/{id}`
    pub async fn get(&self, id: i64) -> ClientResult<Transaction> {
        let request = self.client.get(self.url(&format!("{}/{}", TRANSACTIONS_PATH, id)));
        self.fetch_json(request).await
    }

    /// Request the list endpoint with an `Origin` header and return the
    /// `Access-Control-Allow-Origin` value, if any
    pub async fn cors_allow_origin(&self, origin: &str) -> ClientResult<Option<String>> {
        let response = self
            .client
            .get(self.url(TRANSACTIONS_PATH))
            .header(ORIGIN, origin)
            .send()
            .await?;
        check_status(&response)?;

        Ok(response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string()))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        debug!("{} {}", response.status(), response.url());
        check_status(&response)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode { message: e.to_string() })
    }
}

fn check_status(response: &reqwest::Response) -> ClientResult<()> {
    let status = response.status();
    if !status.is_success() {
        warn!("Request to {} failed with status {}", response.url(), status);
        return Err(ClientError::Http { status: status.as_u16() });
    }
    Ok(())
}

#[async_trait]
impl TransactionSource for ApiClient {
    async fn load_transactions(&self, limit: u32) -> ClientResult<Vec<Transaction>> {
        self.list_for_view(limit).await
    }
}

//! vacancy-clickhouse — [`PostingStore`] over the ClickHouse HTTP interface.
//!
//! Statements are POSTed to `<url>/?database=<db>&param_pN=<value>…` with the
//! credentials in `X-ClickHouse-User` / `X-ClickHouse-Key` headers. Result
//! rows come back as `JSONEachRow` and are decoded line by line.

pub mod rows;
pub mod sql;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use vacancy_core::config::StoreConfig;
use vacancy_core::predicate::Predicate;
use vacancy_core::store::{PostingStore, StoreError, Window};
use vacancy_core::types::Posting;

/// Longest error body kept in [`StoreError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum ClickHouseError {
    #[error("invalid ClickHouse url {0:?}")]
    InvalidUrl(String),
    #[error("invalid table name {0:?}")]
    InvalidTable(String),
}

#[derive(Debug, Clone)]
pub struct ClickHouseOptions {
    pub url: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub table: String,
}

impl From<&StoreConfig> for ClickHouseOptions {
    fn from(cfg: &StoreConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            database: cfg.database.clone(),
            user: cfg.user.clone(),
            password: cfg.password.clone(),
            table: cfg.table.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ClickHouseStore {
    client: Client<HttpConnector, Full<Bytes>>,
    base: String,
    options: ClickHouseOptions,
}

impl ClickHouseStore {
    pub fn new(options: ClickHouseOptions) -> Result<Self, ClickHouseError> {
        let base = options.url.trim_end_matches('/').to_string();
        let uri: Uri = base
            .parse()
            .map_err(|_| ClickHouseError::InvalidUrl(options.url.clone()))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(ClickHouseError::InvalidUrl(options.url.clone()));
        }
        if !sql::is_identifier(&options.table) {
            return Err(ClickHouseError::InvalidTable(options.table.clone()));
        }

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            client,
            base,
            options,
        })
    }

    /// `SELECT 1`; fails when the server is unreachable or rejects the
    /// credentials.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.execute("SELECT 1".to_string(), Vec::new()).await.map(|_| ())
    }

    /// Create the postings table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.execute(sql::create_table(&self.options.table), Vec::new())
            .await?;
        tracing::info!(table = %self.options.table, "postings table ensured");
        Ok(())
    }

    async fn execute(
        &self,
        statement: String,
        params: Vec<(String, String)>,
    ) -> Result<Bytes, StoreError> {
        let mut query = vec![("database".to_string(), self.options.database.clone())];
        query.extend(params);
        let query = serde_urlencoded::to_string(&query)
            .map_err(|e| StoreError::Transport(format!("encoding parameters: {e}")))?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/?{query}", self.base))
            .header("X-ClickHouse-User", &self.options.user)
            .header("X-ClickHouse-Key", &self.options.password)
            .header(hyper::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(statement)))
            .map_err(|e| StoreError::Transport(format!("building request: {e}")))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| StoreError::Transport(format!("reading response: {e}")))?
            .to_bytes();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let body: String = text.trim().chars().take(MAX_ERROR_BODY).collect();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl PostingStore for ClickHouseStore {
    async fn query(
        &self,
        predicate: &Predicate,
        window: Window,
    ) -> Result<Vec<Posting>, StoreError> {
        let statement = sql::select_postings(&self.options.table, predicate, window)?;
        let body = self.execute(statement.sql, statement.params).await?;
        Ok(rows::decode_rows(&body))
    }
}

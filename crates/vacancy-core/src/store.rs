//! Store — the posting-store capability the cascade queries, plus an
//! in-memory implementation.
//!
//! Every implementation orders results by publication time, newest first, with
//! the posting identifier (descending) as the tie-breaker so pagination is
//! stable across pages.

use crate::predicate::Predicate;
use crate::types::Posting;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::RwLock;

/// Pagination window applied to one store query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store query timed out after {0:?}")]
    Timeout(Duration),
    #[error("store transport error: {0}")]
    Transport(String),
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("predicate has {placeholders} placeholders but {args} arguments")]
    Binding { placeholders: usize, args: usize },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PostingStore: Send + Sync {
    /// Postings matching `predicate`, newest first, restricted to `window`.
    async fn query(&self, predicate: &Predicate, window: Window)
        -> Result<Vec<Posting>, StoreError>;
}

/// Sort key shared by every store: `published_at DESC, id DESC`.
pub fn recency_order(a: &Posting, b: &Posting) -> std::cmp::Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| b.id.cmp(&a.id))
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Postings keyed by identifier. Inserting an existing identifier replaces the
/// stored posting, like the `ReplacingMergeTree` table ingestion writes to.
#[derive(Debug, Default)]
pub struct MemoryStore {
    postings: RwLock<BTreeMap<i32, Posting>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_postings(postings: impl IntoIterator<Item = Posting>) -> Self {
        let map = postings.into_iter().map(|p| (p.id, p)).collect();
        Self {
            postings: RwLock::new(map),
        }
    }

    /// Load a JSON array of postings.
    pub fn load_fixtures(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let postings: Vec<Posting> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), postings = postings.len(), "fixtures loaded");
        Ok(Self::from_postings(postings))
    }

    pub async fn insert(&self, posting: Posting) {
        self.postings.write().await.insert(posting.id, posting);
    }

    pub async fn len(&self) -> usize {
        self.postings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.postings.read().await.is_empty()
    }
}

#[async_trait]
impl PostingStore for MemoryStore {
    async fn query(
        &self,
        predicate: &Predicate,
        window: Window,
    ) -> Result<Vec<Posting>, StoreError> {
        let postings = self.postings.read().await;
        let mut matched: Vec<&Posting> = postings.values().filter(|p| predicate.matches(p)).collect();
        matched.sort_by(|a, b| recency_order(a, b));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

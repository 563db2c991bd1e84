//! Posting stores with scripted behaviour for cascade and API harnesses.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vacancy_core::predicate::Clause;
use vacancy_core::{MemoryStore, Posting, PostingStore, Predicate, StoreError, Window};

/// One query as the store saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub clauses: Vec<Clause>,
    pub args: Vec<String>,
    pub window: Window,
}

// ---------------------------------------------------------------------------
// RecordingStore
// ---------------------------------------------------------------------------

/// Delegates to a [`MemoryStore`] and records every query it receives.
pub struct RecordingStore {
    inner: MemoryStore,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl RecordingStore {
    pub fn new(postings: impl IntoIterator<Item = Posting>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::from_postings(postings),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostingStore for RecordingStore {
    async fn query(&self, predicate: &Predicate, window: Window) -> Result<Vec<Posting>, StoreError> {
        self.queries.lock().unwrap().push(RecordedQuery {
            clauses: predicate.clauses().to_vec(),
            args: predicate.args().to_vec(),
            window,
        });
        self.inner.query(predicate, window).await
    }
}

// ---------------------------------------------------------------------------
// FailingStore
// ---------------------------------------------------------------------------

/// Fails the first `failures` queries, then delegates to a [`MemoryStore`].
/// `usize::MAX` fails forever.
pub struct FailingStore {
    inner: MemoryStore,
    failures: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn always() -> Arc<Self> {
        Self::first(usize::MAX, Vec::new())
    }

    pub fn first(failures: usize, postings: impl IntoIterator<Item = Posting>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::from_postings(postings),
            failures,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostingStore for FailingStore {
    async fn query(&self, predicate: &Predicate, window: Window) -> Result<Vec<Posting>, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(StoreError::Transport("connection reset by peer".to_string()));
        }
        self.inner.query(predicate, window).await
    }
}

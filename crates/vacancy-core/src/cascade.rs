//! Cascade search — a fixed ladder of progressively relaxed filter
//! combinations, tried in order until one fills a page.
//!
//! # Ladder
//!
//! | Step | Filters | Runs when |
//! |------|---------|-----------|
//! | [`Relaxation::AsParsed`] | city, keyword, experience | always |
//! | [`Relaxation::DropExperience`] | city, keyword | experience set |
//! | [`Relaxation::DropCity`] | keyword, experience | city set |
//! | [`Relaxation::KeywordOnly`] | keyword | keyword set |
//! | [`Relaxation::Unfiltered`] | none | always |
//!
//! Every step uses the same pagination window. The first step returning
//! exactly `page.size` rows ends the search. Otherwise the rows of the last
//! step that executed successfully are returned, which may be empty.
//!
//! A failed or timed-out store call is logged and the ladder moves on. Only
//! when every executed step failed does the search report
//! [`SearchError::StoreUnavailable`].

use crate::predicate::PredicateBuilder;
use crate::store::{PostingStore, StoreError, Window};
use crate::types::{Posting, SearchFilters};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Ladder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relaxation {
    AsParsed,
    DropExperience,
    DropCity,
    KeywordOnly,
    Unfiltered,
}

impl Relaxation {
    pub const LADDER: [Relaxation; 5] = [
        Relaxation::AsParsed,
        Relaxation::DropExperience,
        Relaxation::DropCity,
        Relaxation::KeywordOnly,
        Relaxation::Unfiltered,
    ];

    /// Whether this step runs for the parsed `filters`.
    pub fn applies_to(self, filters: &SearchFilters) -> bool {
        match self {
            Relaxation::AsParsed | Relaxation::Unfiltered => true,
            Relaxation::DropExperience => filters.experience().is_some(),
            Relaxation::DropCity => filters.city().is_some(),
            Relaxation::KeywordOnly => filters.keyword().is_some(),
        }
    }

    /// Filters this step queries with.
    pub fn relax(self, filters: &SearchFilters) -> SearchFilters {
        match self {
            Relaxation::AsParsed => filters.clone(),
            Relaxation::DropExperience => filters.without_experience(),
            Relaxation::DropCity => filters.without_city(),
            Relaxation::KeywordOnly => filters.keyword_only(),
            Relaxation::Unfiltered => SearchFilters::default(),
        }
    }
}

impl std::fmt::Display for Relaxation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relaxation::AsParsed => write!(f, "as-parsed"),
            Relaxation::DropExperience => write!(f, "drop-experience"),
            Relaxation::DropCity => write!(f, "drop-city"),
            Relaxation::KeywordOnly => write!(f, "keyword-only"),
            Relaxation::Unfiltered => write!(f, "unfiltered"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / outcome types
// ---------------------------------------------------------------------------

/// Zero-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    pub fn new(number: u64, size: u64) -> Self {
        Self { number, size }
    }

    pub fn window(self) -> Window {
        Window {
            offset: self.number.saturating_mul(self.size),
            limit: self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Rows(usize),
    Failed(String),
}

/// One executed ladder step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub step: Relaxation,
    pub status: AttemptStatus,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub postings: Vec<Posting>,
    /// Executed steps in ladder order.
    pub attempts: Vec<AttemptReport>,
    /// The step whose rows were returned.
    pub answered_by: Relaxation,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("every search attempt failed")]
    StoreUnavailable(#[source] StoreError),
    #[error("search cancelled")]
    Cancelled,
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

pub struct CascadeSearch {
    store: Arc<dyn PostingStore>,
    timeout: Duration,
}

impl CascadeSearch {
    pub fn new(store: Arc<dyn PostingStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn search(
        &self,
        filters: &SearchFilters,
        page: Page,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let window = page.window();
        let mut attempts = Vec::with_capacity(Relaxation::LADDER.len());
        let mut answer: Option<(Relaxation, Vec<Posting>)> = None;
        let mut last_error = None;

        for step in Relaxation::LADDER {
            if !step.applies_to(filters) {
                continue;
            }
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }

            let predicate = PredicateBuilder::build(&step.relax(filters));
            tracing::debug!(%step, predicate = %predicate.expression(), args = ?predicate.args(), "search attempt");

            let result = tokio::select! {
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                result = tokio::time::timeout(self.timeout, self.store.query(&predicate, window)) => {
                    result.unwrap_or(Err(StoreError::Timeout(self.timeout)))
                }
            };

            match result {
                Ok(rows) => {
                    attempts.push(AttemptReport {
                        step,
                        status: AttemptStatus::Rows(rows.len()),
                    });
                    let full = rows.len() as u64 == page.size;
                    answer = Some((step, rows));
                    if full {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(%step, error = %err, "search attempt failed");
                    attempts.push(AttemptReport {
                        step,
                        status: AttemptStatus::Failed(err.to_string()),
                    });
                    last_error = Some(err);
                }
            }
        }

        match answer {
            Some((answered_by, postings)) => Ok(SearchOutcome {
                postings,
                attempts,
                answered_by,
            }),
            None => Err(SearchError::StoreUnavailable(last_error.unwrap_or_else(|| {
                StoreError::Unavailable("no attempt executed".to_string())
            }))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

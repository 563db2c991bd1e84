//! HTTP surface — `GET /search` and `GET /healthz`.
//!
//! The handler parses the raw query, runs the cascade and serialises the page.
//! A cancellation token guarded by a `DropGuard` is tied to the handler
//! future: when the client disconnects axum drops the future, the guard
//! cancels the token, and no further store attempt starts.

use crate::app::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use vacancy_core::{Page, SearchError};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Query-string parameters. `page` stays a string so malformed values can
/// fall back to the first page instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

fn page_number(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.trim().parse::<u64>().ok()).unwrap_or(0)
}

pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(text) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing 'q' param").into_response();
    };
    let page = Page::new(page_number(params.page.as_deref()), state.page_size);

    let filters = state.parser.parse(text);
    tracing::info!(
        city = ?filters.city(),
        keyword = ?filters.keyword(),
        experience = ?filters.experience(),
        page = page.number,
        "parsed query"
    );

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match state.search.search(&filters, page, &cancel).await {
        Ok(outcome) => {
            tracing::info!(
                answered_by = %outcome.answered_by,
                attempts = outcome.attempts.len(),
                results = outcome.postings.len(),
                "search finished"
            );
            Json(outcome.postings).into_response()
        }
        Err(SearchError::StoreUnavailable(err)) => {
            tracing::error!(error = %err, "every search attempt failed");
            (StatusCode::SERVICE_UNAVAILABLE, "search backend unavailable").into_response()
        }
        Err(SearchError::Cancelled) => {
            tracing::debug!("search cancelled");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

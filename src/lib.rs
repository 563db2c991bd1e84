//! vacancy-search — natural-language job search service.
//!
//! This crate is the HTTP shell around [`vacancy_core`]: it wires the synonym
//! dictionary, the configured posting store and the cascade into an axum
//! router. Integration tests import [`api`] and [`app`] directly.
//!
//! # Architecture
//!
//! ```text
//! GET /search?q=…&page=N
//!        │
//!        ▼
//!   QueryParser ──► CascadeSearch ──► PostingStore (ClickHouse | memory)
//! ```

pub mod api;
pub mod app;

pub use app::AppState;

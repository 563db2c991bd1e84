//! vacancy-core — query interpretation and cascading relaxation search.
//!
//! This crate exposes the search pipeline layers as public modules, plus the
//! shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► QueryParser ──► SearchFilters ──► CascadeSearch ──► page of postings
//!                  │                                  │
//!          SynonymDictionary              PredicateBuilder ──► PostingStore
//! ```
//!
//! The dictionary and the parser tables are immutable after startup and shared
//! through `Arc`; the store is injected into [`cascade::CascadeSearch`] as an
//! `Arc<dyn PostingStore>`.

pub mod cascade;
pub mod config;
pub mod parser;
pub mod predicate;
pub mod store;
pub mod synonyms;
pub mod types;

pub use cascade::{CascadeSearch, Page, Relaxation, SearchError, SearchOutcome};
pub use parser::QueryParser;
pub use predicate::{Predicate, PredicateBuilder};
pub use store::{MemoryStore, PostingStore, StoreError, Window};
pub use synonyms::SynonymDictionary;
pub use types::{Experience, Posting, SearchFilters};

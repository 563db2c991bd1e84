//! Shared test utilities for vacancy-search integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Stores built here are deterministic: timestamps are
//! fixed offsets from a constant epoch, never `Utc::now()`.

pub mod assertions;
pub mod builders;
pub mod fake_clickhouse;
pub mod fake_store;
pub mod fixtures;

pub use builders::*;
pub use fake_store::*;
pub use fixtures::*;

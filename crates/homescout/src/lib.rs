//! Query layer for a housing recommendation and price projection service.
//!
//! Training happens offline; this crate loads the resulting artifacts (a
//! fitted TF-IDF vectorizer, its document-term matrix, a linear price
//! regression, and the listing table) into an immutable [`artifacts::ModelContext`]
//! and exposes three read-only operations over it: free-text similarity
//! ranking, structured criteria filtering, and compound price projection.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod query;
pub mod telemetry;

//! Fuzzy search over the staged system list.
//!
//! A [`Ranker`] scores every listed system against a query by the best edit
//! distance over its searchable fields and returns them best match first.
//! Fields whose normalized form has not been published yet are skipped, so
//! ranking works (with reduced recall) while the cache is still building.

mod metric;
mod ranker;

pub use metric::DistanceMetric;
pub use ranker::{Ranker, Ranking, SearchCandidate};

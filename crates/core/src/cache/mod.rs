//! Single-dataset caches for the dashboard resources.
//!
//! [`QuoteCache`] holds the last dataset of one resource and derives its
//! freshness from a [`RefreshGate`](crate::refresh::RefreshGate).
//! [`CachedResource`] adds refresh-or-reuse and collapses concurrent
//! refreshes into one fetch.

mod cached_resource;
mod quote_cache;

pub use cached_resource::CachedResource;
pub use quote_cache::{CachedDataset, QuoteCache};

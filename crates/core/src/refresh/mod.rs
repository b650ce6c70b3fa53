//! Refresh gating.
//!
//! A [`RefreshGate`] remembers when one logical dataset was last refreshed
//! and answers whether it is stale under its [`RefreshPolicy`]. Timestamps
//! live in a [`KeyValueStore`](crate::storage::KeyValueStore) so they survive
//! restarts.

mod refresh_gate;
mod refresh_model;

pub use refresh_gate::RefreshGate;
pub use refresh_model::RefreshPolicy;

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::refresh::RefreshGate;

/// A dataset and when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedDataset<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

struct Slot<T> {
    dataset: Option<CachedDataset<T>>,
    /// Bumped on every `set`; lets waiters notice a refresh they did not run.
    generation: u64,
}

/// The single active dataset of one resource.
pub struct QuoteCache<T> {
    slot: RwLock<Slot<T>>,
    gate: RefreshGate,
}

impl<T: Clone + Send + Sync> QuoteCache<T> {
    pub fn new(gate: RefreshGate) -> Self {
        Self {
            slot: RwLock::new(Slot {
                dataset: None,
                generation: 0,
            }),
            gate,
        }
    }

    pub fn gate(&self) -> &RefreshGate {
        &self.gate
    }

    pub async fn get(&self) -> Option<CachedDataset<T>> {
        self.slot.read().await.dataset.clone()
    }

    /// Replace the dataset and mark the gate refreshed.
    ///
    /// A gate that cannot persist only costs an early refresh later, so the
    /// dataset is stored regardless.
    pub async fn set(&self, data: T) {
        let fetched_at = match self.gate.mark_refreshed() {
            Ok(at) => at,
            Err(e) => {
                warn!("Could not persist refresh of '{}': {}", self.gate.key(), e);
                self.gate.now()
            }
        };

        let mut slot = self.slot.write().await;
        slot.dataset = Some(CachedDataset { data, fetched_at });
        slot.generation += 1;
    }

    /// Drop the dataset and the gate timestamp.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.dataset = None;
        if let Err(e) = self.gate.clear() {
            warn!("Could not clear refresh state '{}': {}", self.gate.key(), e);
        }
    }

    /// Stale when nothing is cached in this process or the gate says so.
    pub async fn is_stale(&self) -> bool {
        self.slot.read().await.dataset.is_none() || self.gate.is_stale()
    }

    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }
}

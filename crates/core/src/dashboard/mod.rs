//! Dashboard facade.
//!
//! The [`DashboardService`] owns one cached resource per dataset and is the
//! only thing the outer surfaces talk to:
//!
//! ```text
//! DashboardService → CachedResource (QuoteCache + RefreshGate) → generator / QuoteClient
//!        ↓
//! RecommendationSet, MarketIndex[], ChartPoint[], NewsArticle[]
//! ```
//!
//! - **Config** (`dashboard_config.rs`) - providers, relays, refresh policies, pacing
//! - **Traits** (`dashboard_traits.rs`) - the consumer operations
//! - **Service** (`dashboard_service.rs`) - caching, refresh and fallback wiring
//!
//! Consumer operations never fail. A failed refresh serves the previous
//! dataset, or an empty one before the first success.

mod dashboard_config;
mod dashboard_service;
mod dashboard_traits;

pub use dashboard_config::DashboardConfig;
pub use dashboard_service::DashboardService;
pub use dashboard_traits::{DashboardServiceTrait, ResourceStatus};

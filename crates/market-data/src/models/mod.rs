//! Market data models
//!
//! This module contains the core data types for quote fetching:
//! - `types` - Type aliases for common identifiers (ProviderId, ProviderSymbol)
//! - `instrument` - Instrument classification (InstrumentKind) and symbol normalization
//! - `quote` - Quote data structures (Quote, RawQuote)

mod instrument;
mod quote;
mod types;

pub use instrument::{normalize_symbol, InstrumentKind};
pub use quote::{Quote, RawQuote};
pub use types::{ProviderId, ProviderSymbol, SYNTHETIC_SOURCE};

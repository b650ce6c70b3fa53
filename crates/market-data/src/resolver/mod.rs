//! Symbol resolution for quote providers.
//!
//! This module provides the resolver chain that converts dashboard symbols
//! (e.g., `^GSPC`) to provider-specific symbols (e.g., `SPY` for Finnhub).
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ResolverChain                           │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. Override Resolver                                    │ │
//! │  │    - Explicit (provider, symbol) -> provider symbol     │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. Rules Resolver (deterministic)                       │ │
//! │  │    - Equities unchanged                                 │ │
//! │  │    - Indices native or mapped to tracking ETFs          │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A miss on every resolver yields `ResolutionFailed`, and the fetcher skips
//! that provider for the symbol.

mod chain;
mod override_resolver;
mod rules_resolver;
mod traits;

pub use chain::ResolverChain;
pub use override_resolver::OverrideResolver;
pub use rules_resolver::RulesResolver;
pub use traits::{ResolutionSource, ResolvedSymbol, Resolver, SymbolResolver};

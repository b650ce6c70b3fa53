//! Deterministic stand-in quotes for when no live source answers.
//!
//! The generator is the last tier of the quote fetcher. Everything it
//! produces is a pure function of `(symbol, date)`.

mod generator;
mod seed;

pub use generator::{base_price, SyntheticQuoteGenerator};
pub use seed::symbol_seed;

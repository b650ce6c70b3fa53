use std::borrow::Cow;
use std::sync::Arc;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Provider-specific symbol discovered at runtime
pub type ProviderSymbol = Arc<str>;

/// Source tag carried by quotes produced without any provider.
pub const SYNTHETIC_SOURCE: &str = "SYNTHETIC";

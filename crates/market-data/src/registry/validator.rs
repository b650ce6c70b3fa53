//! Quote sanity checks.
//!
//! Runs after normalization. Hard issues reject the quote and the fetcher
//! moves to the next tier; soft issues are logged and the quote is kept.

use log::warn;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Reject quote, try next tier.
    Hard,
    /// Accept quote but log a warning.
    Soft,
}

#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
}

/// Quote validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Prices above this are treated as garbage.
    pub max_price: f64,
    /// Daily moves beyond this percent are rejected.
    pub max_abs_change_percent: f64,
    /// Allowed gap between the reported percent and the one implied by the delta.
    pub percent_tolerance: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_price: 1_000_000_000.0,
            max_abs_change_percent: 90.0,
            percent_tolerance: 0.05,
        }
    }
}

/// Quote data validator.
pub struct QuoteValidator {
    config: ValidatorConfig,
}

impl QuoteValidator {
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Collect every issue with `quote`.
    pub fn inspect(&self, quote: &Quote) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let hard = |message: String| ValidationIssue {
            severity: ValidationSeverity::Hard,
            message,
        };

        if !quote.price.is_finite() || !quote.change.is_finite() || !quote.change_percent.is_finite()
        {
            issues.push(hard(format!(
                "Non-finite values: price={} change={} pct={}",
                quote.price, quote.change, quote.change_percent
            )));
            return issues;
        }

        if quote.price <= 0.0 {
            issues.push(hard(format!("Non-positive price: {}", quote.price)));
        }

        if quote.price > self.config.max_price {
            issues.push(hard(format!("Absurd price: {}", quote.price)));
        }

        if quote.change_percent.abs() > self.config.max_abs_change_percent {
            issues.push(hard(format!(
                "Implausible daily move: {:.2}%",
                quote.change_percent
            )));
        }

        let previous = quote.previous_close();
        if previous > 0.0 {
            let implied = quote.change / previous * 100.0;
            if (implied - quote.change_percent).abs() > self.config.percent_tolerance {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Soft,
                    message: format!(
                        "Reported change {:.4}% disagrees with implied {:.4}%",
                        quote.change_percent, implied
                    ),
                });
            }
        }

        issues
    }

    /// Validate a quote.
    ///
    /// Returns `ValidationFailed` on any hard issue; soft issues are logged.
    pub fn validate(&self, quote: &Quote) -> Result<(), MarketDataError> {
        let issues = self.inspect(quote);

        let hard: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Hard)
            .map(|i| i.message.as_str())
            .collect();
        if !hard.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: hard.join("; "),
            });
        }

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Soft) {
            warn!("Quote from {}: {}", quote.source, issue.message);
        }

        Ok(())
    }
}

impl Default for QuoteValidator {
    fn default() -> Self {
        Self::new()
    }
}

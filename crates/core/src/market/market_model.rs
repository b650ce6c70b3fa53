use serde::{Deserialize, Serialize};

use crate::quotes::Quote;

/// An index tracked on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Indices shown on the dashboard, in display order.
pub const MARKET_INDICES: &[IndexDescriptor] = &[
    IndexDescriptor {
        symbol: "^GSPC",
        name: "S&P 500",
    },
    IndexDescriptor {
        symbol: "^IXIC",
        name: "NASDAQ",
    },
    IndexDescriptor {
        symbol: "^DJI",
        name: "Dow Jones",
    },
];

/// Current level of a market index.
///
/// `change` is the percent move since the previous close;
/// `value - prev_value` is the absolute move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    pub prev_value: f64,
    pub change: f64,
}

impl MarketIndex {
    pub fn from_quote(descriptor: &IndexDescriptor, quote: &Quote) -> Self {
        Self {
            symbol: descriptor.symbol.to_string(),
            name: descriptor.name.to_string(),
            value: quote.price,
            prev_value: quote.previous_close(),
            change: quote.change_percent,
        }
    }
}

/// One month on the index chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Month label such as `Jan 2024`
    pub label: String,
    pub sp500: f64,
    pub nasdaq: f64,
    pub dowjones: f64,
}

/// Current levels the chart ends at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndexLevels {
    pub sp500: f64,
    pub nasdaq: f64,
    pub dowjones: f64,
}

impl IndexLevels {
    /// Picks the three chart series out of a list of indices.
    ///
    /// Returns `None` unless all three are present.
    pub fn from_indices(indices: &[MarketIndex]) -> Option<Self> {
        let value_of = |symbol: &str| {
            indices
                .iter()
                .find(|index| index.symbol == symbol)
                .map(|index| index.value)
        };
        Some(Self {
            sp500: value_of("^GSPC")?,
            nasdaq: value_of("^IXIC")?,
            dowjones: value_of("^DJI")?,
        })
    }
}

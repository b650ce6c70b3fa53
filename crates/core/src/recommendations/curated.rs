//! Curated recommendation lists.

use super::CuratedStock;

pub const BUY_LIST: &[CuratedStock] = &[
    CuratedStock {
        symbol: "AMD",
        name: "Advanced Micro Devices",
        is_retail_favorite: true,
        analysis: "AMD's MI300 AI accelerators are gaining significant retail investor interest as a diversification alternative to NVIDIA, with recent sentiment data showing growing support among retail traders.",
    },
    CuratedStock {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        is_retail_favorite: false,
        analysis: "Microsoft's deep integration of AI across its product suite and strong cloud growth via Azure positions it well for continued expansion. Retail traders are maintaining positions despite recent market volatility.",
    },
    CuratedStock {
        symbol: "COIN",
        name: "Coinbase Global Inc.",
        is_retail_favorite: true,
        analysis: "Coinbase is benefiting from increased cryptocurrency trading volume. Retail investors are showing renewed interest following pro-cryptocurrency political statements.",
    },
    CuratedStock {
        symbol: "AAPL",
        name: "Apple Inc.",
        is_retail_favorite: true,
        analysis: "Apple's resilience during market volatility aligns with current retail investor behavior of increasing cash allocation while maintaining positions in core tech holdings.",
    },
];

pub const SELL_LIST: &[CuratedStock] = &[
    CuratedStock {
        symbol: "WMT",
        name: "Walmart Inc.",
        is_retail_favorite: false,
        analysis: "Walmart faces headwinds as retail investors shift away from traditional retail amid changing consumer spending patterns, with sentiment data showing decreasing interest from individual investors.",
    },
    CuratedStock {
        symbol: "XOM",
        name: "Exxon Mobil Corporation",
        is_retail_favorite: false,
        analysis: "Exxon is seeing decreased retail investor interest as sentiment shifts toward renewable energy and tech sectors, with recent surveys showing retail traders reducing positions in traditional energy.",
    },
    CuratedStock {
        symbol: "AMC",
        name: "AMC Entertainment Holdings",
        is_retail_favorite: true,
        analysis: "While Reddit communities maintain 'diamond hands' rhetoric, recent data shows declining new positions in AMC as the market tests retail resolve during downturns.",
    },
    CuratedStock {
        symbol: "RIVN",
        name: "Rivian Automotive",
        is_retail_favorite: true,
        analysis: "Rivian continues to face cash burn challenges as retail investors become more selective with EV investments, reallocating to established tech companies with stronger balance sheets.",
    },
];

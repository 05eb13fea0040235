//! Per-asset lookup tables

/// Identifiers an asset is known by across the upstream APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetProfile {
    /// Ticker, e.g. "BTC"
    pub symbol: &'static str,
    /// Lower-case phrases that identify the asset's up/down markets
    pub question_patterns: &'static [&'static str],
    /// Exchange trading pair for candles
    pub exchange_pair: &'static str,
    /// Spot-price API identifier
    pub spot_id: &'static str,
}

const BTC: AssetProfile = AssetProfile {
    symbol: "BTC",
    question_patterns: &["bitcoin up or down"],
    exchange_pair: "BTCUSDT",
    spot_id: "bitcoin",
};

const ETH: AssetProfile = AssetProfile {
    symbol: "ETH",
    question_patterns: &["ethereum up or down"],
    exchange_pair: "ETHUSDT",
    spot_id: "ethereum",
};

const SOL: AssetProfile = AssetProfile {
    symbol: "SOL",
    question_patterns: &["solana up or down"],
    exchange_pair: "SOLUSDT",
    spot_id: "solana",
};

impl AssetProfile {
    /// Profile for a ticker; unknown tickers fall back to BTC
    pub fn for_symbol(symbol: &str) -> Self {
        match symbol.to_ascii_uppercase().as_str() {
            "ETH" => ETH,
            "SOL" => SOL,
            "BTC" => BTC,
            other => {
                tracing::warn!(asset = other, "Unknown asset, falling back to BTC profile");
                BTC
            }
        }
    }
}

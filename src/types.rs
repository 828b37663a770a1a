use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Signal classification computed by the backend analyzer.
///
/// Declaration order is strength order; `Ord` relies on it for the
/// signal-strength sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
    /// Anything else the backend emits; backend content is not validated
    /// here, so unexpected labels land in this bucket instead of failing
    /// the snapshot.
    #[serde(other)]
    Unknown,
}

impl Signal {
    /// Parse the wire spelling (`STRONG_BUY`, ...). Unknown strings are
    /// rejected here; only deserialization tolerates them.
    pub fn from_wire(s: &str) -> Option<Self> {
        Some(match s {
            "STRONG_BUY" => Self::StrongBuy,
            "BUY" => Self::Buy,
            "NEUTRAL" => Self::Neutral,
            "SELL" => Self::Sell,
            "STRONG_SELL" => Self::StrongSell,
            _ => return None,
        })
    }
}

/// One symbol's snapshot from the backend. Read-only here; replaced
/// wholesale on every poll, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub signal: Signal,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change_24h: f64,
    #[serde(default)]
    pub rsi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

/// Full symbol → entry mapping from one backend fetch. BTreeMap keeps
/// symbol iteration order stable (and is the default A-Z sort).
pub type MarketSnapshot = BTreeMap<String, MarketEntry>;

/// Wire wrapper around `GET /api/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPayload {
    pub data: MarketSnapshot,
}

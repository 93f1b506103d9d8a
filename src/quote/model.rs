use std::fmt;

use serde::{Deserialize, Serialize};

/// The market a security trades on.
///
/// Shanghai and Shenzhen share one wire layout (A-shares); the endpoint
/// itself cannot tell them apart, so the caller's choice is carried through
/// to the parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Shanghai Stock Exchange (A-share).
    Sh,
    /// Shenzhen Stock Exchange (A-share).
    Sz,
    /// Hong Kong Stock Exchange.
    Hk,
    /// United States exchanges.
    Us,
}

impl Market {
    /// The lookup prefix the quote endpoint expects in front of the code.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            Market::Sh => "sh",
            Market::Sz => "sz",
            Market::Hk => "r_hk",
            Market::Us => "s_us",
        }
    }

    /// The short market tag (`sh`, `sz`, `hk`, `us`).
    pub fn as_str(self) -> &'static str {
        match self {
            Market::Sh => "sh",
            Market::Sz => "sz",
            Market::Hk => "hk",
            Market::Us => "us",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One standing bid or ask at a given depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookLevel {
    pub price: f64,
    pub volume: u64,
}

/// Five-level order-book snapshot carried by A-share payloads.
///
/// Each side holds 0–5 levels in payload emission order (asks ask5→ask1,
/// bids bid1→bid5); levels whose price or volume field was blank are
/// omitted rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderBook {
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

/// A parsed Mainland China A-share quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AShareQuote {
    /// `Sh` or `Sz`, whichever the caller requested.
    pub market: Market,
    pub name: String,
    pub code: String,
    pub current_price: f64,
    pub yesterday_close: f64,
    pub open: f64,
    pub volume: f64,
    /// Volume traded at the ask (active buys).
    pub outside: f64,
    /// Volume traded at the bid (active sells).
    pub inside: f64,
    /// Quote timestamp as emitted by the endpoint (`yyyyMMddHHmmss`).
    pub datetime: String,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub amount: f64,
    pub turnover_rate: f64,
    pub pe_ttm: f64,
    pub amplitude: f64,
    pub total_market_cap: f64,
    pub float_market_cap: f64,
    pub volume_ratio: f64,
    pub avg_price: f64,
    pub pe_dynamic: f64,
    pub pe_static: f64,
    pub floating_shares: f64,
    pub total_shares: f64,
    pub currency: String,
    pub bid_ask: Option<OrderBook>,
}

/// A parsed Hong Kong quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HkQuote {
    /// Always `Hk`.
    pub market: Market,
    pub name: String,
    pub code: String,
    pub current_price: f64,
    pub yesterday_close: f64,
    pub open: f64,
    pub volume: f64,
    pub datetime: String,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub amount: f64,
    pub pe: f64,
    pub floating_shares: f64,
    pub total_shares: f64,
    pub currency: String,
}

/// A parsed United States quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsQuote {
    /// Always `Us`.
    pub market: Market,
    pub name: String,
    pub code: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub amount: f64,
    pub market_cap: f64,
    /// Always `"USD"` regardless of payload content.
    pub currency: String,
}

/// One parsed snapshot of a security's market data at fetch time.
///
/// A closed sum over the three wire layouts. The family is decided once,
/// at classification time, and never mixed; serialization is untagged, so
/// the inner record's `market` field acts as the discriminant in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StockQuote {
    AShare(AShareQuote),
    Hk(HkQuote),
    Us(UsQuote),
}

impl StockQuote {
    /// The market this quote was parsed for.
    pub fn market(&self) -> Market {
        match self {
            StockQuote::AShare(q) => q.market,
            StockQuote::Hk(q) => q.market,
            StockQuote::Us(q) => q.market,
        }
    }

    /// The security code shared by all three families.
    pub fn code(&self) -> &str {
        match self {
            StockQuote::AShare(q) => &q.code,
            StockQuote::Hk(q) => &q.code,
            StockQuote::Us(q) => &q.code,
        }
    }

    /// The security name shared by all three families.
    pub fn name(&self) -> &str {
        match self {
            StockQuote::AShare(q) => &q.name,
            StockQuote::Hk(q) => &q.name,
            StockQuote::Us(q) => &q.name,
        }
    }

    /// The last traded price shared by all three families.
    pub fn current_price(&self) -> f64 {
        match self {
            StockQuote::AShare(q) => q.current_price,
            StockQuote::Hk(q) => q.current_price,
            StockQuote::Us(q) => q.current_price,
        }
    }
}

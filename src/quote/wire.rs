//! Raw-format knowledge for the quote endpoint.
//!
//! The endpoint answers with a single JS-style assignment,
//! `v_sh600000="<fields>"`, whose quoted payload is a position-dependent,
//! tilde-delimited record. Everything that knows about field positions
//! lives here.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::QtError;
use crate::quote::model::{
    AShareQuote, BookLevel, HkQuote, Market, OrderBook, StockQuote, UsQuote,
};

/// No layout carries fewer than this many fields; shorter payloads are rejected
/// before any market-specific parser runs.
const MIN_FIELDS: usize = 10;

/* ----------------- field index tables -----------------
 *
 * Fixed positions are the de facto wire contract with an unversioned
 * upstream. Kept as consts so a format revision is a single-point change.
 */

mod a_idx {
    pub const MARKET_CODE: usize = 0;
    pub const NAME: usize = 1;
    pub const CODE: usize = 2;
    pub const CURRENT_PRICE: usize = 3;
    pub const YESTERDAY_CLOSE: usize = 4;
    pub const OPEN: usize = 5;
    pub const VOLUME: usize = 6;
    pub const OUTSIDE: usize = 7;
    pub const INSIDE: usize = 8;
    /// Ask price/volume pairs occupy 9..=18 (ask5 first), bids 19..=28 (bid1 first).
    pub const ASK_FIRST: usize = 9;
    pub const ASK_LAST: usize = 18;
    pub const BID_FIRST: usize = 19;
    pub const BID_LAST: usize = 28;
    pub const DATETIME: usize = 30;
    pub const CHANGE: usize = 31;
    pub const CHANGE_PERCENT: usize = 32;
    pub const HIGH: usize = 33;
    pub const LOW: usize = 34;
    pub const AMOUNT: usize = 37;
    pub const TURNOVER_RATE: usize = 38;
    pub const PE_TTM: usize = 39;
    pub const AMPLITUDE: usize = 43;
    pub const TOTAL_MARKET_CAP: usize = 44;
    pub const FLOAT_MARKET_CAP: usize = 45;
    pub const VOLUME_RATIO: usize = 49;
    pub const AVG_PRICE: usize = 51;
    pub const PE_DYNAMIC: usize = 52;
    pub const PE_STATIC: usize = 53;
    pub const FLOATING_SHARES: usize = 72;
    pub const TOTAL_SHARES: usize = 73;
    pub const CURRENCY: usize = 82;
}

mod hk_idx {
    pub const NAME: usize = 1;
    pub const CODE: usize = 2;
    pub const CURRENT_PRICE: usize = 3;
    pub const YESTERDAY_CLOSE: usize = 4;
    pub const OPEN: usize = 5;
    pub const VOLUME: usize = 6;
    pub const DATETIME: usize = 30;
    pub const CHANGE: usize = 31;
    pub const CHANGE_PERCENT: usize = 32;
    pub const HIGH: usize = 33;
    pub const LOW: usize = 34;
    pub const AMOUNT: usize = 37;
    pub const PE: usize = 39;
    pub const FLOATING_SHARES: usize = 69;
    pub const TOTAL_SHARES: usize = 70;
    pub const CURRENCY: usize = 75;
}

mod us_idx {
    pub const NAME: usize = 1;
    pub const CODE: usize = 2;
    pub const CURRENT_PRICE: usize = 3;
    pub const CHANGE: usize = 4;
    pub const CHANGE_PERCENT: usize = 5;
    pub const VOLUME: usize = 6;
    pub const AMOUNT: usize = 7;
    pub const MARKET_CAP: usize = 8;
}

/// Embedded market-type codes seen at field 0.
const MARKET_CODE_SH: i64 = 1;
const MARKET_CODE_SZ: i64 = 51;
const MARKET_CODE_HK: i64 = 100;
const MARKET_CODE_US: i64 = 200;

/* ----------------- envelope ----------------- */

/// The single quoted assignment embedded in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    /// Market-prefixed code, e.g. `sh600000` or `s_usAAPL`.
    pub key: String,
    /// The tilde-delimited payload between the quotes.
    pub data: String,
}

static ENVELOPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"v_(sh|sz|r_hk|s_us)([A-Za-z0-9._]+)="([^"]+)""#).expect("envelope regex")
});

/// Extract the quote assignment from the response body.
///
/// Anything outside the `v_<prefix><code>="..."` pattern is not inspected;
/// `None` means the endpoint returned nothing usable for the key.
pub fn extract_envelope(body: &str) -> Option<RawQuote> {
    let caps = ENVELOPE_RE.captures(body)?;
    Some(RawQuote {
        key: format!("{}{}", &caps[1], &caps[2]),
        data: caps[3].to_string(),
    })
}

/* ----------------- field decoder ----------------- */

/// Positional view over one tilde-delimited record.
///
/// Empty fields are preserved so indices stay aligned with the wire
/// contract; out-of-range access reads as an empty field.
struct Fields<'a> {
    raw: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(payload: &'a str) -> Result<Self, QtError> {
        let raw: Vec<&str> = payload.split('~').collect();
        if raw.len() < MIN_FIELDS {
            return Err(QtError::TooFewFields);
        }
        Ok(Self { raw })
    }

    fn field(&self, idx: usize) -> &'a str {
        self.raw.get(idx).copied().unwrap_or("")
    }

    fn number(&self, idx: usize) -> f64 {
        self.number_or(idx, 0.0)
    }

    /// Parse field `idx` as a float, falling back to `default` when the
    /// field is empty, absent, or not a number. Never panics.
    fn number_or(&self, idx: usize, default: f64) -> f64 {
        let val = self.field(idx);
        if val.is_empty() {
            return default;
        }
        val.parse().unwrap_or(default)
    }
}

/* ----------------- classification + parsing ----------------- */

/// Parse one raw tilde-delimited payload into a typed quote.
///
/// `hint` is the market the caller asked for and is authoritative when
/// present; without it, the embedded market-type code at field 0 is used
/// as a fallback (1/51 → A-share, 100 → HK, 200 → US). The wire format
/// cannot distinguish Shanghai from Shenzhen, so the fallback defaults to
/// Shanghai.
///
/// # Errors
///
/// Returns [`QtError::TooFewFields`] for payloads under the minimum field
/// count and [`QtError::UnknownMarket`] when neither the hint nor the
/// embedded code identifies a market family.
pub fn parse_quote(payload: &str, hint: Option<Market>) -> Result<StockQuote, QtError> {
    let fields = Fields::split(payload)?;

    match hint {
        Some(m @ (Market::Sh | Market::Sz)) => Ok(parse_a_share(&fields, m)),
        Some(Market::Hk) => Ok(parse_hk(&fields)),
        Some(Market::Us) => Ok(parse_us(&fields)),
        None => {
            let raw_code = fields.field(a_idx::MARKET_CODE);
            match raw_code.parse::<i64>() {
                Ok(MARKET_CODE_SH | MARKET_CODE_SZ) => Ok(parse_a_share(&fields, Market::Sh)),
                Ok(MARKET_CODE_HK) => Ok(parse_hk(&fields)),
                Ok(MARKET_CODE_US) => Ok(parse_us(&fields)),
                _ => Err(QtError::UnknownMarket(raw_code.to_string())),
            }
        }
    }
}

fn parse_a_share(fields: &Fields<'_>, market: Market) -> StockQuote {
    let currency = fields.field(a_idx::CURRENCY);

    StockQuote::AShare(AShareQuote {
        market,
        name: fields.field(a_idx::NAME).to_string(),
        code: fields.field(a_idx::CODE).to_string(),
        current_price: fields.number(a_idx::CURRENT_PRICE),
        yesterday_close: fields.number(a_idx::YESTERDAY_CLOSE),
        open: fields.number(a_idx::OPEN),
        volume: fields.number(a_idx::VOLUME),
        outside: fields.number(a_idx::OUTSIDE),
        inside: fields.number(a_idx::INSIDE),
        datetime: fields.field(a_idx::DATETIME).to_string(),
        change: fields.number(a_idx::CHANGE),
        change_percent: fields.number(a_idx::CHANGE_PERCENT),
        high: fields.number(a_idx::HIGH),
        low: fields.number(a_idx::LOW),
        amount: fields.number(a_idx::AMOUNT),
        turnover_rate: fields.number(a_idx::TURNOVER_RATE),
        pe_ttm: fields.number(a_idx::PE_TTM),
        amplitude: fields.number(a_idx::AMPLITUDE),
        total_market_cap: fields.number(a_idx::TOTAL_MARKET_CAP),
        float_market_cap: fields.number(a_idx::FLOAT_MARKET_CAP),
        volume_ratio: fields.number(a_idx::VOLUME_RATIO),
        avg_price: fields.number(a_idx::AVG_PRICE),
        pe_dynamic: fields.number(a_idx::PE_DYNAMIC),
        pe_static: fields.number(a_idx::PE_STATIC),
        floating_shares: fields.number(a_idx::FLOATING_SHARES),
        total_shares: fields.number(a_idx::TOTAL_SHARES),
        currency: if currency.is_empty() {
            "CNY".to_string()
        } else {
            currency.to_string()
        },
        bid_ask: Some(OrderBook {
            asks: book_side(fields, a_idx::ASK_FIRST, a_idx::ASK_LAST),
            bids: book_side(fields, a_idx::BID_FIRST, a_idx::BID_LAST),
        }),
    })
}

/// Collect (price, volume) pairs from `first..=last`, stepping by 2.
///
/// A pair contributes a level only when both sub-fields are non-empty and
/// parse; sequence order follows the payload and is not re-sorted.
fn book_side(fields: &Fields<'_>, first: usize, last: usize) -> Vec<BookLevel> {
    let mut side = Vec::new();
    let mut i = first;
    while i < last {
        let price = fields.field(i);
        let volume = fields.field(i + 1);
        if !price.is_empty()
            && !volume.is_empty()
            && let (Ok(price), Ok(volume)) = (price.parse::<f64>(), volume.parse::<u64>())
        {
            side.push(BookLevel { price, volume });
        }
        i += 2;
    }
    side
}

fn parse_hk(fields: &Fields<'_>) -> StockQuote {
    let currency = fields.field(hk_idx::CURRENCY);

    StockQuote::Hk(HkQuote {
        market: Market::Hk,
        name: fields.field(hk_idx::NAME).to_string(),
        code: fields.field(hk_idx::CODE).to_string(),
        current_price: fields.number(hk_idx::CURRENT_PRICE),
        yesterday_close: fields.number(hk_idx::YESTERDAY_CLOSE),
        open: fields.number(hk_idx::OPEN),
        volume: fields.number(hk_idx::VOLUME),
        datetime: fields.field(hk_idx::DATETIME).to_string(),
        change: fields.number(hk_idx::CHANGE),
        change_percent: fields.number(hk_idx::CHANGE_PERCENT),
        high: fields.number(hk_idx::HIGH),
        low: fields.number(hk_idx::LOW),
        amount: fields.number(hk_idx::AMOUNT),
        pe: fields.number(hk_idx::PE),
        floating_shares: fields.number(hk_idx::FLOATING_SHARES),
        total_shares: fields.number(hk_idx::TOTAL_SHARES),
        currency: if currency.is_empty() {
            "HKD".to_string()
        } else {
            currency.to_string()
        },
    })
}

fn parse_us(fields: &Fields<'_>) -> StockQuote {
    StockQuote::Us(UsQuote {
        market: Market::Us,
        name: fields.field(us_idx::NAME).to_string(),
        code: fields.field(us_idx::CODE).to_string(),
        current_price: fields.number(us_idx::CURRENT_PRICE),
        change: fields.number(us_idx::CHANGE),
        change_percent: fields.number(us_idx::CHANGE_PERCENT),
        volume: fields.number(us_idx::VOLUME),
        amount: fields.number(us_idx::AMOUNT),
        market_cap: fields.number(us_idx::MARKET_CAP),
        currency: "USD".to_string(),
    })
}

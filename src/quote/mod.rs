//! Real-time quote retrieval and wire-format parsing.
//!
//! The endpoint returns one JS-style assignment per request whose quoted
//! payload is a position-dependent, tilde-delimited record; the layout
//! differs per market family (A-share, Hong Kong, United States). `api`
//! drives the network round trip, `wire` owns every field position, and
//! `model` holds the typed records handed back to callers.

mod api;
mod model;
mod wire;

pub use api::{fetch_quote, fetch_quotes};
pub use model::{AShareQuote, BookLevel, HkQuote, Market, OrderBook, StockQuote, UsQuote};
pub use wire::{RawQuote, extract_envelope, parse_quote};

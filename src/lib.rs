//! qtquote-rs: Rust client for Tencent's `qt.gtimg.cn` real-time quote endpoint.
//!
//! Fetches and parses the endpoint's tilde-delimited wire format into typed
//! quote records for three market families (Mainland China A-shares, Hong
//! Kong, United States), keeps simple flat-file portfolio and watchlist
//! stores, and exposes the whole surface as a fixed catalog of agent tools.
//!
//! ```no_run
//! use qtquote_rs::{Market, QtClient, quote};
//!
//! # async fn run() -> Result<(), qtquote_rs::QtError> {
//! let client = QtClient::builder().build()?;
//! let q = quote::fetch_quote(&client, "600000", Market::Sh).await?;
//! println!("{} last traded at {}", q.name(), q.current_price());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod quote;
pub mod store;
pub mod tools;

pub use self::core::{QtClient, QtClientBuilder, QtError};
pub use quote::{
    AShareQuote, BookLevel, HkQuote, Market, OrderBook, RawQuote, StockQuote, UsQuote,
};
pub use store::{
    NewPosition, Position, PositionStore, PositionUpdate, WatchItem, WatchStore, WatchUpdate,
};
pub use tools::{ToolResponse, ToolRouter, ToolSchema, catalog};

use tracing::warn;

use crate::core::{QtClient, QtError};
use crate::quote::model::{Market, StockQuote};
use crate::quote::wire;

/// Fetch one real-time quote.
///
/// Builds the market-prefixed lookup key, issues a single GET against the
/// quote endpoint, extracts the quoted assignment from the text body, and
/// parses it with the requested market as the classification hint.
///
/// # Errors
///
/// Returns [`QtError::Status`] for a non-success HTTP status,
/// [`QtError::NoData`] when the body carries no quote assignment, and the
/// wire layer's errors for malformed payloads.
pub async fn fetch_quote(
    client: &QtClient,
    code: &str,
    market: Market,
) -> Result<StockQuote, QtError> {
    let key = format!("{}{}", market.prefix(), code);

    let mut url = client.base_quote().clone();
    url.query_pairs_mut().append_pair("q", &key);

    let resp = client.http().get(url.clone()).send().await?;
    if !resp.status().is_success() {
        return Err(QtError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    let raw = wire::extract_envelope(&body).ok_or_else(|| QtError::NoData(key.clone()))?;

    wire::parse_quote(&raw.data, Some(market))
}

/// Fetch quotes for several securities, isolating per-item failures.
///
/// Items are fetched sequentially in input order. A failed item is logged
/// and omitted from the result; the call itself never fails, and the
/// returned quotes preserve the input order of the items that succeeded.
pub async fn fetch_quotes(client: &QtClient, items: &[(String, Market)]) -> Vec<StockQuote> {
    let mut out = Vec::with_capacity(items.len());
    for (code, market) in items {
        match fetch_quote(client, code, *market).await {
            Ok(quote) => out.push(quote),
            Err(e) => {
                warn!(code = %code, market = %market, error = %e, "failed to fetch quote");
            }
        }
    }
    out
}

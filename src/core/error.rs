use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum QtError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The quote endpoint returned an unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The response body contained no quote assignment for the requested key.
    #[error("no data returned for {0}")]
    NoData(String),

    /// The delimited payload decoded to fewer fields than any market format carries.
    #[error("invalid stock data: too few fields")]
    TooFewFields,

    /// The payload carried no recognizable market-type code and no market was requested.
    #[error("unknown market type: {0}")]
    UnknownMarket(String),

    /// A store collection or tool payload failed to (de)serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A store file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `WatchStore::add` was called for a (code, market) pair already present.
    #[error("stock already in watch list")]
    AlreadyWatched,

    /// A tool operation targeted a record that does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Tool arguments failed to parse or validate.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// A tool call named an operation outside the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

//! Agent-facing tool catalog and dispatcher.
//!
//! The catalog is a fixed list of named operations with declared JSON input
//! schemas; the router parses arguments, runs the matching quote or store
//! operation, and always answers with a textual payload: successful calls
//! carry pretty-printed JSON, failures carry an error-flagged message.
//! Protocol framing (stdio, JSON-RPC, …) is the caller's concern.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::core::{QtClient, QtError};
use crate::quote::{self, Market};
use crate::store::{NewPosition, PositionStore, PositionUpdate, WatchStore, WatchUpdate};

/// Declared surface of one tool.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the tool's arguments.
    pub parameters: Value,
}

/// Outcome of a tool call.
///
/// Errors are surfaced in-band: `is_error` flags the text as a failure
/// message rather than raising a protocol-level fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

fn market_prop() -> Value {
    json!({
        "type": "string",
        "enum": ["sh", "sz", "hk", "us"],
        "description": "Market: sh=Shanghai, sz=Shenzhen, hk=Hong Kong, us=United States"
    })
}

fn code_prop() -> Value {
    json!({ "type": "string", "description": "Security code, e.g. 000858" })
}

fn key_params() -> Value {
    json!({
        "type": "object",
        "properties": { "code": code_prop(), "market": market_prop() },
        "required": ["code", "market"]
    })
}

/// The fixed tool catalog.
pub fn catalog() -> Vec<ToolSchema> {
    vec![
        ToolSchema {
            name: "stock_get",
            description: "Fetch the real-time quote for a single security",
            parameters: key_params(),
        },
        ToolSchema {
            name: "stock_get_batch",
            description: "Fetch real-time quotes for several securities at once",
            parameters: json!({
                "type": "object",
                "properties": {
                    "stocks": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": { "code": code_prop(), "market": market_prop() },
                            "required": ["code", "market"]
                        },
                        "minItems": 1,
                        "description": "Securities to fetch"
                    }
                },
                "required": ["stocks"]
            }),
        },
        ToolSchema {
            name: "position_add",
            description: "Record a new holding",
            parameters: json!({
                "type": "object",
                "properties": {
                    "code": code_prop(),
                    "name": { "type": "string", "description": "Security name" },
                    "quantity": { "type": "number", "description": "Quantity held" },
                    "costPrice": { "type": "number", "description": "Cost per share" },
                    "currency": { "type": "string", "description": "Currency unit, e.g. CNY, HKD, USD" },
                    "market": market_prop()
                },
                "required": ["code", "name", "quantity", "costPrice", "currency", "market"]
            }),
        },
        ToolSchema {
            name: "position_update",
            description: "Update a holding's quantity or cost price",
            parameters: json!({
                "type": "object",
                "properties": {
                    "code": code_prop(),
                    "market": market_prop(),
                    "quantity": { "type": "number", "description": "Quantity held" },
                    "costPrice": { "type": "number", "description": "Cost per share" }
                },
                "required": ["code", "market"]
            }),
        },
        ToolSchema {
            name: "position_remove",
            description: "Delete a holding",
            parameters: key_params(),
        },
        ToolSchema {
            name: "position_list",
            description: "List all holdings",
            parameters: json!({ "type": "object", "properties": {} }),
        },
        ToolSchema {
            name: "position_get",
            description: "Fetch a single holding",
            parameters: key_params(),
        },
        ToolSchema {
            name: "watch_add",
            description: "Add a security to the watch list",
            parameters: json!({
                "type": "object",
                "properties": {
                    "code": code_prop(),
                    "name": { "type": "string", "description": "Security name" },
                    "reason": { "type": "string", "description": "Why the security is being watched, or a target" },
                    "market": market_prop()
                },
                "required": ["code", "name", "reason", "market"]
            }),
        },
        ToolSchema {
            name: "watch_update",
            description: "Update a watched security's name or reason",
            parameters: json!({
                "type": "object",
                "properties": {
                    "code": code_prop(),
                    "market": market_prop(),
                    "name": { "type": "string", "description": "Security name" },
                    "reason": { "type": "string", "description": "Why the security is being watched, or a target" }
                },
                "required": ["code", "market"]
            }),
        },
        ToolSchema {
            name: "watch_remove",
            description: "Remove a security from the watch list",
            parameters: key_params(),
        },
        ToolSchema {
            name: "watch_list",
            description: "List all watched securities",
            parameters: json!({ "type": "object", "properties": {} }),
        },
        ToolSchema {
            name: "watch_get",
            description: "Fetch a single watched security",
            parameters: key_params(),
        },
    ]
}

/* ----------------- argument shapes ----------------- */

#[derive(Deserialize)]
struct KeyArgs {
    code: String,
    market: Market,
}

#[derive(Deserialize)]
struct BatchArgs {
    stocks: Vec<KeyArgs>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionUpdateArgs {
    code: String,
    market: Market,
    quantity: Option<f64>,
    cost_price: Option<f64>,
}

#[derive(Deserialize)]
struct WatchAddArgs {
    code: String,
    name: String,
    reason: String,
    market: Market,
}

#[derive(Deserialize)]
struct WatchUpdateArgs {
    code: String,
    market: Market,
    name: Option<String>,
    reason: Option<String>,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, QtError> {
    serde_json::from_value(args).map_err(|e| QtError::InvalidArgs(e.to_string()))
}

fn require_positive(value: f64, what: &str) -> Result<(), QtError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(QtError::InvalidArgs(format!("{what} must be positive")))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, QtError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/* ----------------- router ----------------- */

/// Dispatches catalog operations against a client and the two stores.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    client: QtClient,
    positions: PositionStore,
    watch: WatchStore,
}

impl ToolRouter {
    pub fn new(client: QtClient, positions: PositionStore, watch: WatchStore) -> Self {
        Self {
            client,
            positions,
            watch,
        }
    }

    /// Execute one tool call.
    ///
    /// Every error reaching the router (unknown name, bad arguments, fetch
    /// or store failure) is converted into an error-flagged response; this
    /// method itself never fails.
    pub async fn call(&self, name: &str, args: Value) -> ToolResponse {
        match self.dispatch(name, args).await {
            Ok(text) => ToolResponse {
                text,
                is_error: false,
            },
            Err(e) => ToolResponse {
                text: format!("Error: {e}"),
                is_error: true,
            },
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<String, QtError> {
        match name {
            "stock_get" => {
                let a: KeyArgs = parse_args(args)?;
                let quote = quote::fetch_quote(&self.client, &a.code, a.market).await?;
                to_json(&quote)
            }
            "stock_get_batch" => {
                let a: BatchArgs = parse_args(args)?;
                if a.stocks.is_empty() {
                    return Err(QtError::InvalidArgs("stocks must not be empty".into()));
                }
                let items: Vec<(String, Market)> =
                    a.stocks.into_iter().map(|s| (s.code, s.market)).collect();
                let quotes = quote::fetch_quotes(&self.client, &items).await;
                to_json(&quotes)
            }
            "position_add" => {
                let a: NewPosition = parse_args(args)?;
                require_positive(a.quantity, "quantity")?;
                require_positive(a.cost_price, "costPrice")?;
                to_json(&self.positions.add(a)?)
            }
            "position_update" => {
                let a: PositionUpdateArgs = parse_args(args)?;
                if let Some(q) = a.quantity {
                    require_positive(q, "quantity")?;
                }
                if let Some(c) = a.cost_price {
                    require_positive(c, "costPrice")?;
                }
                let update = PositionUpdate {
                    quantity: a.quantity,
                    cost_price: a.cost_price,
                };
                let updated = self
                    .positions
                    .update(&a.code, a.market, update)?
                    .ok_or(QtError::NotFound("position"))?;
                to_json(&updated)
            }
            "position_remove" => {
                let a: KeyArgs = parse_args(args)?;
                if !self.positions.remove(&a.code, a.market)? {
                    return Err(QtError::NotFound("position"));
                }
                to_json(&json!({ "success": true }))
            }
            "position_list" => to_json(&self.positions.list()),
            "position_get" => {
                let a: KeyArgs = parse_args(args)?;
                let position = self
                    .positions
                    .get(&a.code, a.market)
                    .ok_or(QtError::NotFound("position"))?;
                to_json(&position)
            }
            "watch_add" => {
                let a: WatchAddArgs = parse_args(args)?;
                to_json(&self.watch.add(a.code, a.name, a.reason, a.market)?)
            }
            "watch_update" => {
                let a: WatchUpdateArgs = parse_args(args)?;
                let update = WatchUpdate {
                    name: a.name,
                    reason: a.reason,
                };
                let updated = self
                    .watch
                    .update(&a.code, a.market, update)?
                    .ok_or(QtError::NotFound("watch item"))?;
                to_json(&updated)
            }
            "watch_remove" => {
                let a: KeyArgs = parse_args(args)?;
                if !self.watch.remove(&a.code, a.market)? {
                    return Err(QtError::NotFound("watch item"));
                }
                to_json(&json!({ "success": true }))
            }
            "watch_list" => to_json(&self.watch.list()),
            "watch_get" => {
                let a: KeyArgs = parse_args(args)?;
                let item = self
                    .watch
                    .get(&a.code, a.market)
                    .ok_or(QtError::NotFound("watch item"))?;
                to_json(&item)
            }
            other => Err(QtError::UnknownTool(other.to_string())),
        }
    }
}

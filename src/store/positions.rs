use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::QtError;
use crate::quote::Market;
use crate::store::{load_collection, save_collection};

/// Default file name, resolved against the process working directory.
const DEFAULT_FILE: &str = "positions.json";

/// One holding lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub code: String,
    pub name: String,
    pub quantity: f64,
    pub cost_price: f64,
    pub currency: String,
    pub market: Market,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`PositionStore::add`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub code: String,
    pub name: String,
    pub quantity: f64,
    pub cost_price: f64,
    pub currency: String,
    pub market: Market,
}

/// Partial update for [`PositionStore::update`]; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub quantity: Option<f64>,
    pub cost_price: Option<f64>,
}

/// Flat-file store of holdings, keyed by `(code, market)` for lookups.
///
/// `add` does not enforce key uniqueness: several lots of the same security
/// may coexist, and `update`/`remove`/`get` then operate on the first match.
/// (The watch store, by contrast, rejects duplicates.)
#[derive(Debug, Clone)]
pub struct PositionStore {
    path: PathBuf,
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl PositionStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a new holding and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the collection cannot be written back.
    pub fn add(&self, new: NewPosition) -> Result<Position, QtError> {
        let mut positions: Vec<Position> = load_collection(&self.path);
        let now = Utc::now();

        let position = Position {
            code: new.code,
            name: new.name,
            quantity: new.quantity,
            cost_price: new.cost_price,
            currency: new.currency,
            market: new.market,
            created_at: now,
            updated_at: now,
        };

        positions.push(position.clone());
        save_collection(&self.path, &positions)?;

        Ok(position)
    }

    /// Apply a partial update to the first matching holding, refreshing
    /// `updated_at`. Returns `None` (and leaves the file untouched) when no
    /// holding matches.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the collection cannot be written back.
    pub fn update(
        &self,
        code: &str,
        market: Market,
        update: PositionUpdate,
    ) -> Result<Option<Position>, QtError> {
        let mut positions: Vec<Position> = load_collection(&self.path);

        let Some(position) = positions
            .iter_mut()
            .find(|p| p.code == code && p.market == market)
        else {
            return Ok(None);
        };

        if let Some(quantity) = update.quantity {
            position.quantity = quantity;
        }
        if let Some(cost_price) = update.cost_price {
            position.cost_price = cost_price;
        }
        position.updated_at = Utc::now();
        let updated = position.clone();

        save_collection(&self.path, &positions)?;
        Ok(Some(updated))
    }

    /// Remove the first matching holding. Returns `false` when none matches.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the collection cannot be written back.
    pub fn remove(&self, code: &str, market: Market) -> Result<bool, QtError> {
        let mut positions: Vec<Position> = load_collection(&self.path);

        let Some(idx) = positions
            .iter()
            .position(|p| p.code == code && p.market == market)
        else {
            return Ok(false);
        };

        positions.remove(idx);
        save_collection(&self.path, &positions)?;
        Ok(true)
    }

    /// All holdings, in insertion order.
    pub fn list(&self) -> Vec<Position> {
        load_collection(&self.path)
    }

    /// The first holding matching `(code, market)`, if any.
    pub fn get(&self, code: &str, market: Market) -> Option<Position> {
        self.list()
            .into_iter()
            .find(|p| p.code == code && p.market == market)
    }
}

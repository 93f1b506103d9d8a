use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::QtError;
use crate::quote::Market;
use crate::store::{load_collection, save_collection};

/// Default file name, resolved against the process working directory.
const DEFAULT_FILE: &str = "watch.json";

/// One watched security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchItem {
    pub code: String,
    pub name: String,
    /// Why the security is being watched, or the target the watcher set.
    pub reason: String,
    pub market: Market,
    pub created_at: DateTime<Utc>,
}

/// Partial update for [`WatchStore::update`]; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchUpdate {
    pub name: Option<String>,
    pub reason: Option<String>,
}

/// Flat-file watch list, keyed by `(code, market)`.
///
/// Unlike the position store, `add` rejects a key that is already present.
#[derive(Debug, Clone)]
pub struct WatchStore {
    path: PathBuf,
}

impl Default for WatchStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl WatchStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a security to the watch list.
    ///
    /// # Errors
    ///
    /// Returns [`QtError::AlreadyWatched`] when `(code, market)` is already
    /// present, or `QtError` if the collection cannot be written back.
    pub fn add(
        &self,
        code: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
        market: Market,
    ) -> Result<WatchItem, QtError> {
        let code = code.into();
        let mut items: Vec<WatchItem> = load_collection(&self.path);

        if items.iter().any(|w| w.code == code && w.market == market) {
            return Err(QtError::AlreadyWatched);
        }

        let item = WatchItem {
            code,
            name: name.into(),
            reason: reason.into(),
            market,
            created_at: Utc::now(),
        };

        items.push(item.clone());
        save_collection(&self.path, &items)?;

        Ok(item)
    }

    /// Apply a partial update to the matching item. `created_at` is never
    /// refreshed. Returns `None` (file untouched) when no item matches.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the collection cannot be written back.
    pub fn update(
        &self,
        code: &str,
        market: Market,
        update: WatchUpdate,
    ) -> Result<Option<WatchItem>, QtError> {
        let mut items: Vec<WatchItem> = load_collection(&self.path);

        let Some(item) = items
            .iter_mut()
            .find(|w| w.code == code && w.market == market)
        else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(reason) = update.reason {
            item.reason = reason;
        }
        let updated = item.clone();

        save_collection(&self.path, &items)?;
        Ok(Some(updated))
    }

    /// Remove the matching item. Returns `false` when none matches.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the collection cannot be written back.
    pub fn remove(&self, code: &str, market: Market) -> Result<bool, QtError> {
        let mut items: Vec<WatchItem> = load_collection(&self.path);

        let Some(idx) = items
            .iter()
            .position(|w| w.code == code && w.market == market)
        else {
            return Ok(false);
        };

        items.remove(idx);
        save_collection(&self.path, &items)?;
        Ok(true)
    }

    /// All watched securities, in insertion order.
    pub fn list(&self) -> Vec<WatchItem> {
        load_collection(&self.path)
    }

    /// The watched security matching `(code, market)`, if any.
    pub fn get(&self, code: &str, market: Market) -> Option<WatchItem> {
        self.list()
            .into_iter()
            .find(|w| w.code == code && w.market == market)
    }
}

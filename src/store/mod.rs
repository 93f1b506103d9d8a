//! Flat-JSON persistence for positions and watch items.
//!
//! Both stores follow the same discipline: every mutation loads the whole
//! collection, edits it in memory, and rewrites the whole file. There is no
//! incremental writing and no cross-call state beyond the file itself.

mod positions;
mod watch;

pub use positions::{NewPosition, Position, PositionStore, PositionUpdate};
pub use watch::{WatchItem, WatchStore, WatchUpdate};

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::QtError;

/// Read a whole collection from disk.
///
/// A missing file is an empty collection; an unreadable or corrupt file is
/// logged and also treated as empty, so loads never fail.
fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read store file");
            return Vec::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse store file");
            Vec::new()
        }
    }
}

/// Rewrite a whole collection to disk, pretty-printed.
fn save_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), QtError> {
    let data = serde_json::to_string_pretty(items)?;
    fs::write(path, data)?;
    Ok(())
}

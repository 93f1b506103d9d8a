//! Core components of the `qtquote-rs` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`QtClient`] and its builder.
//! - The primary [`QtError`] type.

/// The main client (`QtClient`), builder, and endpoint constants.
pub mod client;
/// The primary error type (`QtError`) for the crate.
pub mod error;

// convenient re-exports so most code can just `use crate::core::QtClient`
pub use client::{QtClient, QtClientBuilder};
pub use error::QtError;

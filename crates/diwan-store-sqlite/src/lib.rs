//! SQLite backend for the diwan entity store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Records are stored as JSON
//! documents in a single table keyed by `(collection, id)`.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteBackend;

#[cfg(test)]
mod tests;

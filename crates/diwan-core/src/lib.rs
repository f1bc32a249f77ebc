//! Core types and the entity store for diwan.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It defines the domain entities, the [`backend::Backend`] trait the
//! store writes through to, and the [`EntityStore`] itself; concrete
//! backends live in sibling crates (e.g. `diwan-store-sqlite`).

pub mod activity;
pub mod backend;
pub mod correspondence;
pub mod employee;
pub mod error;
pub mod ids;
pub mod memory;
pub mod merge;
pub mod org;
pub mod settings;
pub mod stats;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use store::EntityStore;

//! # apotheca core
//!
//! Indexed inventory and customer catalog for a small pharmacy.
//!
//! This crate provides:
//! - A persistent record store for items, customers and suppliers
//! - A height-balanced by-id index and a case-insensitive by-name index
//!   per entity kind
//! - The [`IndexedCatalog`] façade that keeps indexes and store consistent
//!   by eager full rebuild after every mutation

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod entity;
pub mod error;
pub mod index;
pub mod store;
pub mod types;

pub use catalog::IndexedCatalog;
pub use entity::{Customer, Item, Supplier};
pub use error::{CoreError, CoreResult};
pub use index::{AvlIndex, BstIndex, EntityIndexSet, IndexedRecord, NameKey};
pub use store::{FileStore, MemoryStore, RecordStore};
pub use types::{CustomerId, ItemId, SupplierId};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

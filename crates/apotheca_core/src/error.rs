//! Error types for apotheca core.

use crate::types::{CustomerId, ItemId};
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in apotheca core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CBOR encoding error while saving the store file.
    #[error("encode error: {0}")]
    Encode(#[from] ciborium::ser::Error<io::Error>),

    /// CBOR decoding error while loading the store file.
    #[error("decode error: {0}")]
    Decode(#[from] ciborium::de::Error<io::Error>),

    /// Store file is held by another process.
    #[error("store locked: another process has exclusive access")]
    StoreLocked,

    /// Store file exists but is not in a recognized format.
    #[error("invalid store format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Item not found in the record store.
    #[error("item not found: {id}")]
    ItemNotFound {
        /// The item id that was not found.
        id: ItemId,
    },

    /// Customer not found in the record store.
    #[error("customer not found: {id}")]
    CustomerNotFound {
        /// The customer id that was not found.
        id: CustomerId,
    },

    /// Insert of an item whose id is already present.
    #[error("duplicate item id: {id}")]
    DuplicateItem {
        /// The conflicting item id.
        id: ItemId,
    },

    /// Insert of a customer whose id is already present.
    #[error("duplicate customer id: {id}")]
    DuplicateCustomer {
        /// The conflicting customer id.
        id: CustomerId,
    },

    /// A sale asked for more units than are in stock.
    #[error("insufficient stock for item {id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The item being sold.
        id: ItemId,
        /// Units requested.
        requested: u32,
        /// Units available.
        available: u32,
    },

    /// A top-up would push an item's stock past the representable maximum.
    #[error("stock overflow for item {id}: {current} units held, {added} more requested")]
    StockOverflow {
        /// The item being topped up.
        id: ItemId,
        /// Units already in stock.
        current: u32,
        /// Units the top-up asked to add.
        added: u32,
    },
}

impl CoreError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an item not found error.
    #[must_use]
    pub fn item_not_found(id: ItemId) -> Self {
        Self::ItemNotFound { id }
    }

    /// Creates a customer not found error.
    #[must_use]
    pub fn customer_not_found(id: CustomerId) -> Self {
        Self::CustomerNotFound { id }
    }
}

//! Business entities: inventory items, customers, suppliers.
//!
//! Entities are plain serde-serializable records. The record store owns the
//! authoritative copies; the index layer never holds an entity directly, only
//! its id (see [`crate::index::IndexedRecord`]).

use crate::index::IndexedRecord;
use crate::types::{CustomerId, ItemId, SupplierId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inventory item (one stocked product line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id, assigned at registration.
    pub id: ItemId,
    /// Display name. Name lookups are case-insensitive.
    pub name: String,
    /// Batch number printed on the packaging.
    pub batch: String,
    /// Units currently in stock.
    pub quantity: u32,
    /// Expiry date of the current batch.
    pub expiry: NaiveDate,
    /// Supplier the batch was bought from.
    pub supplier: String,
    /// Manufacturer of the product.
    pub manufacturer: String,
}

impl IndexedRecord for Item {
    type Key = ItemId;

    fn record_key(&self) -> ItemId {
        self.id
    }

    fn record_name(&self) -> &str {
        &self.name
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer id.
    pub id: CustomerId,
    /// Display name. Name lookups are case-insensitive.
    pub name: String,
    /// Contact details (phone or email, free-form).
    pub contact: String,
}

impl IndexedRecord for Customer {
    type Key = CustomerId;

    fn record_key(&self) -> CustomerId {
        self.id
    }

    fn record_name(&self) -> &str {
        &self.name
    }
}

/// A supplier the pharmacy buys from.
///
/// Suppliers are a read-mostly directory; they are not indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique supplier id.
    pub id: SupplierId,
    /// Display name.
    pub name: String,
    /// Contact details.
    pub contact: String,
}

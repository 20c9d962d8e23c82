//! The persistent record store.
//!
//! The store owns the authoritative entity records; the index layer is
//! rebuilt from store snapshots and never outlives them logically. Two
//! backends share one document model:
//!
//! - [`MemoryStore`]: ephemeral, for tests and throwaway runs
//! - [`FileStore`]: durable single-file CBOR store with an advisory lock

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::entity::{Customer, Item, Supplier};
use crate::error::{CoreError, CoreResult};
use crate::types::{CustomerId, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable CRUD surface consumed by the index layer and the catalog.
///
/// Snapshot reads (`items`, `customers`) return entities in the store's
/// natural (insertion) order; no sorting is implied.
pub trait RecordStore {
    /// Returns a snapshot of all items.
    fn items(&self) -> CoreResult<Vec<Item>>;

    /// Fetches a single item by id.
    fn item_by_id(&self, id: ItemId) -> CoreResult<Option<Item>>;

    /// Durably inserts a new item. Fails on a duplicate id.
    fn insert_item(&mut self, item: Item) -> CoreResult<()>;

    /// Durably replaces an existing item. Fails if the id is unknown.
    fn update_item(&mut self, item: Item) -> CoreResult<()>;

    /// Returns a snapshot of all customers.
    fn customers(&self) -> CoreResult<Vec<Customer>>;

    /// Fetches a single customer by id.
    fn customer_by_id(&self, id: CustomerId) -> CoreResult<Option<Customer>>;

    /// Durably inserts a new customer. Fails on a duplicate id.
    fn insert_customer(&mut self, customer: Customer) -> CoreResult<()>;

    /// Durably replaces an existing customer. Fails if the id is unknown.
    fn update_customer(&mut self, customer: Customer) -> CoreResult<()>;

    /// Durably appends a line to a customer's ordered purchase history.
    fn append_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()>;

    /// Returns a customer's purchase history, oldest first.
    fn purchases(&self, id: CustomerId) -> CoreResult<Vec<String>>;

    /// Returns a snapshot of all suppliers.
    fn suppliers(&self) -> CoreResult<Vec<Supplier>>;

    /// Durably inserts a new supplier.
    fn insert_supplier(&mut self, supplier: Supplier) -> CoreResult<()>;
}

/// Current on-disk document format version.
pub(crate) const FORMAT_VERSION: u16 = 1;

/// The whole store as one serializable document.
///
/// Both backends operate on this document; [`FileStore`] additionally
/// persists it after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoreDocument {
    pub version: u16,
    pub items: Vec<Item>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub purchases: BTreeMap<CustomerId, Vec<String>>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            items: Vec::new(),
            customers: Vec::new(),
            suppliers: Vec::new(),
            purchases: BTreeMap::new(),
        }
    }
}

impl StoreDocument {
    pub fn item_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn insert_item(&mut self, item: Item) -> CoreResult<()> {
        if self.item_by_id(item.id).is_some() {
            return Err(CoreError::DuplicateItem { id: item.id });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn update_item(&mut self, item: Item) -> CoreResult<()> {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(CoreError::item_not_found(item.id)),
        }
    }

    pub fn customer_by_id(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn insert_customer(&mut self, customer: Customer) -> CoreResult<()> {
        if self.customer_by_id(customer.id).is_some() {
            return Err(CoreError::DuplicateCustomer { id: customer.id });
        }
        self.customers.push(customer);
        Ok(())
    }

    pub fn update_customer(&mut self, customer: Customer) -> CoreResult<()> {
        match self
            .customers
            .iter_mut()
            .find(|existing| existing.id == customer.id)
        {
            Some(slot) => {
                *slot = customer;
                Ok(())
            }
            None => Err(CoreError::customer_not_found(customer.id)),
        }
    }

    pub fn append_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()> {
        if self.customer_by_id(id).is_none() {
            return Err(CoreError::customer_not_found(id));
        }
        self.purchases.entry(id).or_default().push(line.to_string());
        Ok(())
    }

    pub fn purchases(&self, id: CustomerId) -> Vec<String> {
        self.purchases.get(&id).cloned().unwrap_or_default()
    }
}

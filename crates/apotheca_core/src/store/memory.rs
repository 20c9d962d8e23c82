//! In-memory record store for tests and ephemeral runs.

use crate::entity::{Customer, Item, Supplier};
use crate::error::CoreResult;
use crate::store::{RecordStore, StoreDocument};
use crate::types::{CustomerId, ItemId};

/// An in-memory record store.
///
/// Nothing is persisted; dropping the store drops the data. Suitable for
/// unit and integration tests, and for running the catalog against fixture
/// data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: StoreDocument,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with items and customers.
    #[must_use]
    pub fn with_records(items: Vec<Item>, customers: Vec<Customer>) -> Self {
        Self {
            doc: StoreDocument {
                items,
                customers,
                ..StoreDocument::default()
            },
        }
    }
}

impl RecordStore for MemoryStore {
    fn items(&self) -> CoreResult<Vec<Item>> {
        Ok(self.doc.items.clone())
    }

    fn item_by_id(&self, id: ItemId) -> CoreResult<Option<Item>> {
        Ok(self.doc.item_by_id(id).cloned())
    }

    fn insert_item(&mut self, item: Item) -> CoreResult<()> {
        self.doc.insert_item(item)
    }

    fn update_item(&mut self, item: Item) -> CoreResult<()> {
        self.doc.update_item(item)
    }

    fn customers(&self) -> CoreResult<Vec<Customer>> {
        Ok(self.doc.customers.clone())
    }

    fn customer_by_id(&self, id: CustomerId) -> CoreResult<Option<Customer>> {
        Ok(self.doc.customer_by_id(id).cloned())
    }

    fn insert_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.doc.insert_customer(customer)
    }

    fn update_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.doc.update_customer(customer)
    }

    fn append_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()> {
        self.doc.append_purchase(id, line)
    }

    fn purchases(&self, id: CustomerId) -> CoreResult<Vec<String>> {
        Ok(self.doc.purchases(id))
    }

    fn suppliers(&self) -> CoreResult<Vec<Supplier>> {
        Ok(self.doc.suppliers.clone())
    }

    fn insert_supplier(&mut self, supplier: Supplier) -> CoreResult<()> {
        self.doc.suppliers.push(supplier);
        Ok(())
    }
}

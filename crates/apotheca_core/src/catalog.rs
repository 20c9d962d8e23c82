//! The indexed catalog façade.

use crate::entity::{Customer, Item, Supplier};
use crate::error::{CoreError, CoreResult};
use crate::index::EntityIndexSet;
use crate::store::RecordStore;
use crate::types::{CustomerId, ItemId};
use chrono::NaiveDate;

/// Fast lookup façade over the record store.
///
/// Owns the store plus one [`EntityIndexSet`] per entity kind (items,
/// customers) and keeps them synchronized by eager full rebuild: every
/// mutating operation durably applies to the store and then rebuilds both
/// index sets from fresh snapshots before returning. Incremental index
/// maintenance (and therefore tree deletion) is deliberately not attempted;
/// entity counts are small and a full rebuild is well within interactive
/// latency.
///
/// Execution is single-threaded and synchronous: at most one logical
/// operation runs at a time, and [`refresh`](Self::refresh) blocks until the
/// rebuild completes. No operation can observe a partially rebuilt state —
/// replacement sets are built off to the side and swapped in whole.
///
/// # Example
///
/// ```rust,ignore
/// let mut catalog = IndexedCatalog::open(MemoryStore::new())?;
/// catalog.add_item(item)?;
/// let found = catalog.find_item_by_name("amox")?;
/// ```
pub struct IndexedCatalog<S: RecordStore> {
    store: S,
    items: EntityIndexSet<Item>,
    customers: EntityIndexSet<Customer>,
}

impl<S: RecordStore> IndexedCatalog<S> {
    /// Opens a catalog over a record store, building both index sets.
    ///
    /// Fails if the initial snapshot reads fail.
    pub fn open(store: S) -> CoreResult<Self> {
        let items = EntityIndexSet::build(&store.items()?);
        let customers = EntityIndexSet::build(&store.customers()?);
        Ok(Self {
            store,
            items,
            customers,
        })
    }

    /// Rebuilds both index sets from fresh store snapshots.
    ///
    /// Replacement sets are fully built before either is swapped in. If a
    /// snapshot read fails, the error propagates and the previous sets —
    /// stale but internally consistent — keep serving lookups.
    pub fn refresh(&mut self) -> CoreResult<()> {
        let item_snapshot = self.store.items()?;
        let customer_snapshot = self.store.customers()?;

        self.items = EntityIndexSet::build(&item_snapshot);
        self.customers = EntityIndexSet::build(&customer_snapshot);

        tracing::debug!(
            items = item_snapshot.len(),
            customers = customer_snapshot.len(),
            "catalog refreshed"
        );
        Ok(())
    }

    // Lookups. An index hit re-fetches the authoritative record from the
    // store, so callers always see the store's current fields.

    /// Finds an item by id. `Ok(None)` on miss.
    pub fn find_item_by_id(&self, id: ItemId) -> CoreResult<Option<Item>> {
        match self.items.lookup_id(id) {
            Some(key) => self.store.item_by_id(key),
            None => Ok(None),
        }
    }

    /// Finds an item by case-insensitive name.
    ///
    /// On duplicate names, the first-registered item wins.
    pub fn find_item_by_name(&self, name: &str) -> CoreResult<Option<Item>> {
        match self.items.lookup_name(name) {
            Some(key) => self.store.item_by_id(key),
            None => Ok(None),
        }
    }

    /// Finds a customer by id. `Ok(None)` on miss.
    pub fn find_customer_by_id(&self, id: CustomerId) -> CoreResult<Option<Customer>> {
        match self.customers.lookup_id(id) {
            Some(key) => self.store.customer_by_id(key),
            None => Ok(None),
        }
    }

    /// Finds a customer by case-insensitive name.
    pub fn find_customer_by_name(&self, name: &str) -> CoreResult<Option<Customer>> {
        match self.customers.lookup_name(name) {
            Some(key) => self.store.customer_by_id(key),
            None => Ok(None),
        }
    }

    // Mutations. Each writes through to the store, then eagerly rebuilds.

    /// Adds an item to the inventory.
    ///
    /// If the id is already registered, the incoming quantity is added to
    /// the existing stock and the remaining fields are left as they were.
    /// A top-up that would exceed `u32::MAX` units is rejected with
    /// [`CoreError::StockOverflow`] and leaves the stock unchanged.
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        match self.store.item_by_id(item.id)? {
            Some(mut existing) => {
                existing.quantity = existing.quantity.checked_add(item.quantity).ok_or(
                    CoreError::StockOverflow {
                        id: item.id,
                        current: existing.quantity,
                        added: item.quantity,
                    },
                )?;
                self.store.update_item(existing)?;
            }
            None => self.store.insert_item(item)?,
        }
        self.refresh()
    }

    /// Replaces an item's record wholesale.
    pub fn update_item(&mut self, item: Item) -> CoreResult<()> {
        self.store.update_item(item)?;
        self.refresh()
    }

    /// Sells `quantity` units of an item, decrementing stock.
    ///
    /// Returns the item as it stands after the sale.
    pub fn sell_item(&mut self, id: ItemId, quantity: u32) -> CoreResult<Item> {
        let mut item = self
            .store
            .item_by_id(id)?
            .ok_or(CoreError::ItemNotFound { id })?;
        if item.quantity < quantity {
            return Err(CoreError::InsufficientStock {
                id,
                requested: quantity,
                available: item.quantity,
            });
        }
        item.quantity -= quantity;
        self.store.update_item(item.clone())?;
        self.refresh()?;
        Ok(item)
    }

    /// Registers a new customer.
    pub fn register_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.store.insert_customer(customer)?;
        self.refresh()
    }

    /// Appends a line to a customer's purchase history.
    pub fn record_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()> {
        self.store.append_purchase(id, line)?;
        self.refresh()
    }

    /// Sells an item (looked up by name) to a registered customer and
    /// records the sale in the customer's purchase history.
    ///
    /// Returns the item as it stands after the sale.
    pub fn record_sale(
        &mut self,
        customer_id: CustomerId,
        item_name: &str,
        quantity: u32,
        on: NaiveDate,
    ) -> CoreResult<Item> {
        let customer = self
            .find_customer_by_id(customer_id)?
            .ok_or(CoreError::CustomerNotFound { id: customer_id })?;
        let item = self
            .find_item_by_name(item_name)?
            .ok_or_else(|| CoreError::invalid_format(format!("no item named {item_name:?}")))?;

        let sold = self.sell_item(item.id, quantity)?;
        let line = format!("Purchased {quantity} units of {} on {on}", sold.name);
        self.record_purchase(customer.id, &line)?;
        Ok(sold)
    }

    // Snapshot reads for display and reports.

    /// Returns all items in store order.
    pub fn items(&self) -> CoreResult<Vec<Item>> {
        self.store.items()
    }

    /// Returns all customers in store order.
    pub fn customers(&self) -> CoreResult<Vec<Customer>> {
        self.store.customers()
    }

    /// Returns all suppliers in store order.
    pub fn suppliers(&self) -> CoreResult<Vec<Supplier>> {
        self.store.suppliers()
    }

    /// Adds a supplier to the directory.
    pub fn add_supplier(&mut self, supplier: Supplier) -> CoreResult<()> {
        self.store.insert_supplier(supplier)
    }

    /// Returns a customer's purchase history, oldest first.
    pub fn purchase_history(&self, id: CustomerId) -> CoreResult<Vec<String>> {
        self.store.purchases(id)
    }

    /// Items with stock strictly below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> CoreResult<Vec<Item>> {
        Ok(self
            .store
            .items()?
            .into_iter()
            .filter(|item| item.quantity < threshold)
            .collect())
    }

    /// Items whose expiry date is on or before `cutoff`.
    pub fn expiring_by(&self, cutoff: NaiveDate) -> CoreResult<Vec<Item>> {
        Ok(self
            .store
            .items()?
            .into_iter()
            .filter(|item| item.expiry <= cutoff)
            .collect())
    }

    /// Shared access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    ///
    /// Any mutation applied through this escape hatch must be followed by
    /// [`refresh`](Self::refresh) before the next lookup.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Number of indexed items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of indexed customers.
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }
}

impl<S: RecordStore> std::fmt::Debug for IndexedCatalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedCatalog")
            .field("items", &self.items)
            .field("customers", &self.customers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn item(id: u32, name: &str, quantity: u32) -> Item {
        Item {
            id: ItemId::new(id),
            name: name.to_string(),
            batch: "B-001".to_string(),
            quantity,
            expiry: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            supplier: "HealthPlus".to_string(),
            manufacturer: "Generix".to_string(),
        }
    }

    fn customer(id: u32, name: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: name.to_string(),
            contact: "555-0100".to_string(),
        }
    }

    fn catalog_with_items(items: Vec<Item>) -> IndexedCatalog<MemoryStore> {
        IndexedCatalog::open(MemoryStore::with_records(items, Vec::new())).unwrap()
    }

    #[test]
    fn open_indexes_existing_records() {
        let catalog = catalog_with_items(vec![item(30, "Zinc", 5), item(10, "Amox", 9)]);
        assert_eq!(catalog.item_count(), 2);
        let found = catalog.find_item_by_id(ItemId::new(10)).unwrap().unwrap();
        assert_eq!(found.name, "Amox");
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let catalog = catalog_with_items(vec![item(1, "Zinc", 5), item(2, "Amox", 9)]);
        let found = catalog.find_item_by_name("AMOX").unwrap().unwrap();
        assert_eq!(found.id, ItemId::new(2));
    }

    #[test]
    fn duplicate_names_resolve_to_first_registered() {
        let catalog = catalog_with_items(vec![
            item(1, "Zinc", 5),
            item(2, "Amox", 9),
            item(3, "amox", 4),
        ]);
        let found = catalog.find_item_by_name("AMOX").unwrap().unwrap();
        assert_eq!(found.id, ItemId::new(2));
    }

    #[test]
    fn miss_is_not_an_error() {
        let catalog = catalog_with_items(vec![item(1, "Zinc", 5)]);
        assert!(catalog.find_item_by_id(ItemId::new(404)).unwrap().is_none());
        assert!(catalog.find_item_by_name("Ghost").unwrap().is_none());
        assert!(catalog
            .find_customer_by_id(CustomerId::new(404))
            .unwrap()
            .is_none());
    }

    #[test]
    fn add_item_indexes_immediately() {
        let mut catalog = catalog_with_items(Vec::new());
        catalog.add_item(item(7, "Ibuprofen", 20)).unwrap();
        assert_eq!(catalog.item_count(), 1);
        assert!(catalog.find_item_by_name("ibuprofen").unwrap().is_some());
    }

    #[test]
    fn add_item_with_known_id_merges_quantity() {
        let mut catalog = catalog_with_items(vec![item(7, "Ibuprofen", 20)]);
        catalog.add_item(item(7, "Ibuprofen", 15)).unwrap();

        let found = catalog.find_item_by_id(ItemId::new(7)).unwrap().unwrap();
        assert_eq!(found.quantity, 35);
        assert_eq!(catalog.item_count(), 1);
    }

    #[test]
    fn top_up_past_max_stock_is_rejected() {
        let mut catalog = catalog_with_items(vec![item(7, "Ibuprofen", u32::MAX - 1)]);
        let result = catalog.add_item(item(7, "Ibuprofen", 5));
        assert!(matches!(
            result,
            Err(CoreError::StockOverflow {
                current,
                added: 5,
                ..
            }) if current == u32::MAX - 1
        ));

        // Stock unchanged.
        let found = catalog.find_item_by_id(ItemId::new(7)).unwrap().unwrap();
        assert_eq!(found.quantity, u32::MAX - 1);
    }

    #[test]
    fn external_mutation_visible_after_refresh() {
        let mut catalog = catalog_with_items(vec![
            item(1, "Amox", 10),
            item(2, "Zinc", 20),
            item(3, "Ibuprofen", 30),
            item(4, "Aspirin", 40),
            item(5, "Paracetamol", 50),
        ]);

        // Mutate the store behind the catalog's back, then refresh.
        let mut changed = item(3, "Ibuprofen", 3);
        changed.batch = "B-777".to_string();
        catalog.store_mut().update_item(changed).unwrap();
        catalog.refresh().unwrap();

        let found = catalog.find_item_by_id(ItemId::new(3)).unwrap().unwrap();
        assert_eq!(found.quantity, 3);
        assert_eq!(found.batch, "B-777");
    }

    #[test]
    fn sell_item_decrements_stock() {
        let mut catalog = catalog_with_items(vec![item(1, "Amox", 10)]);
        let after = catalog.sell_item(ItemId::new(1), 4).unwrap();
        assert_eq!(after.quantity, 6);

        let found = catalog.find_item_by_id(ItemId::new(1)).unwrap().unwrap();
        assert_eq!(found.quantity, 6);
    }

    #[test]
    fn oversell_is_rejected() {
        let mut catalog = catalog_with_items(vec![item(1, "Amox", 3)]);
        let result = catalog.sell_item(ItemId::new(1), 4);
        assert!(matches!(result, Err(CoreError::InsufficientStock { .. })));

        // Stock unchanged.
        let found = catalog.find_item_by_id(ItemId::new(1)).unwrap().unwrap();
        assert_eq!(found.quantity, 3);
    }

    #[test]
    fn record_sale_updates_stock_and_history() {
        let mut catalog = IndexedCatalog::open(MemoryStore::with_records(
            vec![item(1, "Amox", 10)],
            vec![customer(5, "Dana")],
        ))
        .unwrap();

        let on = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let sold = catalog
            .record_sale(CustomerId::new(5), "amox", 2, on)
            .unwrap();
        assert_eq!(sold.quantity, 8);

        let history = catalog.purchase_history(CustomerId::new(5)).unwrap();
        assert_eq!(history, vec!["Purchased 2 units of Amox on 2026-03-14".to_string()]);
    }

    #[test]
    fn register_customer_then_find_by_name() {
        let mut catalog = catalog_with_items(Vec::new());
        catalog.register_customer(customer(9, "Morgan")).unwrap();

        let found = catalog.find_customer_by_name("MORGAN").unwrap().unwrap();
        assert_eq!(found.id, CustomerId::new(9));
    }

    #[test]
    fn low_stock_and_expiry_reports() {
        let mut near_expiry = item(2, "Zinc", 50);
        near_expiry.expiry = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let catalog = catalog_with_items(vec![item(1, "Amox", 2), near_expiry]);

        let low = catalog.low_stock(5).unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, ItemId::new(1));

        let cutoff = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        let expiring = catalog.expiring_by(cutoff).unwrap();
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, ItemId::new(2));
    }
}

//! End-to-end scenarios exercising the catalog through its public surface.

use apotheca_core::{
    AvlIndex, CoreError, CoreResult, Customer, CustomerId, IndexedCatalog, Item, ItemId,
    MemoryStore, RecordStore, Supplier,
};
use chrono::NaiveDate;

fn item(id: u32, name: &str, quantity: u32) -> Item {
    Item {
        id: ItemId::new(id),
        name: name.to_string(),
        batch: format!("B-{id:04}"),
        quantity,
        expiry: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
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

/// A store wrapper whose snapshot reads can be made to fail, for exercising
/// the refresh-failure path.
struct FlakyStore {
    inner: MemoryStore,
    fail_snapshots: bool,
}

impl FlakyStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_snapshots: false,
        }
    }

    fn snapshot_error() -> CoreError {
        CoreError::Io(std::io::Error::other("simulated snapshot failure"))
    }
}

impl RecordStore for FlakyStore {
    fn items(&self) -> CoreResult<Vec<Item>> {
        if self.fail_snapshots {
            return Err(Self::snapshot_error());
        }
        self.inner.items()
    }

    fn item_by_id(&self, id: ItemId) -> CoreResult<Option<Item>> {
        self.inner.item_by_id(id)
    }

    fn insert_item(&mut self, item: Item) -> CoreResult<()> {
        self.inner.insert_item(item)
    }

    fn update_item(&mut self, item: Item) -> CoreResult<()> {
        self.inner.update_item(item)
    }

    fn customers(&self) -> CoreResult<Vec<Customer>> {
        if self.fail_snapshots {
            return Err(Self::snapshot_error());
        }
        self.inner.customers()
    }

    fn customer_by_id(&self, id: CustomerId) -> CoreResult<Option<Customer>> {
        self.inner.customer_by_id(id)
    }

    fn insert_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.inner.insert_customer(customer)
    }

    fn update_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.inner.update_customer(customer)
    }

    fn append_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()> {
        self.inner.append_purchase(id, line)
    }

    fn purchases(&self, id: CustomerId) -> CoreResult<Vec<String>> {
        self.inner.purchases(id)
    }

    fn suppliers(&self) -> CoreResult<Vec<Supplier>> {
        self.inner.suppliers()
    }

    fn insert_supplier(&mut self, supplier: Supplier) -> CoreResult<()> {
        self.inner.insert_supplier(supplier)
    }
}

#[test]
fn balanced_index_handles_ten_thousand_inserts() {
    let mut index = AvlIndex::new();
    for key in 0u32..10_000 {
        index.insert(key, key);
    }
    assert_eq!(index.len(), 10_000);

    let bound = (1.5 * 10_001f64.log2() + 2.0) as u32;
    assert!(index.height() <= bound, "height {}", index.height());

    assert_eq!(index.get(&0), Some(&0));
    assert_eq!(index.get(&9_999), Some(&9_999));
    assert_eq!(index.get(&10_000), None);
}

#[test]
fn case_insensitive_name_search_finds_first_registered() {
    let catalog = IndexedCatalog::open(MemoryStore::with_records(
        vec![item(1, "Zinc", 5), item(2, "Amox", 9), item(3, "amox", 4)],
        Vec::new(),
    ))
    .unwrap();

    let found = catalog.find_item_by_name("AMOX").unwrap().unwrap();
    assert_eq!(found.id, ItemId::new(2));
    assert_eq!(found.name, "Amox");
}

#[test]
fn refresh_reflects_external_store_mutation() {
    let snapshot: Vec<Item> = (1..=5).map(|i| item(i, &format!("Item{i}"), i * 10)).collect();
    let mut catalog = IndexedCatalog::open(MemoryStore::with_records(snapshot, Vec::new())).unwrap();

    catalog.store_mut().update_item(item(4, "Item4", 1)).unwrap();
    catalog.refresh().unwrap();

    let found = catalog.find_item_by_id(ItemId::new(4)).unwrap().unwrap();
    assert_eq!(found.quantity, 1);
}

#[test]
fn unknown_id_lookup_is_a_clean_miss() {
    let catalog =
        IndexedCatalog::open(MemoryStore::with_records(vec![item(1, "Amox", 5)], Vec::new()))
            .unwrap();
    assert!(catalog.find_item_by_id(ItemId::new(12345)).unwrap().is_none());
}

#[test]
fn failed_refresh_keeps_previous_indexes_serving() {
    let mut inner = MemoryStore::new();
    inner.insert_item(item(1, "Amox", 10)).unwrap();
    inner.insert_customer(customer(5, "Dana")).unwrap();

    let mut catalog = IndexedCatalog::open(FlakyStore::new(inner)).unwrap();

    // A new item lands in the store, but the following refresh fails.
    catalog.store_mut().insert_item(item(2, "Zinc", 7)).unwrap();
    catalog.store_mut().fail_snapshots = true;
    assert!(catalog.refresh().is_err());

    // The stale indexes still serve: the old item resolves, the new one is
    // invisible, and nothing panics.
    assert!(catalog.find_item_by_id(ItemId::new(1)).unwrap().is_some());
    assert!(catalog.find_item_by_id(ItemId::new(2)).unwrap().is_none());
    assert!(catalog.find_customer_by_name("dana").unwrap().is_some());

    // Once snapshots work again, refresh catches up.
    catalog.store_mut().fail_snapshots = false;
    catalog.refresh().unwrap();
    assert!(catalog.find_item_by_id(ItemId::new(2)).unwrap().is_some());
}

#[test]
fn full_sale_flow() {
    let mut catalog = IndexedCatalog::open(MemoryStore::new()).unwrap();
    catalog.add_item(item(1, "Amoxicillin", 30)).unwrap();
    catalog.register_customer(customer(7, "Robin")).unwrap();

    let on = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let sold = catalog
        .record_sale(CustomerId::new(7), "amoxicillin", 3, on)
        .unwrap();
    assert_eq!(sold.quantity, 27);

    let history = catalog.purchase_history(CustomerId::new(7)).unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].contains("3 units of Amoxicillin"));

    // Selling to an unknown customer is an error, not a crash.
    let missing = catalog.record_sale(CustomerId::new(99), "amoxicillin", 1, on);
    assert!(matches!(missing, Err(CoreError::CustomerNotFound { .. })));
}

#[test]
fn rebuild_consistency_over_many_records() {
    let snapshot: Vec<Item> = (0..200).map(|i| item(i * 2, &format!("N{i}"), i)).collect();
    let catalog =
        IndexedCatalog::open(MemoryStore::with_records(snapshot.clone(), Vec::new())).unwrap();

    for record in &snapshot {
        assert_eq!(
            catalog.find_item_by_id(record.id).unwrap().map(|i| i.id),
            Some(record.id)
        );
        assert!(catalog.find_item_by_name(&record.name).unwrap().is_some());
    }
    for odd in [1u32, 3, 401] {
        assert!(catalog.find_item_by_id(ItemId::new(odd)).unwrap().is_none());
    }
}

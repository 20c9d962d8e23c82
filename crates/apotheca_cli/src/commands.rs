//! Command implementations.

use crate::sort;
use crate::SortBy;
use apotheca_core::{
    Customer, CustomerId, FileStore, IndexedCatalog, Item, ItemId, Supplier, SupplierId,
};
use chrono::{Duration, Local, NaiveDate};
use std::error::Error;

type Catalog = IndexedCatalog<FileStore>;
type CommandResult = Result<(), Box<dyn Error>>;

fn print_item(item: &Item) {
    println!(
        "{:>6}  {:<24} batch {:<10} qty {:>5}  expires {}  supplier {}  mfr {}",
        item.id.as_u32(),
        item.name,
        item.batch,
        item.quantity,
        item.expiry,
        item.supplier,
        item.manufacturer
    );
}

fn print_customer(customer: &Customer) {
    println!(
        "{:>6}  {:<24} contact {}",
        customer.id.as_u32(),
        customer.name,
        customer.contact
    );
}

#[allow(clippy::too_many_arguments)]
pub fn add_item(
    catalog: &mut Catalog,
    id: u32,
    name: String,
    batch: String,
    quantity: u32,
    expiry: NaiveDate,
    supplier: String,
    manufacturer: String,
) -> CommandResult {
    let item = Item {
        id: ItemId::new(id),
        name: name.clone(),
        batch,
        quantity,
        expiry,
        supplier,
        manufacturer,
    };
    catalog.add_item(item)?;
    let stocked = catalog
        .find_item_by_id(ItemId::new(id))?
        .ok_or("item vanished after add")?;
    println!("Stocked {} (id {}), quantity now {}", name, id, stocked.quantity);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update_item(
    catalog: &mut Catalog,
    id: u32,
    name: String,
    batch: String,
    quantity: u32,
    expiry: NaiveDate,
    supplier: String,
    manufacturer: String,
) -> CommandResult {
    catalog.update_item(Item {
        id: ItemId::new(id),
        name,
        batch,
        quantity,
        expiry,
        supplier,
        manufacturer,
    })?;
    println!("Updated item {id}");
    Ok(())
}

pub fn sell(catalog: &mut Catalog, customer_id: u32, item_name: &str, quantity: u32) -> CommandResult {
    let today = Local::now().date_naive();
    let sold = catalog.record_sale(CustomerId::new(customer_id), item_name, quantity, today)?;
    println!(
        "Sold {quantity} x {} to customer {customer_id}; {} units left",
        sold.name, sold.quantity
    );
    Ok(())
}

pub fn register_customer(
    catalog: &mut Catalog,
    id: u32,
    name: String,
    contact: String,
) -> CommandResult {
    catalog.register_customer(Customer {
        id: CustomerId::new(id),
        name: name.clone(),
        contact,
    })?;
    println!("Registered customer {name} (id {id})");
    Ok(())
}

pub fn add_supplier(catalog: &mut Catalog, id: u32, name: String, contact: String) -> CommandResult {
    catalog.add_supplier(Supplier {
        id: SupplierId::new(id),
        name: name.clone(),
        contact,
    })?;
    println!("Added supplier {name} (id {id})");
    Ok(())
}

pub fn find_item(catalog: &Catalog, id: Option<u32>, name: Option<String>) -> CommandResult {
    let found = match (id, name) {
        (Some(id), _) => catalog.find_item_by_id(ItemId::new(id))?,
        (None, Some(name)) => catalog.find_item_by_name(&name)?,
        (None, None) => return Err("pass --id or --name".into()),
    };
    match found {
        Some(item) => print_item(&item),
        None => println!("No matching item."),
    }
    Ok(())
}

pub fn find_customer(catalog: &Catalog, id: Option<u32>, name: Option<String>) -> CommandResult {
    let found = match (id, name) {
        (Some(id), _) => catalog.find_customer_by_id(CustomerId::new(id))?,
        (None, Some(name)) => catalog.find_customer_by_name(&name)?,
        (None, None) => return Err("pass --id or --name".into()),
    };
    match found {
        Some(customer) => print_customer(&customer),
        None => println!("No matching customer."),
    }
    Ok(())
}

pub fn list_items(catalog: &Catalog, sort_by: SortBy) -> CommandResult {
    let mut items = catalog.items()?;
    match sort_by {
        SortBy::Name => sort::quick_sort_by_name(&mut items),
        SortBy::Quantity => sort::bubble_sort_by_quantity(&mut items),
        SortBy::Expiry => sort::merge_sort_by_expiry(&mut items),
    }
    if items.is_empty() {
        println!("No items in stock.");
    }
    for item in &items {
        print_item(item);
    }
    Ok(())
}

pub fn list_customers(catalog: &Catalog) -> CommandResult {
    let customers = catalog.customers()?;
    if customers.is_empty() {
        println!("No customers registered.");
    }
    for customer in &customers {
        print_customer(customer);
    }
    Ok(())
}

pub fn list_suppliers(catalog: &Catalog) -> CommandResult {
    let suppliers = catalog.suppliers()?;
    if suppliers.is_empty() {
        println!("No suppliers on file.");
    }
    for supplier in &suppliers {
        println!(
            "{:>6}  {:<24} contact {}",
            supplier.id.as_u32(),
            supplier.name,
            supplier.contact
        );
    }
    Ok(())
}

pub fn history(catalog: &Catalog, customer_id: u32) -> CommandResult {
    let id = CustomerId::new(customer_id);
    let customer = catalog
        .find_customer_by_id(id)?
        .ok_or_else(|| format!("no customer with id {customer_id}"))?;
    let lines = catalog.purchase_history(id)?;
    println!("Purchase history for {}:", customer.name);
    if lines.is_empty() {
        println!("  (none)");
    }
    for line in &lines {
        println!("  {line}");
    }
    Ok(())
}

pub fn low_stock(catalog: &Catalog, threshold: u32) -> CommandResult {
    let items = catalog.low_stock(threshold)?;
    println!("Items with fewer than {threshold} units:");
    if items.is_empty() {
        println!("  (none)");
    }
    for item in &items {
        println!("  {} - {} units left", item.name, item.quantity);
    }
    Ok(())
}

pub fn expiring(catalog: &Catalog, within_days: u32) -> CommandResult {
    let cutoff = Local::now()
        .date_naive()
        .checked_add_signed(Duration::days(i64::from(within_days)))
        .ok_or_else(|| format!("--within-days {within_days} is out of the calendar range"))?;
    let items = catalog.expiring_by(cutoff)?;
    println!("Items expiring by {cutoff}:");
    if items.is_empty() {
        println!("  (none)");
    }
    for item in &items {
        println!("  {} - expires {}", item.name, item.expiry);
    }
    Ok(())
}

//! apotheca CLI
//!
//! Command-line pharmacy inventory manager.
//!
//! # Commands
//!
//! - `add-item`, `update-item`, `sell`, `register-customer`, `add-supplier`
//! - `find-item`, `find-customer` - indexed lookups by id or name
//! - `list-items`, `list-customers`, `list-suppliers`, `history`
//! - `low-stock`, `expiring` - inventory reports

mod commands;
mod sort;

use apotheca_core::{FileStore, IndexedCatalog};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pharmacy inventory and customer management.
#[derive(Parser)]
#[command(name = "apotheca")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store file
    #[arg(global = true, short, long, default_value = "pharmacy.apo")]
    store: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Sort order for `list-items`.
#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    /// By name, case-insensitive (quicksort)
    Name,
    /// By stock quantity (bubble sort)
    Quantity,
    /// By expiry date (merge sort)
    Expiry,
}

#[derive(Subcommand)]
enum Commands {
    /// Stock a new item, or top up an existing id
    AddItem {
        /// Unique item id
        id: u32,
        /// Display name
        name: String,
        /// Batch number
        #[arg(short, long)]
        batch: String,
        /// Units to stock
        #[arg(short, long)]
        quantity: u32,
        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: NaiveDate,
        /// Supplier name
        #[arg(long, default_value = "")]
        supplier: String,
        /// Manufacturer name
        #[arg(long, default_value = "")]
        manufacturer: String,
    },

    /// Replace an item's record wholesale
    UpdateItem {
        /// Item id to update
        id: u32,
        /// Display name
        name: String,
        /// Batch number
        #[arg(short, long)]
        batch: String,
        /// Units in stock
        #[arg(short, long)]
        quantity: u32,
        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: NaiveDate,
        /// Supplier name
        #[arg(long, default_value = "")]
        supplier: String,
        /// Manufacturer name
        #[arg(long, default_value = "")]
        manufacturer: String,
    },

    /// Sell an item to a registered customer
    Sell {
        /// Customer id
        customer_id: u32,
        /// Item name (case-insensitive)
        item: String,
        /// Units to sell
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },

    /// Register a new customer
    RegisterCustomer {
        /// Unique customer id
        id: u32,
        /// Display name
        name: String,
        /// Contact details
        #[arg(short, long, default_value = "")]
        contact: String,
    },

    /// Add a supplier to the directory
    AddSupplier {
        /// Unique supplier id
        id: u32,
        /// Display name
        name: String,
        /// Contact details
        #[arg(short, long, default_value = "")]
        contact: String,
    },

    /// Look up an item by id or name
    FindItem {
        /// Item id
        #[arg(short, long, conflicts_with = "name")]
        id: Option<u32>,
        /// Item name (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Look up a customer by id or name
    FindCustomer {
        /// Customer id
        #[arg(short, long, conflicts_with = "name")]
        id: Option<u32>,
        /// Customer name (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all items
    ListItems {
        /// Sort order
        #[arg(long, value_enum, default_value = "name")]
        sort_by: SortBy,
    },

    /// List all customers
    ListCustomers,

    /// List all suppliers
    ListSuppliers,

    /// Show a customer's purchase history
    History {
        /// Customer id
        customer_id: u32,
    },

    /// Items running low on stock
    LowStock {
        /// Report items with fewer units than this
        #[arg(short, long, default_value = "10")]
        threshold: u32,
    },

    /// Items expiring soon
    Expiring {
        /// Report items expiring within this many days
        #[arg(short, long, default_value = "30")]
        within_days: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = FileStore::open(&cli.store)?;
    let mut catalog = IndexedCatalog::open(store)?;
    tracing::debug!(
        items = catalog.item_count(),
        customers = catalog.customer_count(),
        "catalog opened"
    );

    match cli.command {
        Commands::AddItem {
            id,
            name,
            batch,
            quantity,
            expiry,
            supplier,
            manufacturer,
        } => commands::add_item(
            &mut catalog,
            id,
            name,
            batch,
            quantity,
            expiry,
            supplier,
            manufacturer,
        )?,
        Commands::UpdateItem {
            id,
            name,
            batch,
            quantity,
            expiry,
            supplier,
            manufacturer,
        } => commands::update_item(
            &mut catalog,
            id,
            name,
            batch,
            quantity,
            expiry,
            supplier,
            manufacturer,
        )?,
        Commands::Sell {
            customer_id,
            item,
            quantity,
        } => commands::sell(&mut catalog, customer_id, &item, quantity)?,
        Commands::RegisterCustomer { id, name, contact } => {
            commands::register_customer(&mut catalog, id, name, contact)?;
        }
        Commands::AddSupplier { id, name, contact } => {
            commands::add_supplier(&mut catalog, id, name, contact)?;
        }
        Commands::FindItem { id, name } => commands::find_item(&catalog, id, name)?,
        Commands::FindCustomer { id, name } => commands::find_customer(&catalog, id, name)?,
        Commands::ListItems { sort_by } => commands::list_items(&catalog, sort_by)?,
        Commands::ListCustomers => commands::list_customers(&catalog)?,
        Commands::ListSuppliers => commands::list_suppliers(&catalog)?,
        Commands::History { customer_id } => commands::history(&catalog, customer_id)?,
        Commands::LowStock { threshold } => commands::low_stock(&catalog, threshold)?,
        Commands::Expiring { within_days } => commands::expiring(&catalog, within_days)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_item_rejects_id_and_name_together() {
        let result = Cli::try_parse_from(["apotheca", "find-item", "--id", "1", "--name", "Amox"]);
        assert!(result.is_err());
    }

    #[test]
    fn find_customer_rejects_id_and_name_together() {
        let result =
            Cli::try_parse_from(["apotheca", "find-customer", "--id", "5", "--name", "Dana"]);
        assert!(result.is_err());
    }

    #[test]
    fn find_item_accepts_either_selector_alone() {
        assert!(Cli::try_parse_from(["apotheca", "find-item", "--id", "1"]).is_ok());
        assert!(Cli::try_parse_from(["apotheca", "find-item", "--name", "Amox"]).is_ok());
    }
}

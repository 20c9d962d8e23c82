//! Durable single-file record store.

use crate::entity::{Customer, Item, Supplier};
use crate::error::{CoreError, CoreResult};
use crate::store::{RecordStore, StoreDocument, FORMAT_VERSION};
use crate::types::{CustomerId, ItemId};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A file-backed record store.
///
/// The whole store is one CBOR document. Every mutation rewrites the file
/// with a write-temp-then-rename sequence, so a crash mid-save leaves the
/// previous document intact. An `fs2` advisory lock next to the data file
/// keeps a second process from opening the same store.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = FileStore::open(Path::new("pharmacy.apo"))?;
/// store.insert_item(item)?;
/// ```
pub struct FileStore {
    doc: StoreDocument,
    path: PathBuf,
    /// Held for the lifetime of the store; the lock releases on drop.
    _lock_file: File,
}

impl FileStore {
    /// Opens a store file, creating it if missing.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StoreLocked`] if another process holds the lock
    /// - [`CoreError::InvalidFormat`] if the file is not a store document or
    ///   carries an unknown format version
    /// - I/O and decode errors from reading the file
    pub fn open(path: &Path) -> CoreResult<Self> {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        if lock_file.try_lock_exclusive().is_err() {
            return Err(CoreError::StoreLocked);
        }

        let doc = Self::load(path)?;
        Ok(Self {
            doc,
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> CoreResult<StoreDocument> {
        if !path.exists() {
            return Ok(StoreDocument::default());
        }

        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(StoreDocument::default());
        }

        let doc: StoreDocument = ciborium::from_reader(BufReader::new(file))?;
        if doc.version != FORMAT_VERSION {
            return Err(CoreError::invalid_format(format!(
                "unsupported store format version {}",
                doc.version
            )));
        }
        Ok(doc)
    }

    /// Saves the document atomically: write temp file, sync, rename.
    fn save(&self) -> CoreResult<()> {
        let temp_path = self.path.with_extension("tmp");

        let mut temp = File::create(&temp_path)?;
        ciborium::into_writer(&self.doc, &mut temp)?;
        temp.sync_all()?;
        drop(temp);

        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            items = self.doc.items.len(),
            customers = self.doc.customers.len(),
            "store saved"
        );
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn items(&self) -> CoreResult<Vec<Item>> {
        Ok(self.doc.items.clone())
    }

    fn item_by_id(&self, id: ItemId) -> CoreResult<Option<Item>> {
        Ok(self.doc.item_by_id(id).cloned())
    }

    fn insert_item(&mut self, item: Item) -> CoreResult<()> {
        self.doc.insert_item(item)?;
        self.save()
    }

    fn update_item(&mut self, item: Item) -> CoreResult<()> {
        self.doc.update_item(item)?;
        self.save()
    }

    fn customers(&self) -> CoreResult<Vec<Customer>> {
        Ok(self.doc.customers.clone())
    }

    fn customer_by_id(&self, id: CustomerId) -> CoreResult<Option<Customer>> {
        Ok(self.doc.customer_by_id(id).cloned())
    }

    fn insert_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.doc.insert_customer(customer)?;
        self.save()
    }

    fn update_customer(&mut self, customer: Customer) -> CoreResult<()> {
        self.doc.update_customer(customer)?;
        self.save()
    }

    fn append_purchase(&mut self, id: CustomerId, line: &str) -> CoreResult<()> {
        self.doc.append_purchase(id, line)?;
        self.save()
    }

    fn purchases(&self, id: CustomerId) -> CoreResult<Vec<String>> {
        Ok(self.doc.purchases(id))
    }

    fn suppliers(&self) -> CoreResult<Vec<Supplier>> {
        Ok(self.doc.suppliers.clone())
    }

    fn insert_supplier(&mut self, supplier: Supplier) -> CoreResult<()> {
        self.doc.suppliers.push(supplier);
        self.save()
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("items", &self.doc.items.len())
            .field("customers", &self.doc.customers.len())
            .finish_non_exhaustive()
    }
}

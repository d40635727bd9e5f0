use std::path::{Path, PathBuf};

use serde::Deserialize;

use minimart_core::{Price, ProductCode};
use minimart_inventory::{Inventory, Product};

use super::r#trait::{Store, StoreError};

/// Column layout of the store file.
pub const STORE_HEADER: [&str; 4] = ["code", "name", "quantity", "price"];

/// One raw row as read from disk. Every field is optional so that missing
/// values are reported with their line number instead of a generic serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductRow {
    code: Option<String>,
    name: Option<String>,
    quantity: Option<String>,
    price: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, String> {
        let code = required(self.code, "code")?;
        let name = required(self.name, "name")?;
        let quantity = required(self.quantity, "quantity")?;

        let code = ProductCode::new(code).map_err(|e| e.to_string())?;
        let quantity: u64 = quantity
            .parse()
            .map_err(|_| format!("quantity '{quantity}' is not a non-negative integer"))?;
        let price = match self.price.filter(|p| !p.trim().is_empty()) {
            Some(text) => text.parse::<Price>().map_err(|e| e.to_string())?,
            None => Price::ZERO,
        };

        Product::new(code, name, quantity, price).map_err(|e| e.to_string())
    }
}

fn required(value: Option<String>, column: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("missing required field '{column}'")),
    }
}

/// CSV-backed product store (UTF-8, comma-separated, header row).
///
/// The file is opened, fully read or written, and closed within each call.
/// A crash halfway through `save` can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for CsvStore {
    fn load(&self) -> Result<Inventory, StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no store file yet; starting empty");
            return Ok(Inventory::empty());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut inventory = Inventory::empty();
        let mut record = csv::StringRecord::new();

        while reader.read_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let malformed = |reason: String| StoreError::Malformed { line, reason };

            let row: ProductRow = record
                .deserialize(Some(&headers))
                .map_err(|e| malformed(e.to_string()))?;
            let product = row.into_product().map_err(malformed)?;
            inventory
                .insert(product)
                .map_err(|e| malformed(e.to_string()))?;
        }

        tracing::debug!(path = %self.path.display(), products = inventory.len(), "store loaded");
        Ok(inventory)
    }

    fn save(&mut self, inventory: Inventory) -> Result<Inventory, StoreError> {
        let sorted = inventory.into_sorted();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(STORE_HEADER)?;
        for product in sorted.iter() {
            let quantity = product.quantity().to_string();
            let price = product.price().to_string();
            writer.write_record([
                product.code().as_str(),
                product.name(),
                quantity.as_str(),
                price.as_str(),
            ])?;
        }
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), products = sorted.len(), "store saved");
        Ok(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CsvStore {
        CsvStore::new(dir.path().join("inventory.csv"))
    }

    fn product(code: &str, name: &str, quantity: u64, cents: u64) -> Product {
        Product::new(
            ProductCode::new(code).unwrap(),
            name,
            quantity,
            Price::from_cents(cents),
        )
        .unwrap()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let inv = store_in(&dir).load().unwrap();
        assert!(inv.is_empty());
    }

    #[test]
    fn save_writes_header_and_name_sorted_rows() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let inv = Inventory::from_products(vec![
            product("B2", "water", 3, 99),
            product("A1", "Soda", 10, 150),
        ])
        .unwrap();

        let sorted = store.save(inv).unwrap();
        assert_eq!(sorted.iter().next().unwrap().name(), "Soda");

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "code,name,quantity,price\nA1,Soda,10,1.50\nB2,water,3,0.99\n");
    }

    #[test]
    fn empty_inventory_still_gets_a_header() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Inventory::empty()).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "code,name,quantity,price\n");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_defaults_missing_price_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let contents = "code,name,quantity,price\nA1,Soda,10\nB2,Water,4,\n";
        std::fs::write(store.path(), contents).unwrap();

        let inv = store.load().unwrap();
        assert_eq!(inv.len(), 2);
        assert!(inv.iter().all(|p| p.price() == Price::ZERO));
    }

    #[test]
    fn load_keeps_names_with_commas() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store
            .save(Inventory::from_products(vec![product("R1", "Rice, brown", 2, 300)]).unwrap())
            .unwrap();

        let inv = store.load().unwrap();
        assert_eq!(inv.iter().next().unwrap().name(), "Rice, brown");
    }

    #[test]
    fn malformed_rows_abort_loading_with_line_number() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let contents = "code,name,quantity,price\nA1,Soda,10,1.5\nB2,Water\n";
        std::fs::write(store.path(), contents).unwrap();
        match store.load().unwrap_err() {
            StoreError::Malformed { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("quantity"), "{reason}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }

        std::fs::write(store.path(), "code,name,quantity,price\nA1,Soda,ten,1.5\n").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed { line: 2, .. })));

        std::fs::write(store.path(), "code,name,quantity,price\nA1,Soda,-1,1.5\n").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed { line: 2, .. })));
    }

    #[test]
    fn duplicate_codes_on_disk_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let contents = "code,name,quantity,price\nA1,Soda,1,1\nA1,Cola,2,1\n";
        std::fs::write(store.path(), contents).unwrap();

        match store.load() {
            Err(StoreError::Malformed { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("'A1' already exists"), "{reason}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn resave_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        std::fs::write(
            store.path(),
            "code,name,quantity,price\nZ9,zucchini,1,0.5\nA1,Apple,12,2\n",
        )
        .unwrap();

        let loaded = store.load().unwrap();
        store.save(loaded).unwrap();
        let first = std::fs::read(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(loaded).unwrap();
        let second = std::fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: load + save reproduces the file that save produced.
        #[test]
        fn save_load_save_is_stable(
            rows in prop::collection::btree_map(
                "[A-Z][0-9]{1,3}",
                ("[A-Za-z][A-Za-z ,]{0,15}[A-Za-z]", 0u64..10_000, 0u64..1_000_000),
                0..12,
            )
        ) {
            let dir = TempDir::new().unwrap();
            let mut store = store_in(&dir);
            let products = rows
                .iter()
                .map(|(code, (name, qty, cents))| product(code, name, *qty, *cents))
                .collect();

            store.save(Inventory::from_products(products).unwrap()).unwrap();
            let first = std::fs::read(store.path()).unwrap();

            let reloaded = store.load().unwrap();
            store.save(reloaded).unwrap();
            let second = std::fs::read(store.path()).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}

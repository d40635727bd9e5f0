//! Integration tests for the file-backed pipeline.
//!
//! Tests: Command → CsvStore → CsvLedger → reload
//!
//! Verifies:
//! - Store file and in-memory inventory agree after every operation
//! - One ledger row per successful mutation, none for rejected ones
//! - A failed ledger append leaves the store file as it was

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use minimart_core::{DomainError, Price, ProductCode};

    use crate::ledger::CsvLedger;
    use crate::service::{InventoryService, ServiceError};
    use crate::store::{CsvStore, Store};

    fn clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(18, 45, 10)
            .unwrap()
    }

    fn code(s: &str) -> ProductCode {
        ProductCode::new(s).unwrap()
    }

    fn open(dir: &TempDir) -> InventoryService<CsvStore, CsvLedger> {
        InventoryService::open(
            CsvStore::new(dir.path().join("inventory.csv")),
            CsvLedger::new(dir.path().join("movements.csv")),
        )
        .unwrap()
        .with_clock(clock)
    }

    fn ledger_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn end_to_end_scenario_with_files() {
        let dir = TempDir::new().unwrap();
        let mut svc = open(&dir);

        svc.add_product(code("A1"), "Soda", 10, Price::from_cents(150)).unwrap();
        svc.sell(&code("A1"), 4).unwrap();
        assert_eq!(svc.inventory().get(&code("A1")).unwrap().quantity(), 6);

        let store_before = std::fs::read(dir.path().join("inventory.csv")).unwrap();
        let err = svc.adjust_quantity(&code("A1"), -10).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NegativeStock { .. })));
        assert_eq!(std::fs::read(dir.path().join("inventory.csv")).unwrap(), store_before);

        let rows = ledger_rows(&dir.path().join("movements.csv"));
        assert_eq!(
            rows,
            vec![
                vec!["2024-02-29 18:45:10", "Entry", "A1", "Soda", "10", "new product registered"],
                vec!["2024-02-29 18:45:10", "Sale", "A1", "Soda", "-4", "sale registered"],
            ]
        );

        let low: Vec<&str> = svc.low_stock_report(15).iter().map(|p| p.name()).collect();
        assert_eq!(low, vec!["Soda"]);
    }

    #[test]
    fn store_file_matches_memory_after_each_operation() {
        let dir = TempDir::new().unwrap();
        let mut svc = open(&dir);

        svc.add_product(code("W1"), "Water", 30, Price::from_cents(80)).unwrap();
        svc.add_product(code("B1"), "bread", 5, Price::from_cents(210)).unwrap();
        svc.adjust_quantity(&code("W1"), 12).unwrap();
        svc.sell(&code("B1"), 5).unwrap();

        let reloaded = CsvStore::new(dir.path().join("inventory.csv")).load().unwrap();
        let on_disk: Vec<(String, u64)> = reloaded
            .iter()
            .map(|p| (p.code().to_string(), p.quantity()))
            .collect();
        let in_memory: Vec<(String, u64)> = svc
            .inventory()
            .iter()
            .map(|p| (p.code().to_string(), p.quantity()))
            .collect();
        assert_eq!(on_disk, in_memory);
        assert_eq!(on_disk, vec![("B1".to_string(), 0), ("W1".to_string(), 42)]);
        assert_eq!(ledger_rows(&dir.path().join("movements.csv")).len(), 4);
    }

    #[test]
    fn session_restart_continues_the_ledger() {
        let dir = TempDir::new().unwrap();
        {
            let mut svc = open(&dir);
            svc.add_product(code("A1"), "Soda", 10, Price::from_cents(150)).unwrap();
            svc.save().unwrap();
        }
        let mut svc = open(&dir);
        assert_eq!(svc.inventory().len(), 1);
        svc.sell(&code("A1"), 1).unwrap();

        let text = std::fs::read_to_string(dir.path().join("movements.csv")).unwrap();
        assert_eq!(text.matches("timestamp,kind").count(), 1);
        assert_eq!(ledger_rows(&dir.path().join("movements.csv")).len(), 2);
    }

    #[test]
    fn unwritable_ledger_leaves_store_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("inventory.csv");
        {
            let mut svc = open(&dir);
            svc.add_product(code("A1"), "Soda", 10, Price::from_cents(150)).unwrap();
        }
        let before = std::fs::read(&store_path).unwrap();

        // A directory in place of the ledger file makes every append fail.
        let ledger_dir = dir.path().join("ledger-dir");
        std::fs::create_dir(&ledger_dir).unwrap();
        let mut svc =
            InventoryService::open(CsvStore::new(&store_path), CsvLedger::new(&ledger_dir))
                .unwrap()
                .with_clock(clock);

        let err = svc.sell(&code("A1"), 3).unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(_)));
        assert_eq!(svc.inventory().get(&code("A1")).unwrap().quantity(), 10);
        assert_eq!(std::fs::read(&store_path).unwrap(), before);
    }
}

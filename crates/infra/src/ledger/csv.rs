use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::Serialize;

use minimart_inventory::{Movement, MovementKind};

use super::r#trait::{Ledger, LedgerError};

/// Column layout of the ledger file.
pub const LEDGER_HEADER: [&str; 6] = [
    "timestamp",
    "kind",
    "code",
    "name",
    "quantity_delta",
    "note",
];

#[derive(Debug, Serialize)]
struct MovementRow<'a> {
    timestamp: String,
    kind: MovementKind,
    code: &'a str,
    name: &'a str,
    quantity_delta: i64,
    note: &'a str,
}

impl<'a> From<&'a Movement> for MovementRow<'a> {
    fn from(m: &'a Movement) -> Self {
        Self {
            timestamp: m.timestamp(),
            kind: m.kind,
            code: m.code.as_str(),
            name: &m.name,
            quantity_delta: m.quantity_delta,
            note: &m.note,
        }
    }
}

/// CSV-backed ledger (UTF-8, comma-separated).
///
/// The header row is written only when the file is new or empty.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Ledger for CsvLedger {
    fn append(&mut self, movement: &Movement) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_empty {
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.serialize(MovementRow::from(movement))?;
        writer.flush()?;

        tracing::debug!(
            path = %self.path.display(),
            code = %movement.code,
            kind = %movement.kind,
            "movement appended"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use minimart_core::ProductCode;
    use tempfile::TempDir;

    fn movement(kind: MovementKind, delta: i64, note: &str) -> Movement {
        Movement {
            occurred_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            kind,
            code: ProductCode::new("A1").unwrap(),
            name: "Soda, can".to_string(),
            quantity_delta: delta,
            note: note.to_string(),
        }
    }

    #[test]
    fn first_append_writes_header_then_rows_accumulate() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("movements.csv"));

        ledger
            .append(&movement(MovementKind::Entry, 10, "new product registered"))
            .unwrap();
        ledger
            .append(&movement(MovementKind::Sale, -4, "sale registered"))
            .unwrap();

        let text = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            text,
            "timestamp,kind,code,name,quantity_delta,note\n\
             2024-01-02 03:04:05,Entry,A1,\"Soda, can\",10,new product registered\n\
             2024-01-02 03:04:05,Sale,A1,\"Soda, can\",-4,sale registered\n"
        );
    }

    #[test]
    fn existing_records_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movements.csv");
        let existing = "timestamp,kind,code,name,quantity_delta,note\n\
                        2023-12-31 23:59:59,Entry,B2,Water,5,manual update\n";
        std::fs::write(&path, existing).unwrap();

        let mut ledger = CsvLedger::new(&path);
        ledger
            .append(&movement(MovementKind::Adjustment, -1, "manual update"))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(existing));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches("timestamp,kind").count(), 1);
    }

    #[test]
    fn empty_existing_file_gets_a_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movements.csv");
        std::fs::write(&path, "").unwrap();

        CsvLedger::new(&path)
            .append(&movement(MovementKind::Entry, 1, "manual update"))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("timestamp,kind,code,name,quantity_delta,note\n"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CsvLedger::new(dir.path());
        let err = ledger
            .append(&movement(MovementKind::Entry, 1, "manual update"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}

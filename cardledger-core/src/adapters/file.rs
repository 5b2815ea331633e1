//! Filesystem invoice sink

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::Invoice;
use crate::ports::InvoiceSink;

/// Writes each invoice as a text file inside a directory
///
/// The directory is created on first write. An absolute `filename` is
/// used as-is.
#[derive(Debug, Clone)]
pub struct FileInvoiceSink {
    dir: PathBuf,
}

impl FileInvoiceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl InvoiceSink for FileInvoiceSink {
    fn write_invoice(&self, filename: &str, invoice: &Invoice) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // The handle is closed when `writer` drops, including on the early
        // returns below.
        let mut writer = BufWriter::new(File::create(&path)?);
        for line in invoice.lines() {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn invoice() -> Invoice {
        Invoice {
            brand: "Visa".to_string(),
            card_number: 4532015112830366,
            purchases: Vec::new(),
            balance: Decimal::ZERO,
            limit: Decimal::new(5000, 0),
            generated_at: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(7, 5, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_writes_rendered_invoice() {
        let dir = tempdir().unwrap();
        let sink = FileInvoiceSink::new(dir.path().join("invoices"));

        let path = sink.write_invoice("invoice_1.txt", &invoice()).unwrap();

        assert_eq!(path, dir.path().join("invoices").join("invoice_1.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), invoice().render());
    }

    #[test]
    fn test_unwritable_target_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should go makes File::create fail
        fs::create_dir(dir.path().join("taken.txt")).unwrap();
        let sink = FileInvoiceSink::new(dir.path());

        let err = sink.write_invoice("taken.txt", &invoice()).unwrap_err();
        assert!(err.is_io());
    }
}

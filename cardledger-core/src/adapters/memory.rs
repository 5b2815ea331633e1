//! In-memory invoice sink

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::Invoice;
use crate::ports::InvoiceSink;

/// Keeps rendered invoices in memory, keyed by filename
#[derive(Debug, Default)]
pub struct MemoryInvoiceSink {
    invoices: RefCell<BTreeMap<String, String>>,
}

impl MemoryInvoiceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered text of the invoice stored under `filename`
    pub fn get(&self, filename: &str) -> Option<String> {
        self.invoices.borrow().get(filename).cloned()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.invoices.borrow().keys().cloned().collect()
    }
}

impl InvoiceSink for MemoryInvoiceSink {
    fn write_invoice(&self, filename: &str, invoice: &Invoice) -> Result<PathBuf> {
        self.invoices
            .borrow_mut()
            .insert(filename.to_string(), invoice.render());
        Ok(PathBuf::from(filename))
    }
}

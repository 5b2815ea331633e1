//! Invoice sink port - where rendered invoices end up

use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::Invoice;

/// Destination for invoice text
///
/// Implementations must release whatever they acquire (file handles,
/// buffers) before returning, on success and on failure alike.
pub trait InvoiceSink {
    /// Write `invoice` under `filename` and return where it was stored
    ///
    /// A failed write is reported as `Error::Io`.
    fn write_invoice(&self, filename: &str, invoice: &Invoice) -> Result<PathBuf>;
}

impl<S: InvoiceSink + ?Sized> InvoiceSink for std::rc::Rc<S> {
    fn write_invoice(&self, filename: &str, invoice: &Invoice) -> Result<PathBuf> {
        (**self).write_invoice(filename, invoice)
    }
}

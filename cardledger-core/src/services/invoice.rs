//! Invoice service - rendering and exporting card invoices

use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::CreditCard;
use crate::ports::InvoiceSink;

/// Invoice service for writing card invoices through an `InvoiceSink`
pub struct InvoiceService {
    sink: Box<dyn InvoiceSink>,
}

impl InvoiceService {
    pub fn new(sink: Box<dyn InvoiceSink>) -> Self {
        Self { sink }
    }

    /// Conventional file name for a card's invoice
    pub fn default_filename(card: &CreditCard) -> String {
        format!("invoice_{}.txt", card.number())
    }

    /// Write the card's invoice, using the default file name unless one is
    /// given
    pub fn export(&self, card: &CreditCard, filename: Option<&str>) -> Result<PathBuf> {
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_filename(card));
        card.create_invoice(self.sink.as_ref(), &filename)
    }
}

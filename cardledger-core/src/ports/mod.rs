//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The domain only
//! sees these traits, never a concrete file or buffer.

mod invoice_sink;

pub use invoice_sink::InvoiceSink;

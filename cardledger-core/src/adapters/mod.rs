//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Local filesystem directory for InvoiceSink
//! - In-memory map for InvoiceSink (dry runs and tests)

mod file;
mod memory;

pub use file::FileInvoiceSink;
pub use memory::MemoryInvoiceSink;

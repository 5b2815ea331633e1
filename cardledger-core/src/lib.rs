//! cardledger core - accounts, credit cards and invoices
//!
//! This crate implements the ledger domain following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, CreditCard, Purchase, etc.)
//! - **ports**: Trait definitions for external dependencies (InvoiceSink)
//! - **services**: Business logic orchestration (scenario, card issuing, invoices)
//! - **adapters**: Concrete implementations (filesystem, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use anyhow::Result;

use adapters::FileInvoiceSink;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Account, CreditCard, Customer, Invoice, Purchase};

/// Main context for ledger operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration and the services wired to the ledger directory.
pub struct LedgerContext {
    pub config: Config,
    pub ledger_dir: PathBuf,
    pub scenario_service: ScenarioService,
    pub invoice_service: InvoiceService,
    pub greeting_service: GreetingService,
}

impl LedgerContext {
    /// Create a new ledger context writing invoices to the configured
    /// directory
    pub fn new(ledger_dir: &Path) -> Result<Self> {
        let config = Config::load(ledger_dir)?;
        let invoice_dir = config.invoice_dir_in(ledger_dir);

        let scenario_service = ScenarioService::new(
            config.clone(),
            InvoiceService::new(Box::new(FileInvoiceSink::new(&invoice_dir))),
        );
        let invoice_service = InvoiceService::new(Box::new(FileInvoiceSink::new(&invoice_dir)));
        let greeting_service = GreetingService::default();

        Ok(Self {
            config,
            ledger_dir: ledger_dir.to_path_buf(),
            scenario_service,
            invoice_service,
            greeting_service,
        })
    }
}

//! CLI command implementations

pub mod card;
pub mod config;
pub mod hello;
pub mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardledger_core::LedgerContext;

/// Get the ledger directory from environment or default
pub fn get_ledger_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CARDLEDGER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".cardledger"))
        .context("Could not find home directory; set CARDLEDGER_DIR")
}

/// Get or create the ledger context
pub fn get_context() -> Result<LedgerContext> {
    let ledger_dir = get_ledger_dir()?;

    std::fs::create_dir_all(&ledger_dir)
        .with_context(|| format!("Failed to create ledger directory: {:?}", ledger_dir))?;

    LedgerContext::new(&ledger_dir).context("Failed to initialize ledger context")
}

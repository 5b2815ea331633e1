//! Configuration management
//!
//! Settings live in `settings.json` inside the ledger directory:
//! ```json
//! {
//!   "bank": { "creditLimit": "2000", "cardLimit": "5000", "cardBrand": "Visa", ... },
//!   "invoices": { "directory": "invoices" },
//!   "scenario": { "seed": 42 }
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_CREDIT_LIMIT;

const SETTINGS_FILE: &str = "settings.json";

/// Longest validity a newly issued card may have
pub const MAX_CARD_VALIDITY_YEARS: u32 = 50;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    bank: BankSettings,
    #[serde(default)]
    invoices: InvoiceSettings,
    #[serde(default)]
    scenario: ScenarioSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BankSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credit_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_validity_years: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Ledger configuration (resolved view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Credit limit for newly opened accounts
    pub credit_limit: Decimal,
    /// Spending limit for newly issued cards
    pub card_limit: Decimal,
    pub card_brand: String,
    /// Years from today until a new card expires
    pub card_validity_years: u32,
    /// Where invoices are written; relative paths resolve against the
    /// ledger directory
    pub invoice_dir: PathBuf,
    /// Fixed RNG seed for reproducible scenario runs
    pub seed: Option<u64>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credit_limit: DEFAULT_CREDIT_LIMIT,
            card_limit: Decimal::new(5000, 0),
            card_brand: "Visa".to_string(),
            card_validity_years: 3,
            invoice_dir: PathBuf::from("invoices"),
            seed: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the ledger directory
    ///
    /// A missing or unreadable settings file yields defaults. Environment
    /// overrides (for CI/testing):
    /// - `CARDLEDGER_SEED`
    /// - `CARDLEDGER_INVOICE_DIR`
    pub fn load(ledger_dir: &Path) -> Result<Self> {
        let settings_path = ledger_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let defaults = Self::default();

        let seed = match std::env::var("CARDLEDGER_SEED").ok() {
            Some(value) => Some(value.trim().parse().map_err(|_| {
                anyhow::anyhow!("CARDLEDGER_SEED must be an unsigned integer, got '{}'", value)
            })?),
            None => raw.scenario.seed,
        };

        let invoice_dir = std::env::var_os("CARDLEDGER_INVOICE_DIR")
            .map(PathBuf::from)
            .or_else(|| raw.invoices.directory.clone())
            .unwrap_or(defaults.invoice_dir);

        let config = Self {
            credit_limit: raw.bank.credit_limit.unwrap_or(defaults.credit_limit),
            card_limit: raw.bank.card_limit.unwrap_or(defaults.card_limit),
            card_brand: raw.bank.card_brand.clone().unwrap_or(defaults.card_brand),
            card_validity_years: raw
                .bank
                .card_validity_years
                .unwrap_or(defaults.card_validity_years),
            invoice_dir,
            seed,
            _raw_settings: raw,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to the ledger directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, ledger_dir: &Path) -> Result<()> {
        self.validate()?;
        let settings_path = ledger_dir.join(SETTINGS_FILE);

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        // Update only the fields we manage
        settings.bank.credit_limit = Some(self.credit_limit);
        settings.bank.card_limit = Some(self.card_limit);
        settings.bank.card_brand = Some(self.card_brand.clone());
        settings.bank.card_validity_years = Some(self.card_validity_years);
        settings.invoices.directory = Some(self.invoice_dir.clone());
        settings.scenario.seed = self.seed;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Invoice directory resolved against `ledger_dir`
    pub fn invoice_dir_in(&self, ledger_dir: &Path) -> PathBuf {
        if self.invoice_dir.is_absolute() {
            self.invoice_dir.clone()
        } else {
            ledger_dir.join(&self.invoice_dir)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.credit_limit < Decimal::ZERO {
            anyhow::bail!("creditLimit must not be negative");
        }
        if self.card_limit < Decimal::ZERO {
            anyhow::bail!("cardLimit must not be negative");
        }
        if self.card_validity_years > MAX_CARD_VALIDITY_YEARS {
            anyhow::bail!(
                "cardValidityYears must be at most {}, got {}",
                MAX_CARD_VALIDITY_YEARS,
                self.card_validity_years
            );
        }
        if self.card_brand.trim().is_empty() {
            anyhow::bail!("cardBrand cannot be empty");
        }
        Ok(())
    }
}

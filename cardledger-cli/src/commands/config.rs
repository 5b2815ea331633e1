//! Config command - show and change settings

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use rust_decimal::Decimal;

use cardledger_core::config::Config;

use super::get_ledger_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        /// creditLimit, cardLimit, cardBrand, cardValidityYears, invoiceDir or seed
        key: String,
        /// New value ("none" clears the seed)
        value: String,
    },
}

/// Apply `key = value` to the config
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        "creditLimit" => {
            config.credit_limit =
                Decimal::from_str(value).with_context(|| format!("Invalid amount '{}'", value))?
        }
        "cardLimit" => {
            config.card_limit =
                Decimal::from_str(value).with_context(|| format!("Invalid amount '{}'", value))?
        }
        "cardBrand" => config.card_brand = value.to_string(),
        "cardValidityYears" => {
            config.card_validity_years = value
                .parse()
                .with_context(|| format!("Invalid number of years '{}'", value))?
        }
        "invoiceDir" => config.invoice_dir = PathBuf::from(value),
        "seed" => {
            config.seed = match value {
                "none" | "" => None,
                v => Some(v.parse().with_context(|| format!("Invalid seed '{}'", v))?),
            }
        }
        other => bail!(
            "Unknown setting '{}'. Expected one of: creditLimit, cardLimit, cardBrand, \
             cardValidityYears, invoiceDir, seed",
            other
        ),
    }
    Ok(())
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let ledger_dir = get_ledger_dir()?;
    std::fs::create_dir_all(&ledger_dir)
        .with_context(|| format!("Failed to create ledger directory: {:?}", ledger_dir))?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&ledger_dir)?;
            let invoice_dir = config.invoice_dir_in(&ledger_dir);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "ledgerDir": ledger_dir,
                        "creditLimit": config.credit_limit,
                        "cardLimit": config.card_limit,
                        "cardBrand": config.card_brand,
                        "cardValidityYears": config.card_validity_years,
                        "invoiceDir": invoice_dir,
                        "seed": config.seed,
                    }))?
                );
                return Ok(());
            }

            println!("{}", "Settings".bold());
            let mut table = output::create_table();
            table.add_row(vec!["Ledger directory".to_string(), ledger_dir.display().to_string()]);
            table.add_row(vec!["Credit limit".to_string(), output::money(config.credit_limit)]);
            table.add_row(vec!["Card limit".to_string(), output::money(config.card_limit)]);
            table.add_row(vec!["Card brand".to_string(), config.card_brand.clone()]);
            table.add_row(vec![
                "Card validity".to_string(),
                format!("{} years", config.card_validity_years),
            ]);
            table.add_row(vec!["Invoice directory".to_string(), invoice_dir.display().to_string()]);
            table.add_row(vec![
                "Scenario seed".to_string(),
                config
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "random".to_string()),
            ]);
            println!("{}", table);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(&ledger_dir)?;
            apply(&mut config, &key, &value)?;
            config.save(&ledger_dir)?;

            tracing::debug!(key = key.as_str(), "Setting changed");
            output::success(&format!("Set {} = {}", key, value.trim()));
        }
    }

    Ok(())
}

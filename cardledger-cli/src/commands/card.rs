//! Card command - issue an ad-hoc card and charge purchases to it

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use cardledger_core::adapters::FileInvoiceSink;
use cardledger_core::services::{CardIssuer, InvoiceService};
use cardledger_core::{CreditCard, OperationResult};

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct CardOutput<'a> {
    card: &'a CreditCard,
    remaining_limit: Decimal,
    /// Set when a purchase was refused; later purchases were not attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    refused: Option<OperationResult<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_path: Option<PathBuf>,
}

/// Parse "AMOUNT:DESCRIPTION"; the description may itself contain colons
fn parse_purchase(arg: &str) -> Result<(Decimal, String)> {
    let (amount, description) = arg
        .split_once(':')
        .with_context(|| format!("Purchase '{}' must look like AMOUNT:DESCRIPTION", arg))?;
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid purchase amount '{}'", amount.trim()))?;
    Ok((amount, description.trim().to_string()))
}

pub fn run(
    limit: &str,
    brand: Option<String>,
    purchases: &[String],
    invoice: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let limit = Decimal::from_str(limit.trim())
        .with_context(|| format!("Invalid card limit '{}'", limit))?;
    // Reject malformed input before a card is issued
    let purchases = purchases
        .iter()
        .map(|p| parse_purchase(p))
        .collect::<Result<Vec<_>>>()?;

    let ctx = get_context()?;

    let mut issuer = CardIssuer::from_config(&ctx.config).with_limit(limit);
    if let Some(brand) = brand {
        issuer = issuer.with_brand(brand);
    }
    let mut card = issuer.issue_today()?;

    let mut refused = None;
    for (amount, description) in &purchases {
        if let Err(e) = card.add_purchase(*amount, description.as_str()) {
            refused = Some(
                OperationResult::from_error(&e)
                    .with_context("purchase", serde_json::json!(description)),
            );
            break;
        }
    }

    let invoice_path = match invoice {
        Some(path) => {
            let (dir, filename) = split_target(&path)?;
            // A bare file name goes to the configured invoice directory
            let result = match dir {
                Some(dir) => InvoiceService::new(Box::new(FileInvoiceSink::new(dir)))
                    .export(&card, Some(&filename)),
                None => ctx.invoice_service.export(&card, Some(&filename)),
            };
            Some(result.with_context(|| format!("Failed to write invoice {}", path.display()))?)
        }
        None => None,
    };

    if json {
        let out = CardOutput {
            card: &card,
            remaining_limit: card.remaining_limit(),
            refused,
            invoice_path,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format!("{} {}", card.brand(), card.number()).bold());
    println!("  Expires: {}", card.expiration_date().format("%m/%Y"));
    println!("  Limit: {}", output::money(card.limit()));
    println!();

    if card.purchases().is_empty() {
        println!("No purchases.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["Date", "Amount", "Description"]);
        for purchase in card.purchases() {
            table.add_row(vec![
                purchase.made_at().format("%d/%m/%Y").to_string(),
                format!("{:.2}", purchase.amount()),
                purchase.description().to_string(),
            ]);
        }
        println!("{}", table);
    }
    println!("Balance: {}", output::money(card.balance()));
    println!("Remaining limit: {}", output::money(card.remaining_limit()));

    if let Some(refused) = refused {
        println!();
        output::warning(&format!(
            "Purchase refused: {}",
            refused.error.unwrap_or_default()
        ));
        let skipped = purchases.len() - card.purchases().len() - 1;
        if skipped > 0 {
            output::warning(&format!("{} later purchase(s) not attempted", skipped));
        }
    }

    if let Some(path) = invoice_path {
        output::success(&format!("Invoice written to {}", path.display()));
    }

    Ok(())
}

/// Split an invoice target into its directory, if any, and file name
fn split_target(path: &Path) -> Result<(Option<PathBuf>, String)> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .with_context(|| format!("Invalid invoice file name: {}", path.display()))?
        .to_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    Ok((dir, filename))
}

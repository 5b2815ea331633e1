//! Invoice domain model
//!
//! An invoice is a point-in-time copy of a credit card's purchase history.
//! Rendering only reads the snapshot, so the same snapshot always renders
//! to the same text.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Purchase;

const SEPARATOR: &str = "--------------------------------------------";
const CURRENCY: &str = "USD";

/// Snapshot of a credit card taken when an invoice is requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub brand: String,
    pub card_number: u64,
    pub purchases: Vec<Purchase>,
    pub balance: Decimal,
    pub limit: Decimal,
    pub generated_at: NaiveDateTime,
}

impl Invoice {
    /// Sum of all purchase amounts
    pub fn total(&self) -> Decimal {
        self.purchases.iter().map(Purchase::amount).sum()
    }

    pub fn remaining_limit(&self) -> Decimal {
        self.limit - self.balance
    }

    /// Invoice text, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.purchases.len() + 9);
        lines.push(format!("INVOICE FOR: {} {}", self.brand, self.card_number));
        lines.push(SEPARATOR.to_string());
        lines.push("PURCHASES".to_string());
        lines.push("Date\t\tAmount\tDescription".to_string());
        for purchase in &self.purchases {
            lines.push(format!(
                "{}\t{:.2}\t{}",
                purchase.made_at().format("%d/%m/%Y"),
                purchase.amount(),
                purchase.description()
            ));
        }
        lines.push(SEPARATOR.to_string());
        lines.push(format!("TOTAL AMOUNT: {} {:.2}", CURRENCY, self.balance));
        lines.push(format!(
            "Remaining limit: {} {:.2}",
            CURRENCY,
            self.remaining_limit()
        ));
        lines.push(SEPARATOR.to_string());
        lines.push(format!(
            "Invoice generated at {}",
            self.generated_at.format("%d/%m/%Y, %H:%M")
        ));
        lines
    }

    /// Full invoice text
    pub fn render(&self) -> String {
        let mut text = self.lines().join("\n");
        text.push('\n');
        text
    }
}

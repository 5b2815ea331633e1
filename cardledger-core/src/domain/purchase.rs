//! Purchase domain model

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// A single spending event recorded on a credit card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    amount: Decimal,
    description: String,
    /// When the purchase was made (naive datetime, local time)
    made_at: NaiveDateTime,
}

impl Purchase {
    /// Create a purchase timestamped now
    pub fn new(amount: Decimal, description: impl Into<String>) -> Result<Self> {
        Self::at(amount, description, Local::now().naive_local())
    }

    /// Create a purchase with an explicit timestamp
    pub fn at(
        amount: Decimal,
        description: impl Into<String>,
        made_at: NaiveDateTime,
    ) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(Error::validation(
                "Purchase amount should be higher than zero",
            ));
        }

        Ok(Self {
            amount,
            description: description.into(),
            made_at,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn made_at(&self) -> NaiveDateTime {
        self.made_at
    }
}

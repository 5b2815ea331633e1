//! Customer domain model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity of an account holder
///
/// The link to the account is kept by number only; the account owns the
/// cards, not the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Brazilian national id (CPF)
    cpf: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    account: Option<u32>,
}

impl Customer {
    pub fn new(
        cpf: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            cpf: cpf.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            created_at: Utc::now(),
            account: None,
        }
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of the account this customer holds, if any
    pub fn account(&self) -> Option<u32> {
        self.account
    }

    pub fn set_account(&mut self, account_number: u32) {
        self.account = Some(account_number);
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer {}, CPF {}", self.full_name(), self.cpf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new("987.654.321-00", "John", "Doe");
        assert_eq!(customer.cpf(), "987.654.321-00");
        assert_eq!(customer.first_name(), "John");
        assert_eq!(customer.last_name(), "Doe");
        assert!(customer.created_at() <= Utc::now());
        assert_eq!(customer.account(), None);
        assert_eq!(customer.to_string(), "Customer John Doe, CPF 987.654.321-00");
    }

    #[test]
    fn test_set_account() {
        let mut customer = Customer::new("987.654.321-00", "John", "Doe");
        customer.set_account(4_821_337);
        assert_eq!(customer.account(), Some(4_821_337));
        assert_eq!(customer.full_name(), "John Doe");
    }
}

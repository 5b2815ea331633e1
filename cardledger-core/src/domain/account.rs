//! Account domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::result::{Error, Result};
use super::{CreditCard, Customer};

/// Credit limit granted to every new account (USD 2000.00)
pub const DEFAULT_CREDIT_LIMIT: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// A bank account with an overdraft allowance
///
/// There is no checking/savings distinction. The balance may go negative,
/// but a withdrawal never takes it below `-credit_limit`.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    number: u32,
    balance: Decimal,
    credit_limit: Decimal,
    created_at: DateTime<Utc>,
    customer_cpf: String,
    credit_cards: Vec<CreditCard>,
}

impl Account {
    /// Open an account for `customer` and link the customer back to it
    pub fn open(number: u32, customer: &mut Customer) -> Self {
        customer.set_account(number);
        Self {
            number,
            balance: Decimal::ZERO,
            credit_limit: DEFAULT_CREDIT_LIMIT,
            created_at: Utc::now(),
            customer_cpf: customer.cpf().to_string(),
            credit_cards: Vec::new(),
        }
    }

    /// Deposit `value`; returns the new balance
    pub fn deposit(&mut self, value: Decimal) -> Result<Decimal> {
        if value < Decimal::ZERO {
            return Err(Error::validation(
                "Deposited value should be higher than zero",
            ));
        }

        self.balance = self
            .balance
            .checked_add(value)
            .ok_or_else(|| Error::validation("Deposit would overflow the account balance"))?;
        tracing::info!(
            account = self.number,
            "Account {} | Deposited value: USD {:.2} | New balance: USD {:.2}",
            self.number,
            value,
            self.balance
        );
        Ok(self.balance)
    }

    /// Withdraw `value`, drawing on the credit limit if needed; returns the
    /// new balance
    pub fn withdraw(&mut self, value: Decimal) -> Result<Decimal> {
        if value < Decimal::ZERO {
            return Err(Error::validation(
                "Withdrawal value should be higher than zero",
            ));
        }
        if value > self.available() {
            return Err(Error::insufficient_funds(value, self.available()));
        }

        self.balance = self
            .balance
            .checked_sub(value)
            .ok_or_else(|| Error::validation("Withdrawal would overflow the account balance"))?;
        tracing::info!(
            account = self.number,
            "Account {} | Withdrawn value: USD {:.2} | Remaining balance: USD {:.2}",
            self.number,
            value,
            self.balance
        );
        Ok(self.balance)
    }

    pub fn add_credit_card(&mut self, card: CreditCard) {
        self.credit_cards.push(card);
    }

    pub fn credit_cards(&self) -> &[CreditCard] {
        &self.credit_cards
    }

    pub fn credit_card(&self, number: u64) -> Option<&CreditCard> {
        self.credit_cards.iter().find(|c| c.number() == number)
    }

    pub fn credit_card_mut(&mut self, number: u64) -> Option<&mut CreditCard> {
        self.credit_cards.iter_mut().find(|c| c.number() == number)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Amount that can still be withdrawn: balance plus credit limit,
    /// capped at `Decimal::MAX`
    pub fn available(&self) -> Decimal {
        self.balance
            .checked_add(self.credit_limit)
            .unwrap_or(Decimal::MAX)
    }

    pub fn credit_limit(&self) -> Decimal {
        self.credit_limit
    }

    pub fn set_credit_limit(&mut self, credit_limit: Decimal) -> Result<()> {
        if credit_limit < Decimal::ZERO {
            return Err(Error::validation(
                "Account credit limit should be a positive value",
            ));
        }
        self.credit_limit = credit_limit;
        Ok(())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn customer_cpf(&self) -> &str {
        &self.customer_cpf
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account number {}, balance of USD {:.2}",
            self.number, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account() -> (Account, Customer) {
        let mut customer = Customer::new("987.654.321-00", "John", "Doe");
        let account = Account::open(4_821_337, &mut customer);
        (account, customer)
    }

    #[test]
    fn test_open_links_customer() {
        let (account, customer) = account();
        assert_eq!(customer.account(), Some(4_821_337));
        assert_eq!(account.customer_cpf(), "987.654.321-00");
        assert_eq!(account.credit_limit(), Decimal::new(2000, 0));
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(account.credit_cards().is_empty());
    }

    #[test]
    fn test_deposit() {
        let (mut account, _) = account();
        let balance = account.deposit(Decimal::new(250000, 2)).unwrap();
        assert_eq!(balance, Decimal::new(2500, 0));
        assert_eq!(account.deposit(Decimal::ZERO).unwrap(), balance);

        let err = account.deposit(Decimal::new(-1, 0)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(account.balance(), Decimal::new(2500, 0));
    }

    #[test]
    fn test_withdraw_into_credit_limit() {
        let (mut account, _) = account();
        account.deposit(Decimal::new(2500, 0)).unwrap();

        let balance = account.withdraw(Decimal::new(3500, 0)).unwrap();
        assert_eq!(balance, Decimal::new(-1000, 0));
        assert_eq!(account.available(), Decimal::new(1000, 0));

        let err = account.withdraw(Decimal::new(1200, 0)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(account.balance(), Decimal::new(-1000, 0));
    }

    #[test]
    fn test_withdraw_exactly_available() {
        let (mut account, _) = account();
        let balance = account.withdraw(Decimal::new(2000, 0)).unwrap();
        assert_eq!(balance, Decimal::new(-2000, 0));
        assert!(account.withdraw(Decimal::new(1, 2)).unwrap_err().is_insufficient_funds());
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let (mut account, _) = account();
        account.deposit(Decimal::MAX).unwrap();

        // Balance plus credit limit exceeds the representable range
        assert_eq!(account.available(), Decimal::MAX);
        assert_eq!(account.withdraw(Decimal::ONE).unwrap(), Decimal::MAX - Decimal::ONE);

        let err = account.deposit(Decimal::TWO).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(account.balance(), Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn test_huge_credit_limit() {
        let (mut account, _) = account();
        account.set_credit_limit(Decimal::MAX).unwrap();
        account.deposit(Decimal::ONE).unwrap();

        assert_eq!(account.available(), Decimal::MAX);
        let balance = account.withdraw(Decimal::MAX).unwrap();
        assert_eq!(balance, Decimal::ONE - Decimal::MAX);
        assert!(account.withdraw(Decimal::TWO).unwrap_err().is_insufficient_funds());
    }

    #[test]
    fn test_withdraw_negative_rejected() {
        let (mut account, _) = account();
        assert!(account.withdraw(Decimal::new(-5, 0)).unwrap_err().is_validation());
    }

    #[test]
    fn test_credit_limit_setter() {
        let (mut account, _) = account();
        assert!(account.set_credit_limit(Decimal::new(-1, 0)).unwrap_err().is_validation());
        account.set_credit_limit(Decimal::ZERO).unwrap();
        assert!(account.withdraw(Decimal::new(1, 0)).unwrap_err().is_insufficient_funds());
    }

    #[test]
    fn test_cards_are_owned_in_order() {
        let (mut account, _) = account();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2027, 11, 1).unwrap();
        for number in [4532015112830366, 5425233430109903] {
            let limit = Decimal::new(5000, 0);
            let card =
                CreditCard::new_as_of(number, "Visa", limit, 123456, expiration, today).unwrap();
            account.add_credit_card(card);
        }

        let numbers: Vec<u64> = account.credit_cards().iter().map(|c| c.number()).collect();
        assert_eq!(numbers, vec![4532015112830366, 5425233430109903]);

        account
            .credit_card_mut(5425233430109903)
            .unwrap()
            .add_purchase(Decimal::new(10, 0), "Coffee")
            .unwrap();
        let card = account.credit_card(5425233430109903).unwrap();
        assert_eq!(card.balance(), Decimal::new(10, 0));
        assert!(account.credit_card(1).is_none());
    }

    #[test]
    fn test_display() {
        let (mut account, _) = account();
        account.deposit(Decimal::new(2500, 0)).unwrap();
        assert_eq!(account.to_string(), "Account number 4821337, balance of USD 2500.00");
    }
}

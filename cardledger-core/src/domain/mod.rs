//! Core domain entities
//!
//! All ledger entities are defined here. These are plain data structures
//! with validated mutators - the only I/O is delegated to an `InvoiceSink`.

mod account;
mod credit_card;
mod customer;
pub mod invoice;
mod purchase;
pub mod result;

pub use account::{Account, DEFAULT_CREDIT_LIMIT};
pub use credit_card::{CreditCard, CARD_NUMBER_MAX, CARD_NUMBER_MIN, PIN_MAX, PIN_MIN};
pub use customer::Customer;
pub use invoice::Invoice;
pub use purchase::Purchase;

//! SQLite implementations of the storage traits.

pub mod bill_repository;
pub mod gamification_repository;
pub mod pay_period_repository;
pub mod paycheck_repository;
pub mod reminder_repository;

pub use bill_repository::BillRepository;
pub use gamification_repository::GamificationRepository;
pub use pay_period_repository::PayPeriodRepository;
pub use paycheck_repository::PaycheckRepository;
pub use reminder_repository::ReminderRepository;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a money column stored as TEXT
pub(crate) fn decode_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).with_context(|| format!("Invalid stored amount '{}'", raw))
}

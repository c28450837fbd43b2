pub mod bill;
pub mod pay_period;
pub mod paycheck;
pub mod reminder;
pub mod gamification;

use rust_decimal::Decimal;

use crate::domain::error::{DomainError, DomainResult};

/// Largest money amount accepted on any bill or paycheck.
///
/// Sums over stored amounts stay below `Decimal::MAX` for any realistic
/// row count (about 7.9e16 rows at this cap).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Money amounts must lie in `0..=MAX_AMOUNT`
pub fn validate_money(what: &str, amount: Decimal) -> DomainResult<()> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "{} amount cannot be negative: {}",
            what, amount
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(DomainError::validation(format!(
            "{} amount cannot exceed {}: {}",
            what, MAX_AMOUNT, amount
        )));
    }
    Ok(())
}

use rust_decimal::Decimal;
use shared::PlayerId;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::validate_money;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainPaycheck {
    pub id: i64,
    pub source: String,
    pub amount: Decimal,
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPaycheck {
    pub source: String,
    pub amount: Decimal,
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaycheckChanges {
    pub source: Option<String>,
    pub amount: Option<Decimal>,
    pub player_id: Option<PlayerId>,
}

impl NewPaycheck {
    pub fn validate(&self) -> DomainResult<()> {
        validate(&self.source, self.amount)
    }
}

impl PaycheckChanges {
    /// Check every supplied field without reading the stored row
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(source) = &self.source {
            validate_source(source)?;
        }
        if let Some(amount) = self.amount {
            validate_money("Paycheck", amount)?;
        }
        Ok(())
    }
}

fn validate(source: &str, amount: Decimal) -> DomainResult<()> {
    validate_source(source)?;
    validate_money("Paycheck", amount)
}

fn validate_source(source: &str) -> DomainResult<()> {
    if source.trim().is_empty() {
        return Err(DomainError::validation("Paycheck source cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_changes_reject_blank_source_and_oversized_amount() {
        let blank = PaycheckChanges { source: Some("  ".to_string()), ..Default::default() };
        assert!(blank.validate().is_err());

        let huge = PaycheckChanges { amount: Some(dec!(50000000000000000000000000000)), ..Default::default() };
        assert!(huge.validate().is_err());

        let amount_only = PaycheckChanges { amount: Some(dec!(1200)), ..Default::default() };
        assert!(amount_only.validate().is_ok());
        assert!(PaycheckChanges::default().validate().is_ok());
    }
}

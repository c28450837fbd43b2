use rust_decimal::Decimal;
use shared::BillClass;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::validate_money;

pub const MAX_NAME_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainBill {
    pub id: i64,
    pub name: String,
    pub month: Option<String>,
    pub amount: Decimal,
    pub due_day: u32,
    pub bill_class: BillClass,
    pub pay_period: i64,
    pub paid: bool,
}

/// A validated bill that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: String,
    pub month: Option<String>,
    pub amount: Decimal,
    pub due_day: u32,
    pub bill_class: BillClass,
    pub pay_period: i64,
    pub paid: bool,
}

impl NewBill {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_amount(self.amount)?;
        validate_due_day(self.due_day)
    }
}

/// Field replacements for an existing bill
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillChanges {
    pub name: Option<String>,
    pub month: Option<String>,
    pub amount: Option<Decimal>,
    pub due_day: Option<u32>,
    pub bill_class: Option<BillClass>,
    pub pay_period: Option<i64>,
    pub paid: Option<bool>,
}

impl DomainBill {
    pub fn from_new(id: i64, new_bill: NewBill) -> Self {
        Self {
            id,
            name: new_bill.name,
            month: new_bill.month,
            amount: new_bill.amount,
            due_day: new_bill.due_day,
            bill_class: new_bill.bill_class,
            pay_period: new_bill.pay_period,
            paid: new_bill.paid,
        }
    }
}

impl BillChanges {
    /// Check every supplied field. Each bill invariant covers a single
    /// field, so the stored row is not needed.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(due_day) = self.due_day {
            validate_due_day(due_day)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Bill name cannot be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Bill name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> DomainResult<()> {
    validate_money("Bill", amount)
}

fn validate_due_day(due_day: u32) -> DomainResult<()> {
    if !(1..=31).contains(&due_day) {
        return Err(DomainError::validation(format!(
            "Due day must be between 1 and 31, got {}",
            due_day
        )));
    }
    Ok(())
}

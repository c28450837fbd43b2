//! Debt snowball: smallest balance first, with a naive payoff estimate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::SnowballEntry;
use std::str::FromStr;

/// Days counted per month of payments
const DAYS_PER_MONTH: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub name: String,
    pub balance: Decimal,
    pub apr: Decimal,
}

/// Coerce one loosely typed debt object.
///
/// A missing or unparseable `balance`/`apr` becomes zero and a missing name
/// becomes empty. Non-object values yield an all-default debt.
pub fn coerce_debt(value: &Value) -> Debt {
    let name = match value.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Debt {
        name,
        balance: coerce_decimal(value.get("balance")),
        apr: coerce_decimal(value.get("apr")),
    }
}

fn coerce_decimal(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Months of payments needed, rounded up, times 30 days.
/// A zero or negative (overpaid) balance needs 0 days.
pub fn payoff_eta_days(balance: Decimal, monthly_payment: Decimal) -> u64 {
    let payment = monthly_payment.max(Decimal::ONE);
    let months = (balance / payment).ceil().max(Decimal::ZERO);
    months
        .to_u64()
        .unwrap_or(u64::MAX)
        .saturating_mul(DAYS_PER_MONTH)
}

/// Order debts by ascending balance and annotate each with its payoff ETA.
/// Debts with equal balances keep their input order.
pub fn compute_snowball(debts: Vec<Debt>, monthly_payment: Decimal) -> Vec<SnowballEntry> {
    let mut entries: Vec<SnowballEntry> = debts
        .into_iter()
        .map(|debt| SnowballEntry {
            payoff_eta_days: payoff_eta_days(debt.balance, monthly_payment),
            name: debt.name,
            balance: debt.balance,
            apr: debt.apr,
        })
        .collect();

    entries.sort_by(|a, b| a.balance.cmp(&b.balance));
    entries
}

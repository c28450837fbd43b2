//! Pay-period summary: income, fixed and variable costs, and the income pots.

use rust_decimal::Decimal;
use shared::{PayPeriodSummary, Pots, POTS_VERSION};

use crate::domain::models::bill::DomainBill;
use crate::domain::models::paycheck::DomainPaycheck;

/// Round to cents, half-to-even
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Percentage of income allocated to each pot (25% stays unallocated)
const DEBT_PAYMENTS_PCT: i64 = 10;
const CRITICAL_BILLS_PCT: i64 = 30;
const NEEDED_BILLS_PCT: i64 = 15;
const COMFORT_POOL_PCT: i64 = 10;
const ANNUAL_RAINY_DAY_PCT: i64 = 10;

fn pot(income: Decimal, percent: i64) -> Decimal {
    round_money(income * Decimal::new(percent, 2))
}

/// Summarize one pay period.
///
/// Income is the sum of every paycheck, not only those of this period.
pub fn summarize(pp_number: i64, bills: &[DomainBill], paychecks: &[DomainPaycheck]) -> PayPeriodSummary {
    let income: Decimal = paychecks.iter().map(|p| p.amount).sum();
    let fixed: Decimal = bills
        .iter()
        .filter(|b| b.bill_class.is_fixed_cost())
        .map(|b| b.amount)
        .sum();
    let variable: Decimal = bills
        .iter()
        .filter(|b| b.bill_class.is_variable_cost())
        .map(|b| b.amount)
        .sum();

    PayPeriodSummary {
        pp_number,
        income: round_money(income),
        fixed: round_money(fixed),
        variable: round_money(variable),
        surplus_or_deficit: round_money(income - fixed - variable),
        pots: Pots {
            debt_payments: pot(income, DEBT_PAYMENTS_PCT),
            critical_bills: pot(income, CRITICAL_BILLS_PCT),
            needed_bills: pot(income, NEEDED_BILLS_PCT),
            comfort_pool: pot(income, COMFORT_POOL_PCT),
            annual_rainy_day: pot(income, ANNUAL_RAINY_DAY_PCT),
        },
        pots_version: POTS_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MAX_AMOUNT;
    use rust_decimal_macros::dec;
    use shared::{BillClass, PlayerId};

    fn bill(id: i64, amount: Decimal, bill_class: BillClass) -> DomainBill {
        DomainBill {
            id,
            name: format!("bill-{}", id),
            month: None,
            amount,
            due_day: 1,
            bill_class,
            pay_period: 17,
            paid: false,
        }
    }

    fn paycheck(id: i64, amount: Decimal) -> DomainPaycheck {
        DomainPaycheck {
            id,
            source: "Work".to_string(),
            amount,
            player_id: PlayerId::Player1,
        }
    }

    #[test]
    fn test_partitions_fixed_and_variable_costs() {
        let bills = vec![
            bill(1, dec!(250), BillClass::Debt),
            bill(2, dec!(100.50), BillClass::Critical),
            bill(3, dec!(80), BillClass::Needed),
            bill(4, dec!(45.25), BillClass::Comfort),
            // Neither fixed nor variable
            bill(5, dec!(1800), BillClass::Housing),
        ];
        let paychecks = vec![paycheck(1, dec!(2000)), paycheck(2, dec!(1000))];

        let summary = summarize(17, &bills, &paychecks);

        assert_eq!(summary.pp_number, 17);
        assert_eq!(summary.income, dec!(3000));
        assert_eq!(summary.fixed, dec!(350.50));
        assert_eq!(summary.variable, dec!(125.25));
        assert_eq!(summary.surplus_or_deficit, dec!(2524.25));
        assert_eq!(summary.pots.debt_payments, dec!(300));
        assert_eq!(summary.pots.critical_bills, dec!(900));
        assert_eq!(summary.pots.needed_bills, dec!(450));
        assert_eq!(summary.pots.comfort_pool, dec!(300));
        assert_eq!(summary.pots.annual_rainy_day, dec!(300));
        assert_eq!(summary.pots_version, 3);
    }

    #[test]
    fn test_pots_never_exceed_income() {
        for income in [dec!(0), dec!(0.01), dec!(999.99), dec!(1234.567), dec!(100000)] {
            let summary = summarize(1, &[bill(1, dec!(10), BillClass::Debt)], &[paycheck(1, income)]);
            assert!(summary.pots.total() <= summary.income);
        }
    }

    #[test]
    fn test_deficit_and_half_even_rounding() {
        let summary = summarize(
            2,
            &[bill(1, dec!(500.005), BillClass::Critical)],
            &[paycheck(1, dec!(100))],
        );
        // -400.005 rounds half-to-even
        assert_eq!(summary.surplus_or_deficit, dec!(-400.00));
        assert_eq!(summary.fixed, dec!(500.00));
    }

    #[test]
    fn test_no_paychecks_means_zero_income() {
        let summary = summarize(3, &[bill(1, dec!(20), BillClass::Comfort)], &[]);
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.surplus_or_deficit, dec!(-20));
        assert_eq!(summary.pots.total(), Decimal::ZERO);
    }

    #[test]
    fn test_largest_accepted_amounts_sum_without_overflow() {
        let top = Decimal::from(MAX_AMOUNT);
        let bills: Vec<DomainBill> = (0..2000)
            .map(|id| bill(id, top, if id % 2 == 0 { BillClass::Critical } else { BillClass::Comfort }))
            .collect();
        let paychecks: Vec<DomainPaycheck> = (0..2000).map(|id| paycheck(id, top)).collect();

        let summary = summarize(17, &bills, &paychecks);
        assert_eq!(summary.income, top * Decimal::from(2000));
        assert_eq!(summary.fixed + summary.variable, summary.income);
        assert_eq!(summary.surplus_or_deficit, Decimal::ZERO);
        assert_eq!(summary.pots.critical_bills, top * Decimal::from(600));
    }

    #[test]
    fn test_summary_serializes_pot_keys() {
        let summary = summarize(4, &[bill(1, dec!(1), BillClass::Debt)], &[paycheck(1, dec!(100))]);
        let json = serde_json::to_value(&summary).unwrap();
        for key in ["income", "fixed", "variable", "surplus_or_deficit", "pots"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        for pot in ["Debt_Payments", "Critical_Bills", "Needed_Bills", "Comfort_Pool", "Annual_Rainy_Day"] {
            assert!(json["pots"].get(pot).is_some(), "missing pot {}", pot);
        }
    }
}

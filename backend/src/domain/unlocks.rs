//! Unlock suggestions: actions expected to free up budget.

use rust_decimal::Decimal;
use shared::UnlockSuggestion;

use crate::domain::models::bill::DomainBill;

/// Unpaid bills below this amount are suggested for payoff
pub const SMALL_BILL_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;
const SMALL_BILL_IMPACT: f64 = 0.4;

fn static_unlocks() -> Vec<UnlockSuggestion> {
    [
        ("Pause non-essential subscriptions", 0.8, vec!["Review subscription list"]),
        ("Call provider for rate reduction", 0.6, vec!["Recent on-time payments"]),
        ("Sell one unused item", 0.5, vec!["Identify item", "List locally"]),
    ]
    .into_iter()
    .map(|(action, impact_score, prereqs)| UnlockSuggestion {
        action: action.to_string(),
        impact_score,
        prereqs: prereqs.into_iter().map(str::to_string).collect(),
    })
    .collect()
}

/// Suggestions ordered by descending impact.
///
/// Each unpaid bill in `context` under the threshold adds a "Pay off" action.
pub fn suggest(context: &[DomainBill]) -> Vec<UnlockSuggestion> {
    let mut suggestions = static_unlocks();
    suggestions.extend(
        context
            .iter()
            .filter(|bill| !bill.paid && bill.amount < SMALL_BILL_THRESHOLD)
            .map(|bill| UnlockSuggestion {
                action: format!("Pay off {}", bill.name),
                impact_score: SMALL_BILL_IMPACT,
                prereqs: vec!["Confirm funds available".to_string()],
            }),
    );

    suggestions.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::BillClass;

    fn bill(name: &str, amount: Decimal, paid: bool) -> DomainBill {
        DomainBill {
            id: 1,
            name: name.to_string(),
            month: None,
            amount,
            due_day: 10,
            bill_class: BillClass::Comfort,
            pay_period: 17,
            paid,
        }
    }

    #[test]
    fn test_static_list_is_sorted_by_impact() {
        let suggestions = suggest(&[]);
        let scores: Vec<f64> = suggestions.iter().map(|s| s.impact_score).collect();
        assert_eq!(scores, vec![0.8, 0.6, 0.5]);
        assert!(suggestions
            .iter()
            .all(|s| (0.0..=1.0).contains(&s.impact_score) && !s.prereqs.is_empty()));
    }

    #[test]
    fn test_small_unpaid_bills_are_appended() {
        let context = vec![
            bill("Streaming", dec!(15.99), false),
            bill("Rent", dec!(1800), false),
            bill("Gym", dec!(40), true),
            bill("Exactly100", dec!(100), false),
            bill("Phone", dec!(65), false),
        ];

        let actions: Vec<String> = suggest(&context).into_iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                "Pause non-essential subscriptions",
                "Call provider for rate reduction",
                "Sell one unused item",
                "Pay off Streaming",
                "Pay off Phone",
            ]
        );
    }
}

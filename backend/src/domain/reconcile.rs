//! Transaction reconciliation by memo substring.

use shared::{ReconcileResponse, ReconcileTransaction};

/// Lower-cased, trimmed, de-duplicated match terms. Blank entries are dropped.
pub fn reference_terms<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for name in names {
        let term = name.trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// True when the memo contains any reference term, ignoring case
pub fn memo_matches(memo: Option<&str>, reference: &[String]) -> bool {
    let memo = memo.unwrap_or_default().trim().to_lowercase();
    !memo.is_empty() && reference.iter().any(|term| memo.contains(term.as_str()))
}

/// Split transactions into matched and unmatched, preserving input order.
/// `reference` must already be normalized by [`reference_terms`].
pub fn reconcile(transactions: Vec<ReconcileTransaction>, reference: &[String]) -> ReconcileResponse {
    let (matched, unmatched): (Vec<_>, Vec<_>) = transactions
        .into_iter()
        .partition(|tx| memo_matches(tx.memo_text().as_deref(), reference));

    ReconcileResponse {
        matched_count: matched.len(),
        unmatched_count: unmatched.len(),
        matched,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(memo: Option<&str>) -> ReconcileTransaction {
        let value = match memo {
            Some(memo) => json!({ "memo": memo }),
            None => json!({}),
        };
        serde_json::from_value(value).unwrap()
    }

    fn reference() -> Vec<String> {
        reference_terms(["Electric Co", "  rent ", "", "RENT", "grocer"])
    }

    #[test]
    fn test_reference_terms_are_normalized() {
        assert_eq!(reference(), vec!["electric co", "rent", "grocer"]);
    }

    #[test]
    fn test_exact_name_in_any_case_matches() {
        let reference = reference();
        assert!(memo_matches(Some("ELECTRIC CO"), &reference));
        assert!(memo_matches(Some("electric co"), &reference));
        assert!(memo_matches(Some("  Monthly RENT payment "), &reference));
        assert!(memo_matches(Some("Corner Grocery"), &reference));
    }

    #[test]
    fn test_empty_memo_never_matches() {
        let reference = reference();
        assert!(!memo_matches(Some(""), &reference));
        assert!(!memo_matches(Some("   "), &reference));
        assert!(!memo_matches(None, &reference));
    }

    #[test]
    fn test_reconcile_counts_and_keeps_extra_fields() {
        let with_amount: ReconcileTransaction =
            serde_json::from_value(json!({"memo": "Rent August", "amount": -1800, "date": "2025-08-01"}))
                .unwrap();
        let transactions = vec![with_amount.clone(), tx(Some("Coffee")), tx(None)];

        let result = reconcile(transactions, &reference());

        assert_eq!(result.matched_count, 1);
        assert_eq!(result.unmatched_count, 2);
        assert_eq!(result.matched, vec![with_amount]);
        assert_eq!(result.matched[0].fields["amount"], json!(-1800));
    }

    #[test]
    fn test_non_string_memos_are_kept() {
        let reference = reference_terms(["4417", "rent"]);
        let transactions: Vec<ReconcileTransaction> = serde_json::from_value(json!([
            {"memo": 4417, "amount": 12},
            {"memo": null, "amount": 5},
            {"memo": ["rent"]}
        ]))
        .unwrap();

        let result = reconcile(transactions, &reference);

        assert_eq!(result.matched_count, 2);
        assert_eq!(result.matched[0].fields["memo"], json!(4417));
        assert_eq!(result.matched[1].fields["memo"], json!(["rent"]));
        assert_eq!(result.unmatched_count, 1);
        assert_eq!(
            serde_json::to_value(&result.unmatched[0]).unwrap(),
            json!({"memo": null, "amount": 5})
        );
    }

    #[test]
    fn test_no_transactions() {
        let result = reconcile(Vec::new(), &reference());
        assert_eq!(result, ReconcileResponse::default());
    }
}

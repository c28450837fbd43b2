//! Read-side budgeting views: pay-period summary, debt snowball, unlock
//! suggestions and transaction reconciliation.

use rust_decimal::Decimal;
use shared::{BillClass, PayPeriodSummary, ReconcileResponse, ReconcileTransaction, SnowballEntry, UnlockSuggestion};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::snowball::SnowballCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::reconcile::{reconcile, reference_terms};
use crate::domain::snowball::{coerce_debt, compute_snowball, Debt};
use crate::domain::summary::summarize;
use crate::domain::unlocks::suggest;
use crate::storage::{BillStorage, Connection, PaycheckStorage};

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    bill_repository: C::BillRepository,
    paycheck_repository: C::PaycheckRepository,
    default_monthly_payment: Decimal,
    reconcile_keywords: Vec<String>,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(
        connection: Arc<C>,
        default_monthly_payment: Decimal,
        reconcile_keywords: Vec<String>,
    ) -> Self {
        Self {
            bill_repository: connection.create_bill_repository(),
            paycheck_repository: connection.create_paycheck_repository(),
            default_monthly_payment,
            reconcile_keywords,
        }
    }

    /// Summary of one pay period; NotFound when it has no bills
    pub async fn pay_period_summary(&self, pp_number: i64) -> DomainResult<PayPeriodSummary> {
        let bills = self.bill_repository.list_bills_for_pay_period(pp_number).await?;
        if bills.is_empty() {
            return Err(DomainError::not_found(format!(
                "No bills found for pay period {}",
                pp_number
            )));
        }
        let paychecks = self.paycheck_repository.list_paychecks().await?;

        let summary = summarize(pp_number, &bills, &paychecks);
        info!(
            "PP {} summary: income={} fixed={} variable={}",
            pp_number, summary.income, summary.fixed, summary.variable
        );
        Ok(summary)
    }

    /// Snowball over client-supplied debts
    pub fn snowball(&self, command: SnowballCommand) -> Vec<SnowballEntry> {
        let debts = command.debts.iter().map(coerce_debt).collect();
        compute_snowball(
            debts,
            command.monthly_payment.unwrap_or(self.default_monthly_payment),
        )
    }

    /// Snowball over stored unpaid `Debt` bills, one debt per bill name
    pub async fn snowball_from_bills(
        &self,
        monthly_payment: Option<Decimal>,
    ) -> DomainResult<Vec<SnowballEntry>> {
        let bills = self.bill_repository.list_bills().await?;

        // First appearance decides order before the balance sort
        let mut order: Vec<String> = Vec::new();
        let mut balances: BTreeMap<String, Decimal> = BTreeMap::new();
        for bill in bills
            .into_iter()
            .filter(|b| !b.paid && b.bill_class == BillClass::Debt)
        {
            if !balances.contains_key(&bill.name) {
                order.push(bill.name.clone());
            }
            *balances.entry(bill.name).or_insert(Decimal::ZERO) += bill.amount;
        }

        let debts = order
            .into_iter()
            .map(|name| Debt {
                balance: balances.get(&name).copied().unwrap_or_default(),
                apr: Decimal::ZERO,
                name,
            })
            .collect();

        Ok(compute_snowball(
            debts,
            monthly_payment.unwrap_or(self.default_monthly_payment),
        ))
    }

    pub async fn unlocks(&self, include_bills: bool) -> DomainResult<Vec<UnlockSuggestion>> {
        let context = if include_bills {
            self.bill_repository.list_bills().await?
        } else {
            Vec::new()
        };
        Ok(suggest(&context))
    }

    /// Match transactions against stored bill names and configured keywords
    pub async fn reconcile(
        &self,
        transactions: Vec<ReconcileTransaction>,
    ) -> DomainResult<ReconcileResponse> {
        let names = self.bill_repository.list_bill_names().await?;
        let reference = reference_terms(
            names
                .iter()
                .map(String::as_str)
                .chain(self.reconcile_keywords.iter().map(String::as_str)),
        );

        let result = reconcile(transactions, &reference);
        info!(
            "Reconciled transactions: {} matched, {} unmatched",
            result.matched_count, result.unmatched_count
        );
        Ok(result)
    }
}

//! Bill and pay period management.
//!
//! Owns bill CRUD, the paid toggle, per-period listings and CSV ingestion.
//! Every write that references a pay period makes sure the matching
//! `pay_periods` row exists.

use shared::BillClass;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::bills::{CreateBillCommand, IngestResult, UpdateBillCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ingest::parse_bills_csv;
use crate::domain::models::bill::{BillChanges, DomainBill, NewBill};
use crate::domain::models::pay_period::DomainPayPeriod;
use crate::domain::pay_period::PayPeriodCalendar;
use crate::storage::{BillStorage, Connection, PayPeriodStorage};

#[derive(Clone)]
pub struct BillService<C: Connection> {
    bill_repository: C::BillRepository,
    pay_period_repository: C::PayPeriodRepository,
    calendar: PayPeriodCalendar,
}

impl<C: Connection> BillService<C> {
    pub fn new(connection: Arc<C>, calendar: PayPeriodCalendar) -> Self {
        Self {
            bill_repository: connection.create_bill_repository(),
            pay_period_repository: connection.create_pay_period_repository(),
            calendar,
        }
    }

    pub async fn list_bills(&self) -> DomainResult<Vec<DomainBill>> {
        Ok(self.bill_repository.list_bills().await?)
    }

    pub async fn get_bill(&self, id: i64) -> DomainResult<DomainBill> {
        self.bill_repository
            .get_bill(id)
            .await?
            .ok_or_else(|| bill_not_found(id))
    }

    pub async fn create_bill(&self, command: CreateBillCommand) -> DomainResult<DomainBill> {
        info!("Creating bill: {:?}", command);

        let new_bill = NewBill {
            name: command.name.trim().to_string(),
            month: command.month,
            amount: command.amount,
            due_day: command.due_day,
            bill_class: BillClass::from_str(&command.bill_class)?,
            pay_period: command.pay_period,
            paid: command.paid,
        };
        new_bill.validate()?;

        self.ensure_pay_period(new_bill.pay_period).await?;
        let bill = self.bill_repository.store_bill(&new_bill).await?;

        info!("Created bill {} ({}) in PP {}", bill.id, bill.name, bill.pay_period);
        Ok(bill)
    }

    /// Write only the supplied fields. A concurrent paid toggle on the same
    /// bill is kept unless this update sets `paid` itself.
    pub async fn update_bill(&self, id: i64, command: UpdateBillCommand) -> DomainResult<DomainBill> {
        info!("Updating bill {}: {:?}", id, command);

        let changes = BillChanges {
            name: command.name.map(|name| name.trim().to_string()),
            month: command.month,
            amount: command.amount,
            due_day: command.due_day,
            bill_class: command
                .bill_class
                .as_deref()
                .map(BillClass::from_str)
                .transpose()?,
            pay_period: command.pay_period,
            paid: command.paid,
        };
        changes.validate()?;
        let span = changes
            .pay_period
            .map(|pp| self.calendar.period_for(pp))
            .transpose()?;

        let bill = self
            .bill_repository
            .update_bill(id, &changes)
            .await?
            .ok_or_else(|| bill_not_found(id))?;

        if let Some(span) = span {
            self.pay_period_repository.ensure_pay_period(&span).await?;
        }

        Ok(bill)
    }

    pub async fn delete_bill(&self, id: i64) -> DomainResult<()> {
        info!("Deleting bill {}", id);
        if self.bill_repository.delete_bill(id).await? {
            Ok(())
        } else {
            Err(bill_not_found(id))
        }
    }

    pub async fn toggle_paid(&self, id: i64) -> DomainResult<DomainBill> {
        let bill = self
            .bill_repository
            .toggle_paid(id)
            .await?
            .ok_or_else(|| bill_not_found(id))?;

        info!("Bill {} ({}) paid = {}", bill.id, bill.name, bill.paid);
        Ok(bill)
    }

    /// Bills of one pay period ordered by due day; NotFound when there are none
    pub async fn bills_for_pay_period(&self, pp_number: i64) -> DomainResult<Vec<DomainBill>> {
        let bills = self.bill_repository.list_bills_for_pay_period(pp_number).await?;
        if bills.is_empty() {
            return Err(DomainError::not_found(format!(
                "No bills found for pay period {}",
                pp_number
            )));
        }
        Ok(bills)
    }

    pub async fn list_pay_periods(&self) -> DomainResult<Vec<DomainPayPeriod>> {
        Ok(self.pay_period_repository.list_pay_periods().await?)
    }

    /// Replace all bills and pay periods with the contents of a CSV upload
    pub async fn ingest_csv(&self, text: &str) -> DomainResult<IngestResult> {
        let bills = parse_bills_csv(text)?;

        let pp_numbers: BTreeSet<i64> = bills.iter().map(|bill| bill.pay_period).collect();
        let pay_periods = pp_numbers
            .into_iter()
            .map(|pp| self.calendar.period_for(pp))
            .collect::<DomainResult<Vec<_>>>()?;

        let ingested_rows = self.bill_repository.replace_all_bills(&bills, &pay_periods).await?;

        info!(
            "Ingested {} bills across {} pay periods",
            ingested_rows,
            pay_periods.len()
        );
        Ok(IngestResult {
            ingested_rows,
            pay_periods: pay_periods.len(),
        })
    }

    async fn ensure_pay_period(&self, pp_number: i64) -> DomainResult<DomainPayPeriod> {
        let span = self.calendar.period_for(pp_number)?;
        Ok(self.pay_period_repository.ensure_pay_period(&span).await?)
    }
}

fn bill_not_found(id: i64) -> DomainError {
    DomainError::not_found(format!("Bill {} not found", id))
}

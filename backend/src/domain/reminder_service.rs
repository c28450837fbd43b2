//! Due-bill reminder sweep.
//!
//! Each unpaid bill's due date is resolved from its pay period. Bills due
//! between today and `today + days_ahead` get a reminder unless one of the
//! same type went out for that bill in the last 24 hours.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, Utc};
use shared::ReminderType;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::commands::reminders::SweepCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::bill::DomainBill;
use crate::domain::models::reminder::DomainReminder;
use crate::domain::pay_period::PayPeriodCalendar;
use crate::storage::{BillStorage, Connection, ReminderStorage};

/// Bills due within this many days are `due_in_3_days`
const DUE_IN_3_DAYS_THRESHOLD: i64 = 3;

/// Minimum gap between two reminders of the same type for one bill
const DEDUPE_WINDOW_HOURS: i64 = 24;

/// Delivery channel for reminders
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn notify(&self, bill: &DomainBill, reminder_type: ReminderType, due_date: NaiveDate) -> Result<()>;
}

/// Writes reminders to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ReminderNotifier for LogNotifier {
    async fn notify(&self, bill: &DomainBill, reminder_type: ReminderType, due_date: NaiveDate) -> Result<()> {
        info!(
            "[REMINDER] {}: {} is due {} (${:.2})",
            reminder_type, bill.name, due_date, bill.amount
        );
        Ok(())
    }
}

pub fn reminder_type_for(days_until_due: i64) -> ReminderType {
    if days_until_due <= DUE_IN_3_DAYS_THRESHOLD {
        ReminderType::DueIn3Days
    } else {
        ReminderType::DueSoon
    }
}

#[derive(Clone)]
pub struct ReminderService<C: Connection> {
    bill_repository: C::BillRepository,
    reminder_repository: C::ReminderRepository,
    calendar: PayPeriodCalendar,
    notifier: Arc<dyn ReminderNotifier>,
}

impl<C: Connection> ReminderService<C> {
    pub fn new(connection: Arc<C>, calendar: PayPeriodCalendar, notifier: Arc<dyn ReminderNotifier>) -> Self {
        Self {
            bill_repository: connection.create_bill_repository(),
            reminder_repository: connection.create_reminder_repository(),
            calendar,
            notifier,
        }
    }

    /// Sweep using the local date and the current UTC time
    pub async fn send_due_bill_reminders(&self, days_ahead: i64) -> DomainResult<usize> {
        self.sweep(SweepCommand {
            today: Local::now().date_naive(),
            now: Utc::now(),
            days_ahead,
        })
        .await
    }

    /// Send reminders for bills due in the window and return how many went out
    pub async fn sweep(&self, command: SweepCommand) -> DomainResult<usize> {
        if command.days_ahead < 0 {
            return Err(DomainError::validation("days_ahead must not be negative"));
        }
        let window_end = Duration::try_days(command.days_ahead)
            .and_then(|days| command.today.checked_add_signed(days))
            .ok_or_else(|| DomainError::validation("days_ahead is out of range"))?;

        let bills = self.bill_repository.list_bills().await?;
        let mut sent = 0;

        for bill in bills.into_iter().filter(|bill| !bill.paid) {
            let due_date = match self.calendar.due_date(bill.pay_period, bill.due_day) {
                Ok(date) => date,
                Err(e) => {
                    warn!("Skipping bill {}: {}", bill.id, e);
                    continue;
                }
            };
            if due_date < command.today || due_date > window_end {
                continue;
            }

            let reminder_type = reminder_type_for((due_date - command.today).num_days());

            if let Some(recent) = self
                .reminder_repository
                .latest_reminder(bill.id, reminder_type)
                .await?
            {
                if command.now - recent.sent_at < Duration::hours(DEDUPE_WINDOW_HOURS) {
                    continue;
                }
            }

            if let Err(e) = self.notifier.notify(&bill, reminder_type, due_date).await {
                error!("Failed to deliver reminder for bill {}: {:#}", bill.id, e);
                continue;
            }
            self.reminder_repository
                .record_reminder(bill.id, reminder_type, command.now)
                .await?;
            sent += 1;
        }

        info!("Reminder sweep for {} sent {} reminders", command.today, sent);
        Ok(sent)
    }

    pub async fn list_reminders(&self, limit: u32) -> DomainResult<Vec<DomainReminder>> {
        Ok(self.reminder_repository.list_reminders(limit).await?)
    }
}

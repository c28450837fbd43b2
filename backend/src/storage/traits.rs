//! # Storage Traits
//!
//! Storage abstractions the domain layer is written against. Services are
//! generic over [`Connection`], which hands out one repository per concern.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{PlayerId, ReminderType};

use crate::domain::models::bill::{BillChanges, DomainBill, NewBill};
use crate::domain::models::gamification::GamificationState;
use crate::domain::models::pay_period::{DomainPayPeriod, PayPeriodSpan};
use crate::domain::models::paycheck::{DomainPaycheck, NewPaycheck, PaycheckChanges};
use crate::domain::models::reminder::DomainReminder;

/// Trait defining the interface for bill storage operations
#[async_trait]
pub trait BillStorage: Send + Sync {
    /// Insert a bill and return it with its assigned id
    async fn store_bill(&self, bill: &NewBill) -> Result<DomainBill>;

    async fn get_bill(&self, id: i64) -> Result<Option<DomainBill>>;

    /// All bills ordered by pay period, due day, then id
    async fn list_bills(&self) -> Result<Vec<DomainBill>>;

    /// Bills of one pay period ordered by due day, then id
    async fn list_bills_for_pay_period(&self, pp_number: i64) -> Result<Vec<DomainBill>>;

    /// Write only the supplied fields in a single statement and return the
    /// new row, or None when no bill has that id
    async fn update_bill(&self, id: i64, changes: &BillChanges) -> Result<Option<DomainBill>>;

    async fn delete_bill(&self, id: i64) -> Result<bool>;

    /// Flip the paid flag in a single statement and return the new row
    async fn toggle_paid(&self, id: i64) -> Result<Option<DomainBill>>;

    /// Replace every bill and pay period in one transaction.
    /// Returns the number of bills written.
    async fn replace_all_bills(&self, bills: &[NewBill], pay_periods: &[PayPeriodSpan]) -> Result<usize>;

    /// Distinct bill names in alphabetical order
    async fn list_bill_names(&self) -> Result<Vec<String>>;
}

/// Trait defining the interface for pay period storage operations
#[async_trait]
pub trait PayPeriodStorage: Send + Sync {
    /// All pay periods ordered by pp_number
    async fn list_pay_periods(&self) -> Result<Vec<DomainPayPeriod>>;

    async fn get_pay_period(&self, pp_number: i64) -> Result<Option<DomainPayPeriod>>;

    /// Insert the pay period unless a row with the same pp_number exists
    async fn ensure_pay_period(&self, span: &PayPeriodSpan) -> Result<DomainPayPeriod>;
}

/// Trait defining the interface for paycheck storage operations
#[async_trait]
pub trait PaycheckStorage: Send + Sync {
    async fn store_paycheck(&self, paycheck: &NewPaycheck) -> Result<DomainPaycheck>;

    async fn get_paycheck(&self, id: i64) -> Result<Option<DomainPaycheck>>;

    /// All paychecks ordered by id
    async fn list_paychecks(&self) -> Result<Vec<DomainPaycheck>>;

    /// Write only the supplied fields and return the new row
    async fn update_paycheck(&self, id: i64, changes: &PaycheckChanges) -> Result<Option<DomainPaycheck>>;

    async fn delete_paycheck(&self, id: i64) -> Result<bool>;
}

/// Trait defining the interface for the append-only reminder log
#[async_trait]
pub trait ReminderStorage: Send + Sync {
    async fn record_reminder(
        &self,
        bill_id: i64,
        reminder_type: ReminderType,
        sent_at: DateTime<Utc>,
    ) -> Result<DomainReminder>;

    /// Most recent reminder of a given type for a bill
    async fn latest_reminder(
        &self,
        bill_id: i64,
        reminder_type: ReminderType,
    ) -> Result<Option<DomainReminder>>;

    /// Newest reminders first
    async fn list_reminders(&self, limit: u32) -> Result<Vec<DomainReminder>>;
}

/// Trait defining the interface for the persisted gamification state
#[async_trait]
pub trait GamificationStorage: Send + Sync {
    /// Load the stored state. A missing or corrupt document reads as the default.
    async fn load_state(&self) -> Result<GamificationState>;

    /// Add points to one player as a single read-modify-write and return the new state
    async fn award_points(&self, player: PlayerId, points: u32) -> Result<GamificationState>;
}

/// Connection trait that abstracts the storage backend
///
/// Each repository type is tied to the connection that creates it, so a
/// service holding a `C: Connection` can build whatever repositories it needs.
pub trait Connection: Send + Sync + Clone + 'static {
    type BillRepository: BillStorage + Clone;
    type PayPeriodRepository: PayPeriodStorage + Clone;
    type PaycheckRepository: PaycheckStorage + Clone;
    type ReminderRepository: ReminderStorage + Clone;
    type GamificationRepository: GamificationStorage + Clone;

    fn create_bill_repository(&self) -> Self::BillRepository;
    fn create_pay_period_repository(&self) -> Self::PayPeriodRepository;
    fn create_paycheck_repository(&self) -> Self::PaycheckRepository;
    fn create_reminder_repository(&self) -> Self::ReminderRepository;
    fn create_gamification_repository(&self) -> Self::GamificationRepository;
}

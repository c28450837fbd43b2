//! # Domain Module
//!
//! Business logic of the budgeting backend. Pure computations (summary,
//! snowball, unlocks, reconcile, ingest, pay-period calendar) sit beside the
//! services that load data through the storage traits and call them.

pub mod bill_service;
pub mod budget_service;
pub mod calendar;
pub mod commands;
pub mod error;
pub mod gamification_service;
pub mod ingest;
pub mod models;
pub mod pay_period;
pub mod paycheck_service;
pub mod reconcile;
pub mod reminder_service;
pub mod snowball;
pub mod summary;
pub mod unlocks;

pub use bill_service::BillService;
pub use budget_service::BudgetService;
pub use calendar::CalendarService;
pub use error::{DomainError, DomainResult};
pub use gamification_service::GamificationService;
pub use pay_period::PayPeriodCalendar;
pub use paycheck_service::PaycheckService;
pub use reminder_service::{LogNotifier, ReminderNotifier, ReminderService};

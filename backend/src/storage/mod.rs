//! # Storage Module
//!
//! Persistence for bills, pay periods, paychecks, reminders and the
//! gamification state. Everything lives in one SQLite database accessed
//! through SQLx; domain services only see the traits in [`traits`].
//!
//! - **connection**: pool setup, schema creation and the repository factory
//! - **traits**: storage abstractions the domain layer depends on
//! - **repositories**: SQLite implementations of those traits

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{
    BillRepository, GamificationRepository, PayPeriodRepository, PaycheckRepository,
    ReminderRepository,
};
pub use traits::*;

//! Conversions between `shared` DTOs and domain types.

pub mod bill_mapper;
pub mod gamification_mapper;
pub mod pay_period_mapper;
pub mod paycheck_mapper;
pub mod reminder_mapper;

pub use bill_mapper::BillMapper;
pub use gamification_mapper::GamificationMapper;
pub use pay_period_mapper::PayPeriodMapper;
pub use paycheck_mapper::PaycheckMapper;
pub use reminder_mapper::ReminderMapper;

use chrono::{DateTime, Utc};
use shared::ReminderType;

/// Append-only record of a reminder that was sent for a bill
#[derive(Debug, Clone, PartialEq)]
pub struct DomainReminder {
    pub id: i64,
    /// Weak reference; the bill may have been deleted since
    pub bill_id: i64,
    pub sent_at: DateTime<Utc>,
    pub reminder_type: ReminderType,
}

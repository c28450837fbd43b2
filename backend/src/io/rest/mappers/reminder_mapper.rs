use shared::Reminder;

use crate::domain::models::reminder::DomainReminder;

pub struct ReminderMapper;

impl ReminderMapper {
    pub fn to_dto(domain: DomainReminder) -> Reminder {
        Reminder {
            id: domain.id,
            bill_id: domain.bill_id,
            sent_at: domain.sent_at,
            reminder_type: domain.reminder_type,
        }
    }

    pub fn to_dto_list(domain_reminders: Vec<DomainReminder>) -> Vec<Reminder> {
        domain_reminders.into_iter().map(Self::to_dto).collect()
    }
}

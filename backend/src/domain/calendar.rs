//! Calendar feed of bill due dates and pay period boundaries.

use shared::CalendarEvent;
use std::sync::Arc;
use tracing::warn;

use crate::domain::error::DomainResult;
use crate::domain::pay_period::PayPeriodCalendar;
use crate::storage::{BillStorage, Connection, PayPeriodStorage};

#[derive(Clone)]
pub struct CalendarService<C: Connection> {
    bill_repository: C::BillRepository,
    pay_period_repository: C::PayPeriodRepository,
    calendar: PayPeriodCalendar,
}

impl<C: Connection> CalendarService<C> {
    pub fn new(connection: Arc<C>, calendar: PayPeriodCalendar) -> Self {
        Self {
            bill_repository: connection.create_bill_repository(),
            pay_period_repository: connection.create_pay_period_repository(),
            calendar,
        }
    }

    /// Pay period and bill events ordered by date. On the same date a pay
    /// period event comes before bill events.
    pub async fn events(&self) -> DomainResult<Vec<CalendarEvent>> {
        let pay_periods = self.pay_period_repository.list_pay_periods().await?;
        let bills = self.bill_repository.list_bills().await?;

        let mut events: Vec<CalendarEvent> = pay_periods
            .into_iter()
            .map(|period| CalendarEvent::PayPeriod {
                title: format!("PP {}", period.pp_number),
                pp_number: period.pp_number,
                start_date: period.start_date,
                end_date: period.end_date,
            })
            .collect();

        for bill in bills {
            let date = match self.calendar.due_date(bill.pay_period, bill.due_day) {
                Ok(date) => date,
                Err(e) => {
                    warn!("Leaving bill {} off the calendar: {}", bill.id, e);
                    continue;
                }
            };
            events.push(CalendarEvent::Bill {
                id: bill.id,
                title: bill.name,
                date,
                amount: bill.amount,
                bill_class: bill.bill_class,
                paid: bill.paid,
                pay_period: bill.pay_period,
            });
        }

        events.sort_by_key(CalendarEvent::sort_date);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayPeriodAnchor;
    use crate::domain::bill_service::BillService;
    use crate::domain::commands::bills::CreateBillCommand;
    use crate::storage::DbConnection;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_events_are_ordered_by_date() {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let calendar = PayPeriodCalendar::new(PayPeriodAnchor::default());
        let bills = BillService::new(db.clone(), calendar);
        let service = CalendarService::new(db, calendar);

        for (name, due_day, pp) in [("Late", 31, 17), ("Early", 4, 17), ("Next", 20, 18)] {
            bills
                .create_bill(CreateBillCommand {
                    name: name.to_string(),
                    month: None,
                    amount: dec!(10),
                    due_day,
                    bill_class: "Comfort".to_string(),
                    pay_period: pp,
                    paid: false,
                })
                .await
                .unwrap();
        }

        let events = service.events().await.unwrap();
        let dates: Vec<NaiveDate> = events.iter().map(CalendarEvent::sort_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);

        // PP 17 starts 2025-08-04, the same day as "Early"
        assert!(matches!(&events[0], CalendarEvent::PayPeriod { pp_number: 17, .. }));
        assert!(matches!(&events[1], CalendarEvent::Bill { title, .. } if title == "Early"));

        let json = serde_json::to_value(&events[1]).unwrap();
        assert_eq!(json["type"], "bill");
        assert_eq!(json["date"], "2025-08-04");
        let last = serde_json::to_value(events.last().unwrap()).unwrap();
        assert_eq!(last["title"], "Late");
        assert_eq!(last["date"], "2025-08-31");
    }
}

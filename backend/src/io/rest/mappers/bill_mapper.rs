use shared::{Bill, CreateBillRequest, IngestResponse, UpdateBillRequest};

use crate::domain::commands::bills::{CreateBillCommand, IngestResult, UpdateBillCommand};
use crate::domain::models::bill::DomainBill;

pub struct BillMapper;

impl BillMapper {
    /// Convert domain DomainBill to shared Bill DTO
    pub fn to_dto(domain: DomainBill) -> Bill {
        Bill {
            id: domain.id,
            name: domain.name,
            month: domain.month,
            amount: domain.amount,
            due_day: domain.due_day,
            bill_class: domain.bill_class,
            pay_period: domain.pay_period,
            paid: domain.paid,
        }
    }

    pub fn to_dto_list(domain_bills: Vec<DomainBill>) -> Vec<Bill> {
        domain_bills.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateBillRequest) -> CreateBillCommand {
        CreateBillCommand {
            name: request.name,
            month: request.month,
            amount: request.amount,
            due_day: request.due_day,
            bill_class: request.bill_class,
            pay_period: request.pay_period,
            paid: request.paid.unwrap_or(false),
        }
    }

    pub fn to_update_command(request: UpdateBillRequest) -> UpdateBillCommand {
        UpdateBillCommand {
            name: request.name,
            month: request.month,
            amount: request.amount,
            due_day: request.due_day,
            bill_class: request.bill_class,
            pay_period: request.pay_period,
            paid: request.paid,
        }
    }

    pub fn to_ingest_response(result: IngestResult) -> IngestResponse {
        IngestResponse {
            ingested_rows: result.ingested_rows,
            pay_periods: result.pay_periods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::BillClass;

    #[test]
    fn test_bill_serializes_with_dashboard_keys() {
        let dto = BillMapper::to_dto(DomainBill {
            id: 3,
            name: "Rent".to_string(),
            month: None,
            amount: dec!(1800.00),
            due_day: 1,
            bill_class: BillClass::Housing,
            pay_period: 17,
            paid: false,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["bill_class"], "Housing");
        assert_eq!(json["amount"], 1800.0);
        assert_eq!(json["paid"], false);
    }

    #[test]
    fn test_create_command_defaults_paid_to_false() {
        let request: CreateBillRequest = serde_json::from_str(
            r#"{"name":"Gym","amount":25.5,"due_day":4,"bill_class":"Comfort","pay_period":18}"#,
        )
        .unwrap();

        let command = BillMapper::to_create_command(request);
        assert!(!command.paid);
        assert_eq!(command.amount, dec!(25.5));
        assert_eq!(command.bill_class, "Comfort");
    }
}

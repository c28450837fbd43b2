use shared::PayPeriod;

use crate::domain::models::pay_period::DomainPayPeriod;

pub struct PayPeriodMapper;

impl PayPeriodMapper {
    pub fn to_dto(domain: DomainPayPeriod) -> PayPeriod {
        PayPeriod {
            id: domain.id,
            pp_number: domain.pp_number,
            start_date: domain.start_date,
            end_date: domain.end_date,
        }
    }

    pub fn to_dto_list(domain_periods: Vec<DomainPayPeriod>) -> Vec<PayPeriod> {
        domain_periods.into_iter().map(Self::to_dto).collect()
    }
}

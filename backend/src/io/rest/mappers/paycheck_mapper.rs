use shared::{CreatePaycheckRequest, Paycheck, UpdatePaycheckRequest};

use crate::domain::commands::paychecks::{CreatePaycheckCommand, UpdatePaycheckCommand};
use crate::domain::models::paycheck::DomainPaycheck;

pub struct PaycheckMapper;

impl PaycheckMapper {
    pub fn to_dto(domain: DomainPaycheck) -> Paycheck {
        Paycheck {
            id: domain.id,
            source: domain.source,
            amount: domain.amount,
            player_id: domain.player_id,
        }
    }

    pub fn to_dto_list(domain_paychecks: Vec<DomainPaycheck>) -> Vec<Paycheck> {
        domain_paychecks.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreatePaycheckRequest) -> CreatePaycheckCommand {
        CreatePaycheckCommand {
            source: request.source,
            amount: request.amount,
            player_id: request.player_id,
        }
    }

    pub fn to_update_command(request: UpdatePaycheckRequest) -> UpdatePaycheckCommand {
        UpdatePaycheckCommand {
            source: request.source,
            amount: request.amount,
            player_id: request.player_id,
        }
    }
}

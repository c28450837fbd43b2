use shared::PlayerId;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::paychecks::{CreatePaycheckCommand, UpdatePaycheckCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::paycheck::{DomainPaycheck, NewPaycheck, PaycheckChanges};
use crate::storage::{Connection, PaycheckStorage};

/// Paycheck CRUD
#[derive(Clone)]
pub struct PaycheckService<C: Connection> {
    paycheck_repository: C::PaycheckRepository,
}

impl<C: Connection> PaycheckService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            paycheck_repository: connection.create_paycheck_repository(),
        }
    }

    pub async fn list_paychecks(&self) -> DomainResult<Vec<DomainPaycheck>> {
        Ok(self.paycheck_repository.list_paychecks().await?)
    }

    pub async fn get_paycheck(&self, id: i64) -> DomainResult<DomainPaycheck> {
        self.paycheck_repository
            .get_paycheck(id)
            .await?
            .ok_or_else(|| paycheck_not_found(id))
    }

    pub async fn create_paycheck(&self, command: CreatePaycheckCommand) -> DomainResult<DomainPaycheck> {
        info!("Creating paycheck: {:?}", command);

        let new_paycheck = NewPaycheck {
            source: command.source.trim().to_string(),
            amount: command.amount,
            player_id: PlayerId::from_str(&command.player_id)?,
        };
        new_paycheck.validate()?;

        Ok(self.paycheck_repository.store_paycheck(&new_paycheck).await?)
    }

    pub async fn update_paycheck(
        &self,
        id: i64,
        command: UpdatePaycheckCommand,
    ) -> DomainResult<DomainPaycheck> {
        info!("Updating paycheck {}: {:?}", id, command);

        let changes = PaycheckChanges {
            source: command.source.map(|source| source.trim().to_string()),
            amount: command.amount,
            player_id: command
                .player_id
                .as_deref()
                .map(PlayerId::from_str)
                .transpose()?,
        };
        changes.validate()?;

        self.paycheck_repository
            .update_paycheck(id, &changes)
            .await?
            .ok_or_else(|| paycheck_not_found(id))
    }

    pub async fn delete_paycheck(&self, id: i64) -> DomainResult<()> {
        info!("Deleting paycheck {}", id);
        if self.paycheck_repository.delete_paycheck(id).await? {
            Ok(())
        } else {
            Err(paycheck_not_found(id))
        }
    }
}

fn paycheck_not_found(id: i64) -> DomainError {
    DomainError::not_found(format!("Paycheck {} not found", id))
}

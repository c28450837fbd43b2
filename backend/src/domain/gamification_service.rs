//! Points ledger for the two budget players.
//!
//! Completing a task awards its points to a player; every 100 points unlock
//! one dollar of spending money. The state is read-modify-written atomically
//! by the storage layer.

use shared::{GamificationTask, PlayerId, PlayerState, TaskPoints};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::gamification::CompleteTaskCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::gamification::{spending_money_for, task_points, GamificationState, TASK_POINTS};
use crate::storage::{BillStorage, Connection, GamificationStorage};

/// Task type offered for each unpaid bill
pub const PAY_BILL_TASK: &str = "pay_bill";

#[derive(Clone)]
pub struct GamificationService<C: Connection> {
    gamification_repository: C::GamificationRepository,
    bill_repository: C::BillRepository,
}

impl<C: Connection> GamificationService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            gamification_repository: connection.create_gamification_repository(),
            bill_repository: connection.create_bill_repository(),
        }
    }

    /// Current state of both players. Storage failures degrade to the default state.
    pub async fn status(&self) -> GamificationState {
        match self.gamification_repository.load_state().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Could not read gamification state, using defaults: {:#}", e);
                GamificationState::default()
            }
        }
    }

    /// Award the points for `task_type` to a player and return their new record
    pub async fn complete_task(&self, command: CompleteTaskCommand) -> DomainResult<PlayerState> {
        info!("Completing task: {:?}", command);

        let player = PlayerId::from_str(&command.player_id)
            .map_err(|_| DomainError::validation("Invalid player_id"))?;
        let points = task_points(&command.task_type);
        if points == 0 {
            return Err(DomainError::validation("Invalid task_type"));
        }

        let state = self.gamification_repository.award_points(player, points).await?;
        let record = player_state(&state, player);

        info!(
            "{} earned {} points for {} (total {})",
            player, points, command.task_type, record.points
        );
        Ok(record)
    }

    /// Unpaid bills offered as pay_bill tasks
    pub async fn tasks(&self) -> DomainResult<Vec<GamificationTask>> {
        let bills = self.bill_repository.list_bills().await?;
        let points = task_points(PAY_BILL_TASK);

        Ok(bills
            .into_iter()
            .filter(|bill| !bill.paid)
            .map(|bill| GamificationTask {
                id: bill.id,
                name: bill.name,
                amount: bill.amount,
                due_day: bill.due_day,
                bill_class: bill.bill_class,
                pay_period: bill.pay_period,
                task_type: PAY_BILL_TASK.to_string(),
                points,
            })
            .collect())
    }

    pub fn task_types(&self) -> Vec<TaskPoints> {
        TASK_POINTS
            .iter()
            .map(|(task_type, points)| TaskPoints {
                task_type: task_type.to_string(),
                points: *points,
            })
            .collect()
    }
}

pub fn player_state(state: &GamificationState, player: PlayerId) -> PlayerState {
    let points = state.points(player);
    PlayerState {
        points,
        spending_money: spending_money_for(points),
    }
}

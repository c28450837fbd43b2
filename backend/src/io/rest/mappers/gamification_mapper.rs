use shared::{CompleteTaskRequest, GamificationStatus, PlayerId};

use crate::domain::commands::gamification::CompleteTaskCommand;
use crate::domain::gamification_service::player_state;
use crate::domain::models::gamification::GamificationState;

pub struct GamificationMapper;

impl GamificationMapper {
    pub fn to_status_dto(state: &GamificationState) -> GamificationStatus {
        GamificationStatus {
            player1: player_state(state, PlayerId::Player1),
            player2: player_state(state, PlayerId::Player2),
        }
    }

    pub fn to_complete_task_command(request: CompleteTaskRequest) -> CompleteTaskCommand {
        CompleteTaskCommand {
            player_id: request.player_id,
            task_type: request.task_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_derives_spending_money() {
        let state = GamificationState {
            player1_points: 250,
            player2_points: 99,
        };

        let status = GamificationMapper::to_status_dto(&state);
        assert_eq!(status.player1.points, 250);
        assert_eq!(status.player1.spending_money, dec!(2));
        assert_eq!(status.player2.spending_money, dec!(0));
    }
}

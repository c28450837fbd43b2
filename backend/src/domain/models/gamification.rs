use rust_decimal::Decimal;
use serde_json::{json, Value};
use shared::PlayerId;
use tracing::warn;

/// Every `POINTS_PER_DOLLAR` points unlock one dollar of spending money
pub const POINTS_PER_DOLLAR: u64 = 100;

/// Points awarded per completed task type
pub const TASK_POINTS: [(&str, u32); 4] = [
    ("pay_bill", 10),
    ("reconcile", 20),
    ("forecast", 15),
    ("edit_budget", 5),
];

/// Points for `task_type`; unknown task types are worth nothing
pub fn task_points(task_type: &str) -> u32 {
    TASK_POINTS
        .iter()
        .find(|(name, _)| *name == task_type)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Whole dollars unlocked by `points`
pub fn spending_money_for(points: u64) -> Decimal {
    Decimal::from(points / POINTS_PER_DOLLAR)
}

/// Durable point totals for both players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamificationState {
    pub player1_points: u64,
    pub player2_points: u64,
}

impl GamificationState {
    pub fn points(&self, player: PlayerId) -> u64 {
        match player {
            PlayerId::Player1 => self.player1_points,
            PlayerId::Player2 => self.player2_points,
        }
    }

    /// Add `points` to `player` and return the new total
    pub fn award(&mut self, player: PlayerId, points: u32) -> u64 {
        let slot = match player {
            PlayerId::Player1 => &mut self.player1_points,
            PlayerId::Player2 => &mut self.player2_points,
        };
        *slot = slot.saturating_add(u64::from(points));
        *slot
    }

    /// Decode the stored document.
    ///
    /// A missing document, unparseable JSON or a malformed player entry
    /// yields zero points for the affected player(s). Only `points` is read;
    /// spending money is always re-derived.
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let document: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Gamification state is corrupt, using defaults: {}", e);
                return Self::default();
            }
        };

        let read_points = |player: PlayerId| -> u64 {
            match document.get(player.as_str()).and_then(|p| p.get("points")) {
                Some(points) => points.as_u64().unwrap_or_else(|| {
                    warn!("Invalid points for {} in gamification state: {}", player, points);
                    0
                }),
                None => 0,
            }
        };

        Self {
            player1_points: read_points(PlayerId::Player1),
            player2_points: read_points(PlayerId::Player2),
        }
    }

    /// Encode as the stored document, keyed by player id
    pub fn to_stored(&self) -> String {
        let mut document = serde_json::Map::new();
        for player in PlayerId::ALL {
            let points = self.points(player);
            document.insert(
                player.as_str().to_string(),
                json!({
                    "points": points,
                    "spending_money": spending_money_for(points),
                }),
            );
        }
        Value::Object(document).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_task_point_table() {
        assert_eq!(task_points("pay_bill"), 10);
        assert_eq!(task_points("reconcile"), 20);
        assert_eq!(task_points("forecast"), 15);
        assert_eq!(task_points("edit_budget"), 5);
        assert_eq!(task_points("unknown"), 0);
        assert_eq!(task_points("PAY_BILL"), 0);
    }

    #[test]
    fn test_spending_money_is_floored_whole_dollars() {
        assert_eq!(spending_money_for(0), dec!(0));
        assert_eq!(spending_money_for(99), dec!(0));
        assert_eq!(spending_money_for(100), dec!(1));
        assert_eq!(spending_money_for(255), dec!(2));
    }

    #[test]
    fn test_from_stored_degrades_to_default() {
        assert_eq!(GamificationState::from_stored(None), GamificationState::default());
        assert_eq!(
            GamificationState::from_stored(Some("{not json")),
            GamificationState::default()
        );

        let partial = r#"{"player1": {"points": 40, "spending_money": 99.0}, "player2": {"points": "lots"}}"#;
        let state = GamificationState::from_stored(Some(partial));
        assert_eq!(state.player1_points, 40);
        assert_eq!(state.player2_points, 0);
    }

    #[test]
    fn test_stored_document_round_trips_points() {
        let mut state = GamificationState::default();
        state.award(PlayerId::Player2, 20);
        state.award(PlayerId::Player2, 100);

        let raw = state.to_stored();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["player2"]["points"], 120);
        assert_eq!(value["player1"]["points"], 0);

        assert_eq!(GamificationState::from_stored(Some(&raw)), state);
    }
}

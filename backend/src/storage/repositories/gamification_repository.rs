use anyhow::Result;
use async_trait::async_trait;
use shared::PlayerId;
use tracing::debug;

use crate::domain::models::gamification::GamificationState;
use crate::storage::connection::DbConnection;
use crate::storage::traits::GamificationStorage;

/// Key of the gamification document in the key/value table
pub const GAMIFICATION_STATE_KEY: &str = "gamification_state";

/// Stores the gamification state as one JSON document in `key_values`
#[derive(Clone)]
pub struct GamificationRepository {
    db: DbConnection,
}

impl GamificationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GamificationStorage for GamificationRepository {
    async fn load_state(&self) -> Result<GamificationState> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM key_values WHERE key = ?")
            .bind(GAMIFICATION_STATE_KEY)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(GamificationState::from_stored(raw.as_deref()))
    }

    async fn award_points(&self, player: PlayerId, points: u32) -> Result<GamificationState> {
        let _guard = self.db.kv_write_lock().lock().await;
        let mut tx = self.db.pool().begin().await?;

        // Writing first takes SQLite's write lock before the read below
        sqlx::query("INSERT OR IGNORE INTO key_values (key, value) VALUES (?, ?)")
            .bind(GAMIFICATION_STATE_KEY)
            .bind(GamificationState::default().to_stored())
            .execute(&mut *tx)
            .await?;

        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM key_values WHERE key = ?")
            .bind(GAMIFICATION_STATE_KEY)
            .fetch_optional(&mut *tx)
            .await?;

        let mut state = GamificationState::from_stored(raw.as_deref());
        let total = state.award(player, points);

        sqlx::query("UPDATE key_values SET value = ? WHERE key = ?")
            .bind(state.to_stored())
            .bind(GAMIFICATION_STATE_KEY)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("{} now has {} points", player, total);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> GamificationRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        GamificationRepository::new(db)
    }

    #[tokio::test]
    async fn test_missing_state_loads_as_default() {
        let repo = setup_test().await;
        let state = repo.load_state().await.unwrap();
        assert_eq!(state, GamificationState::default());
    }

    #[tokio::test]
    async fn test_award_points_persists() {
        let repo = setup_test().await;

        repo.award_points(PlayerId::Player1, 10).await.unwrap();
        let state = repo.award_points(PlayerId::Player1, 20).await.unwrap();
        assert_eq!(state.points(PlayerId::Player1), 30);
        assert_eq!(state.points(PlayerId::Player2), 0);

        let reloaded = repo.load_state().await.unwrap();
        assert_eq!(reloaded, state);
    }

    #[tokio::test]
    async fn test_corrupt_state_is_replaced_on_next_award() {
        let repo = setup_test().await;
        sqlx::query("INSERT INTO key_values (key, value) VALUES (?, ?)")
            .bind(GAMIFICATION_STATE_KEY)
            .bind("{not json")
            .execute(repo.db.pool())
            .await
            .unwrap();

        assert_eq!(repo.load_state().await.unwrap(), GamificationState::default());

        let state = repo.award_points(PlayerId::Player2, 15).await.unwrap();
        assert_eq!(state.points(PlayerId::Player2), 15);
    }

    #[tokio::test]
    async fn test_concurrent_awards_are_not_lost() {
        let repo = setup_test().await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.award_points(PlayerId::Player1, 5).await
            }));
        }
        for handle in handles {
            handle.await.expect("task panicked").expect("award failed");
        }

        let state = repo.load_state().await.unwrap();
        assert_eq!(state.points(PlayerId::Player1), 100);
    }
}

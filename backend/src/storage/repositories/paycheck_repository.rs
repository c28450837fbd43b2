use anyhow::Result;
use async_trait::async_trait;
use shared::PlayerId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use super::decode_amount;
use crate::domain::models::paycheck::{DomainPaycheck, NewPaycheck, PaycheckChanges};
use crate::storage::connection::DbConnection;
use crate::storage::traits::PaycheckStorage;

#[derive(Clone)]
pub struct PaycheckRepository {
    db: DbConnection,
}

impl PaycheckRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_paycheck(row: &SqliteRow) -> Result<DomainPaycheck> {
        let amount: String = row.try_get("amount")?;
        let player_id: String = row.try_get("player_id")?;

        Ok(DomainPaycheck {
            id: row.try_get("id")?,
            source: row.try_get("source")?,
            amount: decode_amount(&amount)?,
            player_id: PlayerId::from_str(&player_id)?,
        })
    }
}

#[async_trait]
impl PaycheckStorage for PaycheckRepository {
    async fn store_paycheck(&self, paycheck: &NewPaycheck) -> Result<DomainPaycheck> {
        let result = sqlx::query("INSERT INTO paychecks (source, amount, player_id) VALUES (?, ?, ?)")
            .bind(&paycheck.source)
            .bind(paycheck.amount.to_string())
            .bind(paycheck.player_id.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(DomainPaycheck {
            id: result.last_insert_rowid(),
            source: paycheck.source.clone(),
            amount: paycheck.amount,
            player_id: paycheck.player_id,
        })
    }

    async fn get_paycheck(&self, id: i64) -> Result<Option<DomainPaycheck>> {
        let row = sqlx::query("SELECT id, source, amount, player_id FROM paychecks WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_paycheck).transpose()
    }

    async fn list_paychecks(&self) -> Result<Vec<DomainPaycheck>> {
        let rows = sqlx::query("SELECT id, source, amount, player_id FROM paychecks ORDER BY id ASC")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_paycheck).collect()
    }

    async fn update_paycheck(&self, id: i64, changes: &PaycheckChanges) -> Result<Option<DomainPaycheck>> {
        let row = sqlx::query(
            "UPDATE paychecks
             SET source = COALESCE(?, source), amount = COALESCE(?, amount), player_id = COALESCE(?, player_id)
             WHERE id = ?
             RETURNING id, source, amount, player_id",
        )
        .bind(changes.source.as_deref())
        .bind(changes.amount.map(|a| a.to_string()))
        .bind(changes.player_id.as_ref().map(|p| p.as_str()))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_paycheck).transpose()
    }

    async fn delete_paycheck(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM paychecks WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_paycheck_crud() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = PaycheckRepository::new(db);

        let stored = repo
            .store_paycheck(&NewPaycheck {
                source: "Employer".to_string(),
                amount: dec!(2100.55),
                player_id: PlayerId::Player2,
            })
            .await
            .expect("Failed to store paycheck");

        let listed = repo.list_paychecks().await.unwrap();
        assert_eq!(listed, vec![stored.clone()]);

        let changes = PaycheckChanges { amount: Some(dec!(2200)), ..Default::default() };
        let updated = repo.update_paycheck(stored.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.source, "Employer");
        let fetched = repo.get_paycheck(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.amount, dec!(2200));
        assert_eq!(fetched.player_id, PlayerId::Player2);

        assert!(repo.delete_paycheck(stored.id).await.unwrap());
        assert!(repo.get_paycheck(stored.id).await.unwrap().is_none());
        assert!(!repo.delete_paycheck(stored.id).await.unwrap());
        assert!(repo.update_paycheck(stored.id, &changes).await.unwrap().is_none());
    }
}

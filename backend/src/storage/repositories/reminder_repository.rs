use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use shared::ReminderType;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use crate::domain::models::reminder::DomainReminder;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ReminderStorage;

/// Fixed-width UTC format so stored timestamps sort lexicographically
const SENT_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

#[derive(Clone)]
pub struct ReminderRepository {
    db: DbConnection,
}

impl ReminderRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn encode_sent_at(sent_at: &DateTime<Utc>) -> String {
        sent_at.format(SENT_AT_FORMAT).to_string()
    }

    fn decode_sent_at(raw: &str) -> Result<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(raw, SENT_AT_FORMAT)
            .with_context(|| format!("Invalid stored reminder timestamp '{}'", raw))?;
        Ok(naive.and_utc())
    }

    fn row_to_reminder(row: &SqliteRow) -> Result<DomainReminder> {
        let sent_at: String = row.try_get("sent_at")?;
        let reminder_type: String = row.try_get("reminder_type")?;

        Ok(DomainReminder {
            id: row.try_get("id")?,
            bill_id: row.try_get("bill_id")?,
            sent_at: Self::decode_sent_at(&sent_at)?,
            reminder_type: ReminderType::from_str(&reminder_type)?,
        })
    }
}

#[async_trait]
impl ReminderStorage for ReminderRepository {
    async fn record_reminder(
        &self,
        bill_id: i64,
        reminder_type: ReminderType,
        sent_at: DateTime<Utc>,
    ) -> Result<DomainReminder> {
        let encoded = Self::encode_sent_at(&sent_at);
        let result = sqlx::query("INSERT INTO reminders (bill_id, sent_at, reminder_type) VALUES (?, ?, ?)")
            .bind(bill_id)
            .bind(&encoded)
            .bind(reminder_type.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(DomainReminder {
            id: result.last_insert_rowid(),
            bill_id,
            // Round-trip through the stored form so callers see what was persisted
            sent_at: Self::decode_sent_at(&encoded)?,
            reminder_type,
        })
    }

    async fn latest_reminder(
        &self,
        bill_id: i64,
        reminder_type: ReminderType,
    ) -> Result<Option<DomainReminder>> {
        let row = sqlx::query(
            "SELECT id, bill_id, sent_at, reminder_type FROM reminders
             WHERE bill_id = ? AND reminder_type = ?
             ORDER BY sent_at DESC, id DESC
             LIMIT 1",
        )
        .bind(bill_id)
        .bind(reminder_type.as_str())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_reminder).transpose()
    }

    async fn list_reminders(&self, limit: u32) -> Result<Vec<DomainReminder>> {
        let rows = sqlx::query(
            "SELECT id, bill_id, sent_at, reminder_type FROM reminders
             ORDER BY sent_at DESC, id DESC
             LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_reminder).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_latest_reminder_is_per_bill_and_type() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ReminderRepository::new(db);
        let base = Utc.with_ymd_and_hms(2025, 8, 10, 9, 0, 0).unwrap();

        repo.record_reminder(1, ReminderType::DueSoon, base).await.unwrap();
        let newer = repo
            .record_reminder(1, ReminderType::DueSoon, base + Duration::hours(30))
            .await
            .unwrap();
        repo.record_reminder(1, ReminderType::DueIn3Days, base + Duration::hours(40))
            .await
            .unwrap();
        repo.record_reminder(2, ReminderType::DueSoon, base + Duration::hours(50))
            .await
            .unwrap();

        let latest = repo.latest_reminder(1, ReminderType::DueSoon).await.unwrap().unwrap();
        assert_eq!(latest, newer);
        assert_eq!(latest.sent_at, base + Duration::hours(30));

        assert!(repo.latest_reminder(3, ReminderType::DueSoon).await.unwrap().is_none());

        let all = repo.list_reminders(10).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].bill_id, 2);
        assert_eq!(repo.list_reminders(2).await.unwrap().len(), 2);
    }
}

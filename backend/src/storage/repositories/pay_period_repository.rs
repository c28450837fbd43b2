use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::pay_period::{DomainPayPeriod, PayPeriodSpan};
use crate::storage::connection::DbConnection;
use crate::storage::traits::PayPeriodStorage;

#[derive(Clone)]
pub struct PayPeriodRepository {
    db: DbConnection,
}

impl PayPeriodRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_pay_period(row: &SqliteRow) -> Result<DomainPayPeriod> {
        Ok(DomainPayPeriod {
            id: row.try_get("id")?,
            pp_number: row.try_get("pp_number")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        })
    }
}

#[async_trait]
impl PayPeriodStorage for PayPeriodRepository {
    async fn list_pay_periods(&self) -> Result<Vec<DomainPayPeriod>> {
        let rows = sqlx::query(
            "SELECT id, pp_number, start_date, end_date FROM pay_periods ORDER BY pp_number ASC",
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_pay_period).collect()
    }

    async fn get_pay_period(&self, pp_number: i64) -> Result<Option<DomainPayPeriod>> {
        let row = sqlx::query(
            "SELECT id, pp_number, start_date, end_date FROM pay_periods WHERE pp_number = ?",
        )
        .bind(pp_number)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_pay_period).transpose()
    }

    async fn ensure_pay_period(&self, span: &PayPeriodSpan) -> Result<DomainPayPeriod> {
        let row = sqlx::query(
            "INSERT INTO pay_periods (pp_number, start_date, end_date) VALUES (?, ?, ?)
             ON CONFLICT(pp_number) DO UPDATE SET pp_number = excluded.pp_number
             RETURNING id, pp_number, start_date, end_date",
        )
        .bind(span.pp_number)
        .bind(span.start_date)
        .bind(span.end_date)
        .fetch_one(self.db.pool())
        .await?;

        Self::row_to_pay_period(&row)
    }
}

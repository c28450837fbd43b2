use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::BillClass;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::info;

use super::decode_amount;
use crate::domain::models::bill::{BillChanges, DomainBill, NewBill};
use crate::domain::models::pay_period::PayPeriodSpan;
use crate::storage::connection::DbConnection;
use crate::storage::traits::BillStorage;

const BILL_COLUMNS: &str = "id, name, month, amount, due_day, bill_class, pay_period, paid";

/// Repository for bill rows in SQLite
#[derive(Clone)]
pub struct BillRepository {
    db: DbConnection,
}

impl BillRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_bill(row: &SqliteRow) -> Result<DomainBill> {
        let amount: String = row.try_get("amount")?;
        let bill_class: String = row.try_get("bill_class")?;
        let due_day: i64 = row.try_get("due_day")?;

        Ok(DomainBill {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            month: row.try_get("month")?,
            amount: decode_amount(&amount)?,
            due_day: u32::try_from(due_day)
                .with_context(|| format!("Invalid stored due day {}", due_day))?,
            bill_class: BillClass::from_str(&bill_class)?,
            pay_period: row.try_get("pay_period")?,
            paid: row.try_get("paid")?,
        })
    }
}

#[async_trait]
impl BillStorage for BillRepository {
    async fn store_bill(&self, bill: &NewBill) -> Result<DomainBill> {
        let result = sqlx::query(
            "INSERT INTO bills (name, month, amount, due_day, bill_class, pay_period, paid)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&bill.name)
        .bind(&bill.month)
        .bind(bill.amount.to_string())
        .bind(bill.due_day as i64)
        .bind(bill.bill_class.as_str())
        .bind(bill.pay_period)
        .bind(bill.paid)
        .execute(self.db.pool())
        .await?;

        Ok(DomainBill::from_new(result.last_insert_rowid(), bill.clone()))
    }

    async fn get_bill(&self, id: i64) -> Result<Option<DomainBill>> {
        let row = sqlx::query(&format!("SELECT {} FROM bills WHERE id = ?", BILL_COLUMNS))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_bill).transpose()
    }

    async fn list_bills(&self) -> Result<Vec<DomainBill>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bills ORDER BY pay_period ASC, due_day ASC, id ASC",
            BILL_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_bill).collect()
    }

    async fn list_bills_for_pay_period(&self, pp_number: i64) -> Result<Vec<DomainBill>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bills WHERE pay_period = ? ORDER BY due_day ASC, id ASC",
            BILL_COLUMNS
        ))
        .bind(pp_number)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_bill).collect()
    }

    async fn update_bill(&self, id: i64, changes: &BillChanges) -> Result<Option<DomainBill>> {
        let row = sqlx::query(&format!(
            "UPDATE bills
             SET name = COALESCE(?, name), month = COALESCE(?, month), amount = COALESCE(?, amount),
                 due_day = COALESCE(?, due_day), bill_class = COALESCE(?, bill_class),
                 pay_period = COALESCE(?, pay_period), paid = COALESCE(?, paid)
             WHERE id = ?
             RETURNING {}",
            BILL_COLUMNS
        ))
        .bind(changes.name.as_deref())
        .bind(changes.month.as_deref())
        .bind(changes.amount.map(|a| a.to_string()))
        .bind(changes.due_day.map(i64::from))
        .bind(changes.bill_class.as_ref().map(|c| c.as_str()))
        .bind(changes.pay_period)
        .bind(changes.paid)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_bill).transpose()
    }

    async fn delete_bill(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bills WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_paid(&self, id: i64) -> Result<Option<DomainBill>> {
        let row = sqlx::query(&format!(
            "UPDATE bills SET paid = NOT paid WHERE id = ? RETURNING {}",
            BILL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_bill).transpose()
    }

    async fn replace_all_bills(&self, bills: &[NewBill], pay_periods: &[PayPeriodSpan]) -> Result<usize> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM bills").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM pay_periods").execute(&mut *tx).await?;

        for bill in bills {
            sqlx::query(
                "INSERT INTO bills (name, month, amount, due_day, bill_class, pay_period, paid)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&bill.name)
            .bind(&bill.month)
            .bind(bill.amount.to_string())
            .bind(bill.due_day as i64)
            .bind(bill.bill_class.as_str())
            .bind(bill.pay_period)
            .bind(bill.paid)
            .execute(&mut *tx)
            .await?;
        }

        for span in pay_periods {
            sqlx::query("INSERT INTO pay_periods (pp_number, start_date, end_date) VALUES (?, ?, ?)")
                .bind(span.pp_number)
                .bind(span.start_date)
                .bind(span.end_date)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            "Replaced bill data: {} bills across {} pay periods",
            bills.len(),
            pay_periods.len()
        );
        Ok(bills.len())
    }

    async fn list_bill_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT DISTINCT name FROM bills ORDER BY name ASC")
            .fetch_all(self.db.pool())
            .await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::PayPeriodStorage;
    use crate::storage::PayPeriodRepository;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn setup_test() -> BillRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        BillRepository::new(db)
    }

    fn bill(name: &str, due_day: u32, pay_period: i64) -> NewBill {
        NewBill {
            name: name.to_string(),
            month: Some("Aug".to_string()),
            amount: dec!(125.40),
            due_day,
            bill_class: BillClass::Utilities,
            pay_period,
            paid: false,
        }
    }

    fn span(pp_number: i64, start: (i32, u32, u32)) -> PayPeriodSpan {
        let start_date = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        PayPeriodSpan {
            pp_number,
            start_date,
            end_date: start_date + chrono::Duration::days(13),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_bill() {
        let repo = setup_test().await;

        let stored = repo.store_bill(&bill("Power", 12, 17)).await.expect("Failed to store bill");
        assert!(stored.id > 0);

        let fetched = repo.get_bill(stored.id).await.expect("Failed to get bill").unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.amount, dec!(125.40));
        assert_eq!(fetched.bill_class, BillClass::Utilities);

        assert!(repo.get_bill(stored.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bills_for_pay_period_are_ordered_by_due_day_then_id() {
        let repo = setup_test().await;

        let late = repo.store_bill(&bill("Water", 20, 17)).await.unwrap();
        let early_a = repo.store_bill(&bill("Phone", 5, 17)).await.unwrap();
        let early_b = repo.store_bill(&bill("Internet", 5, 17)).await.unwrap();
        repo.store_bill(&bill("Other period", 1, 18)).await.unwrap();

        let bills = repo.list_bills_for_pay_period(17).await.unwrap();
        let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![early_a.id, early_b.id, late.id]);

        assert!(repo.list_bills_for_pay_period(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_bill() {
        let repo = setup_test().await;
        let stored = repo.store_bill(&bill("Gym", 3, 17)).await.unwrap();

        let changes = BillChanges { amount: Some(dec!(49.99)), paid: Some(true), ..Default::default() };
        let updated = repo.update_bill(stored.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.amount, dec!(49.99));
        assert!(updated.paid);
        assert_eq!(updated.name, stored.name);
        assert_eq!(updated.due_day, stored.due_day);
        assert_eq!(repo.get_bill(stored.id).await.unwrap().unwrap(), updated);

        assert!(repo.delete_bill(stored.id).await.unwrap());
        assert!(!repo.delete_bill(stored.id).await.unwrap());

        assert!(repo.update_bill(9999, &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_without_paid_keeps_toggled_flag() {
        let repo = setup_test().await;
        let stored = repo.store_bill(&bill("Water", 12, 17)).await.unwrap();

        repo.toggle_paid(stored.id).await.unwrap();
        let changes = BillChanges { amount: Some(dec!(61.10)), ..Default::default() };
        let updated = repo.update_bill(stored.id, &changes).await.unwrap().unwrap();

        assert!(updated.paid);
        assert_eq!(updated.amount, dec!(61.10));
    }

    #[tokio::test]
    async fn test_toggle_paid_flips_flag() {
        let repo = setup_test().await;
        let stored = repo.store_bill(&bill("Trash", 9, 17)).await.unwrap();

        let toggled = repo.toggle_paid(stored.id).await.unwrap().unwrap();
        assert!(toggled.paid);
        let toggled_back = repo.toggle_paid(stored.id).await.unwrap().unwrap();
        assert!(!toggled_back.paid);

        assert!(repo.toggle_paid(12345).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_all_wipes_previous_rows() {
        let repo = setup_test().await;
        let periods = PayPeriodRepository::new(repo.db.clone());

        repo.store_bill(&bill("Stale", 1, 3)).await.unwrap();
        periods.ensure_pay_period(&span(3, (2025, 2, 24))).await.unwrap();

        let written = repo
            .replace_all_bills(
                &[bill("Rent", 1, 17), bill("Car", 15, 18)],
                &[span(17, (2025, 8, 4)), span(18, (2025, 8, 18))],
            )
            .await
            .expect("Failed to replace bills");
        assert_eq!(written, 2);

        let names: Vec<String> = repo.list_bills().await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Rent", "Car"]);

        let pp_numbers: Vec<i64> = periods
            .list_pay_periods()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.pp_number)
            .collect();
        assert_eq!(pp_numbers, vec![17, 18]);
    }

    #[tokio::test]
    async fn test_list_bill_names_is_distinct() {
        let repo = setup_test().await;
        repo.store_bill(&bill("Rent", 1, 17)).await.unwrap();
        repo.store_bill(&bill("Rent", 1, 18)).await.unwrap();
        repo.store_bill(&bill("Electric", 8, 17)).await.unwrap();

        let names = repo.list_bill_names().await.unwrap();
        assert_eq!(names, vec!["Electric", "Rent"]);
    }
}

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::repositories::{
    BillRepository, GamificationRepository, PayPeriodRepository, PaycheckRepository,
    ReminderRepository,
};
use crate::storage::traits::Connection;

/// DbConnection manages the SQLite pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
    /// Serializes read-modify-write cycles on the key/value store within this process
    kv_write_lock: Arc<Mutex<()>>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
            kv_write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn kv_write_lock(&self) -> &Mutex<()> {
        &self.kv_write_lock
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Money is stored as TEXT so decimals survive exactly
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                month TEXT,
                amount TEXT NOT NULL,
                due_day INTEGER NOT NULL CHECK (due_day >= 1 AND due_day <= 31),
                bill_class TEXT NOT NULL,
                pay_period INTEGER NOT NULL,
                paid BOOLEAN NOT NULL DEFAULT FALSE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bills_pay_period
            ON bills(pay_period);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pay_periods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pp_number INTEGER NOT NULL UNIQUE,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS paychecks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source TEXT NOT NULL,
                amount TEXT NOT NULL,
                player_id TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // No foreign key: reminders outlive the bills they mention
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reminders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bill_id INTEGER NOT NULL,
                sent_at TEXT NOT NULL,
                reminder_type TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_reminders_bill_type_sent
            ON reminders(bill_id, reminder_type, sent_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type BillRepository = BillRepository;
    type PayPeriodRepository = PayPeriodRepository;
    type PaycheckRepository = PaycheckRepository;
    type ReminderRepository = ReminderRepository;
    type GamificationRepository = GamificationRepository;

    fn create_bill_repository(&self) -> Self::BillRepository {
        BillRepository::new(self.clone())
    }

    fn create_pay_period_repository(&self) -> Self::PayPeriodRepository {
        PayPeriodRepository::new(self.clone())
    }

    fn create_paycheck_repository(&self) -> Self::PaycheckRepository {
        PaycheckRepository::new(self.clone())
    }

    fn create_reminder_repository(&self) -> Self::ReminderRepository {
        ReminderRepository::new(self.clone())
    }

    fn create_gamification_repository(&self) -> Self::GamificationRepository {
        GamificationRepository::new(self.clone())
    }
}

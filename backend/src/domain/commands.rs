//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod bills {
    use rust_decimal::Decimal;

    /// Input for creating a bill. Enum fields are still raw strings and are
    /// parsed by the service.
    #[derive(Debug, Clone)]
    pub struct CreateBillCommand {
        pub name: String,
        pub month: Option<String>,
        pub amount: Decimal,
        pub due_day: u32,
        pub bill_class: String,
        pub pay_period: i64,
        pub paid: bool,
    }

    /// Partial update; `None` keeps the stored value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBillCommand {
        pub name: Option<String>,
        pub month: Option<String>,
        pub amount: Option<Decimal>,
        pub due_day: Option<u32>,
        pub bill_class: Option<String>,
        pub pay_period: Option<i64>,
        pub paid: Option<bool>,
    }

    /// Result of a CSV upload.
    #[derive(Debug, Clone, PartialEq)]
    pub struct IngestResult {
        pub ingested_rows: usize,
        pub pay_periods: usize,
    }
}

pub mod paychecks {
    use rust_decimal::Decimal;

    #[derive(Debug, Clone)]
    pub struct CreatePaycheckCommand {
        pub source: String,
        pub amount: Decimal,
        pub player_id: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdatePaycheckCommand {
        pub source: Option<String>,
        pub amount: Option<Decimal>,
        pub player_id: Option<String>,
    }
}

pub mod snowball {
    use rust_decimal::Decimal;

    /// Loosely typed debts as received from a client.
    #[derive(Debug, Clone, Default)]
    pub struct SnowballCommand {
        pub debts: Vec<serde_json::Value>,
        pub monthly_payment: Option<Decimal>,
    }
}

pub mod gamification {
    #[derive(Debug, Clone)]
    pub struct CompleteTaskCommand {
        pub player_id: String,
        pub task_type: String,
    }
}

pub mod reminders {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Inputs of one reminder sweep
    #[derive(Debug, Clone, Copy)]
    pub struct SweepCommand {
        pub today: NaiveDate,
        pub now: DateTime<Utc>,
        pub days_ahead: i64,
    }
}

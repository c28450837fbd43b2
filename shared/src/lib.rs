use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Budget category a bill belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillClass {
    Housing,
    Utilities,
    Debt,
    Critical,
    Essential,
    Needed,
    Comfort,
    Fixed,
    Savings,
}

impl BillClass {
    pub const ALL: [BillClass; 9] = [
        BillClass::Housing,
        BillClass::Utilities,
        BillClass::Debt,
        BillClass::Critical,
        BillClass::Essential,
        BillClass::Needed,
        BillClass::Comfort,
        BillClass::Fixed,
        BillClass::Savings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillClass::Housing => "Housing",
            BillClass::Utilities => "Utilities",
            BillClass::Debt => "Debt",
            BillClass::Critical => "Critical",
            BillClass::Essential => "Essential",
            BillClass::Needed => "Needed",
            BillClass::Comfort => "Comfort",
            BillClass::Fixed => "Fixed",
            BillClass::Savings => "Savings",
        }
    }

    /// Classes counted as fixed cost in a pay-period summary
    pub fn is_fixed_cost(&self) -> bool {
        matches!(self, BillClass::Debt | BillClass::Critical)
    }

    /// Classes counted as variable cost in a pay-period summary
    pub fn is_variable_cost(&self) -> bool {
        matches!(self, BillClass::Needed | BillClass::Comfort)
    }
}

impl fmt::Display for BillClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillClass {
    type Err = EnumParseError;

    /// Case-insensitive, ignores surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BillClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EnumParseError::new("bill class", s))
    }
}

/// One of the two players sharing the household budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    #[serde(rename = "player1")]
    Player1,
    #[serde(rename = "player2")]
    Player2,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerId {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player1" => Ok(PlayerId::Player1),
            "player2" => Ok(PlayerId::Player2),
            other => Err(EnumParseError::new("player_id", other)),
        }
    }
}

/// Kind of reminder emitted by the due-bill sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderType {
    #[serde(rename = "due_in_3_days")]
    DueIn3Days,
    #[serde(rename = "due_soon")]
    DueSoon,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::DueIn3Days => "due_in_3_days",
            ReminderType::DueSoon => "due_soon",
        }
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_in_3_days" => Ok(ReminderType::DueIn3Days),
            "due_soon" => Ok(ReminderType::DueSoon),
            other => Err(EnumParseError::new("reminder type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl EnumParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for EnumParseError {}

// ---------------------------------------------------------------------------
// Bills and pay periods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub name: String,
    /// Free-form month label carried over from the ingested CSV
    pub month: Option<String>,
    pub amount: Decimal,
    pub due_day: u32,
    pub bill_class: BillClass,
    /// External pay-period number (`PayPeriod::pp_number`)
    pub pay_period: i64,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub name: String,
    #[serde(default)]
    pub month: Option<String>,
    pub amount: Decimal,
    pub due_day: u32,
    pub bill_class: String,
    pub pay_period: i64,
    #[serde(default)]
    pub paid: Option<bool>,
}

/// Every field is optional; supplied fields replace the stored ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBillRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub due_day: Option<u32>,
    #[serde(default)]
    pub bill_class: Option<String>,
    #[serde(default)]
    pub pay_period: Option<i64>,
    #[serde(default)]
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub id: i64,
    pub pp_number: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub ingested_rows: usize,
    pub pay_periods: usize,
}

// ---------------------------------------------------------------------------
// Paychecks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paycheck {
    pub id: i64,
    pub source: String,
    pub amount: Decimal,
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaycheckRequest {
    pub source: String,
    pub amount: Decimal,
    pub player_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePaycheckRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub player_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Pay-period summary
// ---------------------------------------------------------------------------

/// Version of the `pots` key set below
pub const POTS_VERSION: u32 = 3;

/// Fixed-percentage allocations of income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pots {
    #[serde(rename = "Debt_Payments")]
    pub debt_payments: Decimal,
    #[serde(rename = "Critical_Bills")]
    pub critical_bills: Decimal,
    #[serde(rename = "Needed_Bills")]
    pub needed_bills: Decimal,
    #[serde(rename = "Comfort_Pool")]
    pub comfort_pool: Decimal,
    #[serde(rename = "Annual_Rainy_Day")]
    pub annual_rainy_day: Decimal,
}

impl Pots {
    pub fn total(&self) -> Decimal {
        self.debt_payments
            + self.critical_bills
            + self.needed_bills
            + self.comfort_pool
            + self.annual_rainy_day
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPeriodSummary {
    pub pp_number: i64,
    pub income: Decimal,
    pub fixed: Decimal,
    pub variable: Decimal,
    pub surplus_or_deficit: Decimal,
    pub pots: Pots,
    pub pots_version: u32,
}

// ---------------------------------------------------------------------------
// Debt snowball
// ---------------------------------------------------------------------------

/// Loosely typed snowball input; each debt is coerced server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowballRequest {
    #[serde(default)]
    pub debts: Vec<serde_json::Value>,
    #[serde(default)]
    pub monthly_payment: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballEntry {
    pub name: String,
    pub balance: Decimal,
    pub apr: Decimal,
    pub payoff_eta_days: u64,
}

// ---------------------------------------------------------------------------
// Unlocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockSuggestion {
    pub action: String,
    /// In [0, 1]; higher frees up more budget
    pub impact_score: f64,
    pub prereqs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// An externally reported transaction, kept as the caller sent it.
/// Only `memo` is ever read; every field, including a null or non-string
/// memo, is echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReconcileTransaction {
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ReconcileTransaction {
    /// Memo as text; numbers and other non-string values use their JSON form
    pub fn memo_text(&self) -> Option<String> {
        match self.fields.get("memo") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(memo)) => Some(memo.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    #[serde(default)]
    pub transactions: Option<Vec<ReconcileTransaction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub matched: Vec<ReconcileTransaction>,
    pub unmatched: Vec<ReconcileTransaction>,
    pub matched_count: usize,
    pub unmatched_count: usize,
}

// ---------------------------------------------------------------------------
// Gamification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub points: u64,
    pub spending_money: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamificationStatus {
    pub player1: PlayerState,
    pub player2: PlayerState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    pub player_id: String,
    pub task_type: String,
}

/// An unpaid bill offered as a task on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationTask {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub due_day: u32,
    pub bill_class: BillClass,
    pub pay_period: i64,
    pub task_type: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPoints {
    pub task_type: String,
    pub points: u32,
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub bill_id: i64,
    pub sent_at: DateTime<Utc>,
    pub reminder_type: ReminderType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSweepResponse {
    pub reminders_sent: usize,
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarEvent {
    Bill {
        id: i64,
        title: String,
        date: NaiveDate,
        amount: Decimal,
        bill_class: BillClass,
        paid: bool,
        pay_period: i64,
    },
    PayPeriod {
        title: String,
        pp_number: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

impl CalendarEvent {
    /// Date used to order the feed
    pub fn sort_date(&self) -> NaiveDate {
        match self {
            CalendarEvent::Bill { date, .. } => *date,
            CalendarEvent::PayPeriod { start_date, .. } => *start_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub ok: bool,
    pub name: String,
    pub version: String,
}

//! # AutoBudget Backend
//!
//! Household budgeting service: bills and pay periods, paychecks, budget
//! summaries, debt snowball, unlock suggestions, reconciliation, a two-player
//! points ledger and due-bill reminders.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, pure computations)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{
    BillService, BudgetService, CalendarService, GamificationService, LogNotifier, PayPeriodCalendar,
    PaycheckService, ReminderNotifier, ReminderService,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub bill_service: BillService<DbConnection>,
    pub paycheck_service: PaycheckService<DbConnection>,
    pub budget_service: BudgetService<DbConnection>,
    pub gamification_service: GamificationService<DbConnection>,
    pub reminder_service: ReminderService<DbConnection>,
    pub calendar_service: CalendarService<DbConnection>,
    /// Window used by the reminder sweep when a request does not set one
    pub reminder_days_ahead: i64,
}

impl AppState {
    /// Wire every service onto an open database connection
    pub fn new(db_conn: DbConnection, config: &AppConfig, notifier: Arc<dyn ReminderNotifier>) -> Self {
        let connection = Arc::new(db_conn);
        let calendar = PayPeriodCalendar::new(config.anchor);

        Self {
            bill_service: BillService::new(connection.clone(), calendar),
            paycheck_service: PaycheckService::new(connection.clone()),
            budget_service: BudgetService::new(
                connection.clone(),
                config.snowball_monthly_payment,
                config.reconcile_keywords.clone(),
            ),
            gamification_service: GamificationService::new(connection.clone()),
            reminder_service: ReminderService::new(connection.clone(), calendar, notifier),
            calendar_service: CalendarService::new(connection, calendar),
            reminder_days_ahead: config.reminder_days_ahead,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db_conn, config, Arc::new(LogNotifier)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    // CORS setup to allow the dashboard to make requests
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = io::api_routes();

    // Served at the root and under the /api compat prefix
    Router::new()
        .merge(api_routes.clone())
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

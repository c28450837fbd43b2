use std::time::Duration;

use autobudget_backend::{config::AppConfig, create_router, initialize_backend, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let app_state = initialize_backend(&config).await?;

    if config.reminder_sweep_interval_secs > 0 {
        spawn_reminder_sweep(app_state.clone(), &config);
    }

    let app = create_router(app_state, &config);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodic due-bill reminders
fn spawn_reminder_sweep(app_state: AppState, config: &AppConfig) {
    let period = Duration::from_secs(config.reminder_sweep_interval_secs);
    let days_ahead = config.reminder_days_ahead;
    info!("Reminder sweep every {:?}, {} days ahead", period, days_ahead);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match app_state.reminder_service.send_due_bill_reminders(days_ahead).await {
                Ok(sent) => info!("Reminder sweep sent {} reminders", sent),
                Err(e) => error!("Reminder sweep failed: {}", e),
            }
        }
    });
}

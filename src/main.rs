use std::sync::Arc;

use barberbook_api::{
    ApiState,
    config::{ApiConfig, StoreBackend},
    notify::WebhookDispatcher,
};
use barberbook_core::{
    booking::BookingService,
    clock::SystemClock,
    notify::{LogDispatcher, NotificationDispatcher},
    store::ReservationStore,
};
use barberbook_db::{
    MemoryReservationStore, PgReservationStore, create_pool, schema::initialize_database,
};
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    barberbook_api::init_tracing(config.log_level)?;

    let store: Arc<dyn ReservationStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgReservationStore::new(db_pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory reservation store; bookings are lost on restart");
            Arc::new(MemoryReservationStore::new())
        }
    };

    let notifier: Arc<dyn NotificationDispatcher> = match &config.notify_webhook_url {
        Some(url) => Arc::new(WebhookDispatcher::new(url.clone())?),
        None => Arc::new(LogDispatcher),
    };

    let booking = BookingService::new(
        config.business_hours,
        config.timezone,
        store,
        notifier,
        Arc::new(SystemClock),
    );
    info!(
        "Shop open {}:00-{}:00 ({}), {}-minute slots",
        config.business_hours.opening_hour,
        config.business_hours.closing_hour,
        config.timezone,
        config.business_hours.slot_duration_minutes
    );

    let state = Arc::new(ApiState::new(Arc::new(booking), config.slot_refresh_seconds));
    barberbook_api::start_server(&config, state).await?;

    Ok(())
}

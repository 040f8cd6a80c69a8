//! # Barberbook API
//!
//! HTTP surface of the booking service: the slot grid, the service catalog,
//! booking submission and cancellation.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into booking service calls
//! - **Middleware**: Session extraction and error mapping
//! - **Config**: Environment and shop configuration
//! - **Notify**: Webhook delivery of booking notifications

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Session extraction and error handling
pub mod middleware;
pub mod notify;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
};
use barberbook_core::booking::BookingService;
use eyre::{Result, WrapErr};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use middleware::session::{USER_ID_HEADER, USER_ROLE_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub booking: Arc<BookingService>,
    /// Poll interval advertised to clients alongside every slot grid
    pub refresh_after_seconds: u64,
}

impl ApiState {
    pub fn new(booking: Arc<BookingService>, refresh_after_seconds: u64) -> Self {
        Self {
            booking,
            refresh_after_seconds,
        }
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::services::routes())
        .merge(routes::slots::routes())
        .merge(routes::bookings::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and state
pub async fn start_server(config: &config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = app(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                HeaderName::from_static(USER_ID_HEADER),
                HeaderName::from_static(USER_ROLE_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out", "retryable": true })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error", "retryable": false })),
        )
    }
}

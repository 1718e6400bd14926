pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

#[cfg(feature = "client")]
pub mod client;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ConfigError;
use crate::services::BookingService;

// Shared state для всего приложения
pub struct AppState {
    pub booking: BookingService,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        let prices = config.route_prices()?;
        let booking = BookingService::new(&config.sections, prices);

        Ok(Arc::new(Self { booking, config }))
    }
}

/// Собирает роутер приложения. Используется и в `main`, и в интеграционных тестах.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Rail Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
}

pub mod comparison;
pub mod laps;
pub mod standings;

use axum::{response::IntoResponse, routing::get, Json, Router};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::utils::{config::Config, state::AppState};

pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME").replace('-', "_"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();
}

pub fn make_app(config: Config) -> Router {
    info!("Initializing application...");
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/", get(health_check))
        .merge(standings::standings_routes())
        .merge(laps::laps_routes())
        .merge(comparison::comparison_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    info!("Application initialized successfully");

    app
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "F1 stats proxy is running"}))).into_response()
}

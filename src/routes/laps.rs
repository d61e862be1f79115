use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{handlers::laps::get_lap_times, utils::state::AppState};

pub fn laps_routes() -> Router<Arc<AppState>> {
    Router::new().route("/lap_times", get(get_lap_times))
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{handlers::comparison::get_driver_comparison, utils::state::AppState};

pub fn comparison_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/driver_comparison/{driver1}/{driver2}",
        get(get_driver_comparison),
    )
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{handlers::standings::get_standings, utils::state::AppState};

pub fn standings_routes() -> Router<Arc<AppState>> {
    Router::new().route("/standings", get(get_standings))
}

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;

use crate::models::{error::Error, race::StandingsData};
use crate::utils::{
    ergast::{self, fetch_ergast, resolve_with_fallback},
    state::AppState,
};

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, Error> {
    let standings_type = params.get("type").map(String::as_str).unwrap_or("driver");
    let (endpoint, list_key) = match standings_type {
        "constructor" => ("constructorStandings", "ConstructorStandings"),
        _ => ("driverStandings", "DriverStandings"),
    };

    let seasons = ergast::recent_seasons();
    let resolved = resolve_with_fallback(
        &seasons,
        |season| fetch_ergast(&state, endpoint, Some(season)),
        |data| !ergast::standings_lists(data).is_empty(),
    )
    .await;

    let Some((_, data)) = resolved else {
        // No season in range has data yet; an empty payload, not an error.
        return Ok((
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {"standings": [], "season": null, "round": null},
            })),
        )
            .into_response());
    };

    let list = ergast::standings_lists(&data)
        .first()
        .cloned()
        .ok_or_else(|| Error::internal("failed to read standings data"))?;

    let body = StandingsData {
        standings: list[list_key].clone(),
        season: list["season"].as_str().map(str::to_string),
        round: list["round"].as_str().map(str::to_string),
    };

    Ok((
        StatusCode::OK,
        Json(json!({"status": "success", "data": body})),
    )
        .into_response())
}

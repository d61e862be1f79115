use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::{json, Value};

use crate::models::{
    error::Error,
    laps::{LapChart, LapChartDriver, RaceSummary},
};
use crate::utils::{
    driver_utils::driver_info,
    ergast::{self, fetch_ergast, resolve_with_fallback},
    state::AppState,
};

/// How many finishers the lap chart keeps.
const TOP_FINISHERS: usize = 5;

pub async fn get_lap_times(State(state): State<Arc<AppState>>) -> Result<Response, Error> {
    let seasons = ergast::recent_seasons();
    let resolved = resolve_with_fallback(
        &seasons,
        |season| fetch_ergast(&state, "last/laps", Some(season)),
        |data| !ergast::race_table(data).is_empty(),
    )
    .await;

    let Some((_, data)) = resolved else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "no lap data available for any recent season",
            })),
        )
            .into_response());
    };

    let race = ergast::race_table(&data)
        .first()
        .cloned()
        .ok_or_else(|| Error::internal("failed to read lap data"))?;

    let summary = RaceSummary {
        name: json_str_or_na(&race, "raceName"),
        round: json_str_or_na(&race, "round"),
        season: json_str_or_na(&race, "season"),
        date: json_str_or_na(&race, "date"),
        circuit: race["Circuit"]["circuitName"]
            .as_str()
            .unwrap_or("N/A")
            .to_string(),
    };
    let chart = build_lap_chart(&race, TOP_FINISHERS);

    Ok((StatusCode::OK, Json(json!({"race": summary, "laps": chart}))).into_response())
}

fn json_str_or_na(value: &Value, field: &str) -> String {
    value[field].as_str().unwrap_or("N/A").to_string()
}

/// Shape a race's `Laps` array into chart series: one label per lap and,
/// per driver, elapsed seconds and running position for each lap. Only
/// the `top_n` best-placed drivers (by position on their last completed
/// lap) are kept.
pub fn build_lap_chart(race: &Value, top_n: usize) -> LapChart {
    let laps = race["Laps"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    let labels: Vec<String> = laps
        .iter()
        .map(|lap| lap["number"].as_str().unwrap_or_default().to_string())
        .collect();

    let mut drivers: Vec<LapChartDriver> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for (lap_idx, lap) in laps.iter().enumerate() {
        let timings = lap["Timings"].as_array().map(Vec::as_slice).unwrap_or(&[]);
        for timing in timings {
            let Some(driver_id) = timing["driverId"].as_str() else {
                continue;
            };
            let slot = *slots.entry(driver_id.to_string()).or_insert_with(|| {
                let info = driver_info(driver_id);
                drivers.push(LapChartDriver {
                    id: info.id,
                    name: info.name,
                    color: info.color,
                    times: vec![None; laps.len()],
                    positions: vec![None; laps.len()],
                });
                drivers.len() - 1
            });
            drivers[slot].times[lap_idx] = timing["time"].as_str().and_then(convert_to_seconds);
            drivers[slot].positions[lap_idx] =
                timing["position"].as_str().and_then(|p| p.parse().ok());
        }
    }

    drivers.sort_by_key(final_position);
    drivers.truncate(top_n);

    LapChart { labels, drivers }
}

/// A driver's position on the last lap they completed; drivers with no
/// recorded position sort last.
fn final_position(driver: &LapChartDriver) -> u32 {
    driver
        .positions
        .iter()
        .rev()
        .flatten()
        .next()
        .copied()
        .unwrap_or(u32::MAX)
}

/// Convert an upstream lap time (`"1:23.456"`, optionally with an hours
/// field) into elapsed seconds.
pub fn convert_to_seconds(time: &str) -> Option<f64> {
    let mut parts = time.split(':').rev();
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    let minutes: f64 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0.0,
    };
    let hours: f64 = match parts.next() {
        Some(h) => h.trim().parse().ok()?,
        None => 0.0,
    };
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use http::StatusCode;
use serde_json::{json, Value};

use crate::models::race::{ComparisonRace, ComparisonResult, DriverRaceResult};
use crate::utils::{
    driver_utils::driver_info,
    ergast::{self, fetch_ergast},
    state::AppState,
};

pub async fn get_driver_comparison(
    State(state): State<Arc<AppState>>,
    Path((driver1, driver2)): Path<(String, String)>,
) -> impl IntoResponse {
    let current = Utc::now().year();

    // Current season first, then the one before.
    for season in [current, current - 1] {
        if let Some(result) = compare_drivers_in_season(&state, &driver1, &driver2, season).await {
            if !result.races.is_empty() {
                return (
                    StatusCode::OK,
                    Json(json!({"status": "success", "data": result})),
                )
                    .into_response();
            }
        }
    }

    // Both drivers exist as far as we can tell, they just never shared a
    // race in the attempted seasons. Valid outcome, not an error.
    let empty = ComparisonResult {
        driver1: driver_info(&driver1),
        driver2: driver_info(&driver2),
        season: current,
        races: Vec::new(),
    };
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "no common races found for these drivers",
            "data": empty,
        })),
    )
        .into_response()
}

async fn compare_drivers_in_season(
    state: &AppState,
    driver1: &str,
    driver2: &str,
    season: i32,
) -> Option<ComparisonResult> {
    let driver1_data =
        fetch_ergast(state, &format!("drivers/{driver1}/results"), Some(season)).await?;
    let driver2_data =
        fetch_ergast(state, &format!("drivers/{driver2}/results"), Some(season)).await?;

    let races = join_common_races(
        ergast::race_table(&driver1_data),
        ergast::race_table(&driver2_data),
    );

    Some(ComparisonResult {
        driver1: driver_info(driver1),
        driver2: driver_info(driver2),
        season,
        races,
    })
}

/// Pair up the races both drivers took part in, most recent first.
///
/// These are per-driver result endpoints, so `Results[0]` of each race is
/// the queried driver's own result; races where the array is empty are
/// skipped rather than misattributed.
pub fn join_common_races(driver1_races: &[Value], driver2_races: &[Value]) -> Vec<ComparisonRace> {
    let driver1_by_name = races_by_name(driver1_races);
    let driver2_by_name = races_by_name(driver2_races);

    let mut joined: Vec<ComparisonRace> = driver1_by_name
        .iter()
        .filter_map(|(name, race1)| {
            let race2 = driver2_by_name.get(name)?;
            let result1 = race1["Results"].get(0)?;
            let result2 = race2["Results"].get(0)?;
            Some(ComparisonRace {
                name: name.clone(),
                date: race1["date"].as_str().unwrap_or("N/A").to_string(),
                circuit: race1["Circuit"]["circuitName"]
                    .as_str()
                    .unwrap_or("N/A")
                    .to_string(),
                driver1_result: process_driver_result(result1),
                driver2_result: process_driver_result(result2),
            })
        })
        .collect();

    joined.sort_by(|a, b| b.date.cmp(&a.date));
    joined
}

/// Race-name index; the later entry wins if a name repeats.
fn races_by_name(races: &[Value]) -> HashMap<String, &Value> {
    races
        .iter()
        .filter_map(|race| Some((race["raceName"].as_str()?.to_string(), race)))
        .collect()
}

/// Extract one driver's processed result. Absent fields become sentinel
/// values instead of failing the whole comparison.
pub fn process_driver_result(result: &Value) -> DriverRaceResult {
    let points = result["points"]
        .as_str()
        .and_then(|p| p.parse().ok())
        .or_else(|| result["points"].as_f64())
        .unwrap_or(0.0);

    DriverRaceResult {
        position: field_or_na(result, "position"),
        points,
        status: field_or_na(result, "status"),
        grid: field_or_na(result, "grid"),
        laps: field_or_na(result, "laps"),
    }
}

fn field_or_na(result: &Value, field: &str) -> String {
    result[field].as_str().unwrap_or("N/A").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn race(name: &str, date: &str, position: &str) -> Value {
        json!({
            "raceName": name,
            "date": date,
            "Circuit": {"circuitName": format!("{name} Circuit")},
            "Results": [{
                "position": position,
                "points": "10",
                "status": "Finished",
                "grid": "3",
                "laps": "57",
            }],
        })
    }

    #[test]
    fn joins_only_races_both_drivers_started() {
        let driver1 = [
            race("Bahrain Grand Prix", "2024-03-02", "1"),
            race("Monaco Grand Prix", "2024-05-26", "3"),
        ];
        let driver2 = [
            race("Bahrain Grand Prix", "2024-03-02", "2"),
            race("Italian Grand Prix", "2024-09-01", "5"),
        ];

        let joined = join_common_races(&driver1, &driver2);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].name, "Bahrain Grand Prix");
        assert_eq!(joined[0].driver1_result.position, "1");
        assert_eq!(joined[0].driver2_result.position, "2");
    }

    #[test]
    fn joined_races_are_sorted_by_date_descending() {
        let driver1 = [
            race("Saudi Arabian Grand Prix", "2024-03-10", "1"),
            race("Miami Grand Prix", "2024-05-05", "2"),
            race("Bahrain Grand Prix", "2024-02-18", "3"),
        ];
        let driver2 = [
            race("Bahrain Grand Prix", "2024-02-18", "4"),
            race("Saudi Arabian Grand Prix", "2024-03-10", "5"),
            race("Miami Grand Prix", "2024-05-05", "6"),
        ];

        let dates: Vec<String> = join_common_races(&driver1, &driver2)
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec!["2024-05-05", "2024-03-10", "2024-02-18"]);
    }

    #[test]
    fn race_with_empty_results_is_skipped() {
        let mut race1 = race("Bahrain Grand Prix", "2024-03-02", "1");
        race1["Results"] = json!([]);
        let driver2 = [race("Bahrain Grand Prix", "2024-03-02", "2")];

        assert!(join_common_races(&[race1], &driver2).is_empty());
    }

    #[test]
    fn result_fields_are_coerced_and_defaulted() {
        let processed = process_driver_result(&json!({"position": "1", "points": "25"}));
        assert_eq!(processed.position, "1");
        assert!((processed.points - 25.0).abs() < 1e-9);
        assert_eq!(processed.status, "N/A");
        assert_eq!(processed.grid, "N/A");
        assert_eq!(processed.laps, "N/A");

        let empty = process_driver_result(&json!({}));
        assert_eq!(empty.points, 0.0);
        assert_eq!(empty.position, "N/A");
    }

    #[test]
    fn numeric_points_are_accepted_too() {
        let processed = process_driver_result(&json!({"points": 18.5}));
        assert!((processed.points - 18.5).abs() < 1e-9);
    }
}

use std::future::Future;
use std::time::Duration;

use chrono::{Datelike, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::error::FetchError;
use crate::utils::state::AppState;

/// Top-level envelope key every valid upstream response carries.
pub const MRDATA_KEY: &str = "MRData";

/// Seasons to attempt, newest first.
pub fn recent_seasons() -> Vec<i32> {
    let current = Utc::now().year();
    vec![current, current - 1, current - 2]
}

/// Canonical key for a request; doubles as the cache key.
pub fn cache_key(endpoint: &str, season: Option<i32>) -> String {
    match season {
        Some(year) => format!("{year}/{endpoint}"),
        None => endpoint.to_string(),
    }
}

fn request_url(base: &str, endpoint: &str, season: Option<i32>) -> String {
    match season {
        Some(year) => format!("{base}/{year}/{endpoint}.json"),
        None => format!("{base}/{endpoint}.json"),
    }
}

/// Fetch an upstream endpoint through the response cache.
///
/// Every fetch failure is logged here and collapsed to `None`; callers
/// treat the result as "no data", never as an error to propagate.
pub async fn fetch_ergast(state: &AppState, endpoint: &str, season: Option<i32>) -> Option<Value> {
    let key = cache_key(endpoint, season);
    if let Some(hit) = state.cache.get(&key) {
        debug!("cache hit for {key}");
        return Some(hit);
    }

    match fetch_upstream(state, endpoint, season).await {
        Ok(data) => Some(state.cache.put(&key, data)),
        Err(err) => {
            warn!("fetch for {key} failed: {err}");
            None
        }
    }
}

async fn fetch_upstream(
    state: &AppState,
    endpoint: &str,
    season: Option<i32>,
) -> Result<Value, FetchError> {
    let url = request_url(&state.config.ergast_api_base, endpoint, season);
    let res = state
        .http_client
        .get(&url)
        .timeout(Duration::from_secs(state.config.request_timeout_secs))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status));
    }

    let body = res.text().await?;
    let data: Value =
        serde_json::from_str(&body).map_err(|_| FetchError::UpstreamShape("not valid JSON"))?;
    if data.get(MRDATA_KEY).is_none() {
        return Err(FetchError::UpstreamShape("missing MRData envelope"));
    }
    Ok(data)
}

/// Try each season once, in the given order, until `usable` accepts the
/// fetched result. Exhausting the list is "no data", not an error.
pub async fn resolve_with_fallback<F, Fut, P>(
    seasons: &[i32],
    mut fetch: F,
    usable: P,
) -> Option<(i32, Value)>
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Option<Value>>,
    P: Fn(&Value) -> bool,
{
    for &season in seasons {
        if let Some(data) = fetch(season).await {
            if usable(&data) {
                return Some((season, data));
            }
        }
        debug!("no usable data for season {season}");
    }
    None
}

/// `MRData.StandingsTable.StandingsLists`, or an empty slice when the
/// payload does not have that shape.
pub fn standings_lists(data: &Value) -> &[Value] {
    data[MRDATA_KEY]["StandingsTable"]["StandingsLists"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `MRData.RaceTable.Races`, or an empty slice when the payload does not
/// have that shape.
pub fn race_table(data: &Value) -> &[Value] {
    data[MRDATA_KEY]["RaceTable"]["Races"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn cache_key_includes_season_when_present() {
        assert_eq!(cache_key("driverStandings", Some(2024)), "2024/driverStandings");
        assert_eq!(cache_key("seasons", None), "seasons");
    }

    #[test]
    fn request_url_matches_upstream_layout() {
        assert_eq!(
            request_url("https://api.jolpi.ca/ergast/f1", "last/laps", Some(2024)),
            "https://api.jolpi.ca/ergast/f1/2024/last/laps.json"
        );
        assert_eq!(
            request_url("https://api.jolpi.ca/ergast/f1", "seasons", None),
            "https://api.jolpi.ca/ergast/f1/seasons.json"
        );
    }

    #[test]
    fn accessors_default_to_empty_on_unexpected_shape() {
        assert!(standings_lists(&json!({"MRData": {}})).is_empty());
        assert!(standings_lists(&json!({"unrelated": true})).is_empty());
        assert!(race_table(&json!({"MRData": {"RaceTable": {}}})).is_empty());

        let data = json!({
            "MRData": {"RaceTable": {"Races": [{"raceName": "Bahrain Grand Prix"}]}}
        });
        assert_eq!(race_table(&data).len(), 1);
    }

    #[tokio::test]
    async fn fallback_tries_each_season_once_in_order() {
        let calls = RefCell::new(Vec::new());
        let result = resolve_with_fallback(
            &[2024, 2023, 2022],
            |season| {
                calls.borrow_mut().push(season);
                let data = if season == 2022 {
                    json!({"races": ["Bahrain Grand Prix"]})
                } else {
                    json!({"races": []})
                };
                async move { Some(data) }
            },
            |data| data["races"].as_array().map(|r| !r.is_empty()).unwrap_or(false),
        )
        .await;

        assert_eq!(*calls.borrow(), vec![2024, 2023, 2022]);
        let (season, data) = result.expect("2022 should resolve");
        assert_eq!(season, 2022);
        assert_eq!(data["races"][0], "Bahrain Grand Prix");
    }

    #[tokio::test]
    async fn fallback_short_circuits_on_first_usable_season() {
        let calls = RefCell::new(Vec::new());
        let result = resolve_with_fallback(
            &[2024, 2023],
            |season| {
                calls.borrow_mut().push(season);
                async move { Some(json!({"ok": true})) }
            },
            |_| true,
        )
        .await;

        assert_eq!(*calls.borrow(), vec![2024]);
        assert_eq!(result.map(|(season, _)| season), Some(2024));
    }

    #[tokio::test]
    async fn fallback_returns_none_when_every_season_is_empty() {
        let result = resolve_with_fallback(
            &[2024, 2023, 2022],
            |_| async { None::<Value> },
            |_| true,
        )
        .await;
        assert!(result.is_none());
    }
}

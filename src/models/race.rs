use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct DriverInfo {
    pub id: String,
    pub name: String,
    pub team: String,
    pub color: String,
}

/// One driver's processed result in a single race. Fields missing from
/// the upstream payload are defaulted, never propagated as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRaceResult {
    pub position: String,
    pub points: f64,
    pub status: String,
    pub grid: String,
    pub laps: String,
}

#[derive(Debug, Serialize)]
pub struct ComparisonRace {
    pub name: String,
    pub date: String,
    pub circuit: String,
    #[serde(rename = "driver1")]
    pub driver1_result: DriverRaceResult,
    #[serde(rename = "driver2")]
    pub driver2_result: DriverRaceResult,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResult {
    pub driver1: DriverInfo,
    pub driver2: DriverInfo,
    pub season: i32,
    pub races: Vec<ComparisonRace>,
}

/// Standings payload reshaped from the first upstream standings list.
#[derive(Debug, Serialize)]
pub struct StandingsData {
    pub standings: Value,
    pub season: Option<String>,
    pub round: Option<String>,
}

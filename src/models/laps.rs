use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RaceSummary {
    pub name: String,
    pub round: String,
    pub season: String,
    pub date: String,
    pub circuit: String,
}

/// One driver's series on the lap chart. `times` and `positions` have one
/// slot per lap label; `None` where the driver recorded no timing.
#[derive(Debug, Serialize)]
pub struct LapChartDriver {
    pub id: String,
    pub name: String,
    pub color: String,
    pub times: Vec<Option<f64>>,
    pub positions: Vec<Option<u32>>,
}

#[derive(Debug, Serialize)]
pub struct LapChart {
    pub labels: Vec<String>,
    pub drivers: Vec<LapChartDriver>,
}

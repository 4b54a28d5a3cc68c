use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One raw 3-hour forecast slot as delivered by the upstream weather service
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastObservation {
    pub date_time: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: String,
    pub icon: String,
}

/// Snapshot of current conditions, used when a placeholder for today is needed
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentConditions {
    pub hi: i32,
    pub lo: i32,
    pub icon: String,
}

/// Condition and icon representing one period of a day
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PeriodSummary {
    pub condition: String,
    pub icon: Option<String>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayKind {
    Forecast,
    Placeholder,
}

/// One day in the aggregated forecast
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub day: String,
    pub hi: i32,
    pub lo: i32,
    pub morning: PeriodSummary,
    pub noon: PeriodSummary,
    pub evening: PeriodSummary,
    pub kind: DayKind,
}

impl DayAggregate {
    pub fn is_placeholder(&self) -> bool {
        self.kind == DayKind::Placeholder
    }
}

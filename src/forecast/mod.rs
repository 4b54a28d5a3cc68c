pub mod priority;
pub mod period;
pub mod resolver;
pub mod pivot;
pub mod reconcile;

use std::collections::BTreeMap;
use chrono::NaiveDate;
use log::debug;
use crate::errors::ForecastError;
use crate::forecast::period::{localize, LocalizedObservation, Period};
use crate::forecast::pivot::{daily_extremes, pivot, ResolvedBucket};
use crate::forecast::reconcile::reconcile_today;
use crate::forecast::resolver::resolve;
use crate::models::forecast::{CurrentConditions, DayAggregate, ForecastObservation};

/// Number of days in an aggregated forecast
pub const FORECAST_DAYS: usize = 5;

/// Aggregates a series of 3-hour observations into a five day forecast with a dominant
/// condition for morning, noon and evening of each day.
///
/// The steps are:
/// * place each observation in local time and assign it a period of the day
/// * pick the most severe condition within each date and period
/// * pivot to one row per date, filling periods without observations
/// * put a placeholder for today in front if the forecast starts with tomorrow
///
/// The function is pure, equal input always gives equal output. Observations with equal
/// timestamps keep their input order.
///
/// # Arguments
///
/// * 'observations' - the complete set of forecast observations
/// * 'utc_offset' - the local offset from UTC in seconds
/// * 'today' - the caller's current local date
/// * 'current' - current conditions snapshot, used for a today placeholder
pub fn aggregate(
    observations: &[ForecastObservation],
    utc_offset: i32,
    today: NaiveDate,
    current: &CurrentConditions) -> Result<Vec<DayAggregate>, ForecastError> {

    let mut localized = localize(observations, utc_offset)?;
    localized.sort_by_key(|lo| lo.observation.date_time);

    let extremes = daily_extremes(&localized);

    let mut buckets: BTreeMap<(NaiveDate, Period), Vec<&LocalizedObservation>> = BTreeMap::new();
    for lo in &localized {
        buckets.entry((lo.date, lo.period)).or_default().push(lo);
    }

    let mut resolved: Vec<ResolvedBucket> = Vec::with_capacity(buckets.len());
    for ((date, period), bucket) in &buckets {
        let (hi, lo) = extremes[date];
        let summary = resolve(bucket, *period)?;
        debug!("{} {}: {}", date, period, summary.condition);
        resolved.push(ResolvedBucket {
            date: *date,
            day: bucket[0].day.clone(),
            hi,
            lo,
            period: *period,
            summary,
        });
    }

    let days = pivot(&resolved);
    debug!("aggregated {} observations into {} days", observations.len(), days.len());

    if days.len() < FORECAST_DAYS {
        return Err(ForecastError::InsufficientForecastWindow(days.len()));
    }

    let mut days = reconcile_today(days, today, current);
    days.truncate(FORECAST_DAYS);

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use crate::models::forecast::DayKind;

    fn window(start: DateTime<Utc>, slots: i64) -> Vec<ForecastObservation> {
        (0..slots)
            .map(|i| ForecastObservation {
                date_time: start + TimeDelta::hours(3 * i),
                temp_min: 0.0 + i as f64 * 0.1,
                temp_max: 10.0 + i as f64 * 0.1,
                condition: "Clouds".to_string(),
                icon: "04d".to_string(),
            })
            .collect()
    }

    fn current() -> CurrentConditions {
        CurrentConditions { hi: 7, lo: 1, icon: "02n".to_string() }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_full_window_gives_five_days() {
        // Starts Monday 2024-01-01 00:00 and covers five full days
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 40);
        let days = aggregate(&obs, 0, date(1, 1), &current()).unwrap();

        assert_eq!(days.len(), FORECAST_DAYS);
        assert_eq!(days[0].day, "MON");
        assert_eq!(days[4].day, "FRI");
        assert!(days.iter().all(|d| d.kind == DayKind::Forecast));
        assert!(days.iter().all(|d| d.hi >= d.lo));
    }

    #[test]
    fn test_today_mismatch_puts_placeholder_first() {
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(), 40);
        let days = aggregate(&obs, 0, date(1, 1), &current()).unwrap();

        assert_eq!(days.len(), FORECAST_DAYS);
        assert!(days[0].is_placeholder());
        assert_eq!(days[0].day, "MON");
        assert_eq!((days[0].hi, days[0].lo), (7, 1));
        assert_eq!(days[1].day, "TUE");
        assert_eq!(days[4].date, date(1, 5));
    }

    #[test]
    fn test_short_window_is_reported() {
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 16);
        let result = aggregate(&obs, 0, date(1, 1), &current());

        assert_eq!(result, Err(ForecastError::InsufficientForecastWindow(2)));
    }

    #[test]
    fn test_placeholder_does_not_count_towards_window() {
        // Four days starting Tuesday while today is Monday
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(), 32);
        let result = aggregate(&obs, 0, date(1, 1), &current());

        assert_eq!(result, Err(ForecastError::InsufficientForecastWindow(4)));
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let mut obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 40);
        let mut twin = obs[1].clone();
        obs[1].condition = "Rain".to_string();
        obs[1].icon = "10d".to_string();
        twin.condition = "Shower rain".to_string();
        twin.icon = "10n".to_string();
        obs.insert(2, twin);

        let days = aggregate(&obs, 0, date(1, 1), &current()).unwrap();
        assert_eq!(days[0].morning.condition, "Rain");

        obs.swap(1, 2);
        let days = aggregate(&obs, 0, date(1, 1), &current()).unwrap();
        assert_eq!(days[0].morning.condition, "Shower rain");
    }

    #[test]
    fn test_dominant_condition_and_evening_icon() {
        let mut obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 40);
        obs[1].condition = "Thunderstorm".to_string();
        obs[1].icon = "11n".to_string();
        obs[2].condition = "Clear".to_string();
        obs[2].icon = "01d".to_string();
        // 18:00 slot on the first day
        obs[6].condition = "Rain".to_string();
        obs[6].icon = "10d".to_string();

        let days = aggregate(&obs, 0, date(1, 1), &current()).unwrap();

        assert_eq!(days[0].morning.condition, "Thunderstorm");
        assert_eq!(days[0].morning.icon.as_deref(), Some("11d"));
        assert_eq!(days[0].evening.condition, "Rain");
        assert_eq!(days[0].evening.icon.as_deref(), Some("10n"));
    }

    #[test]
    fn test_offset_moves_slots_across_dates() {
        // In UTC+2 the window starts Monday 02:00 local
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 40);
        let days = aggregate(&obs, 2 * 3600, date(1, 1), &current()).unwrap();

        assert_eq!(days[0].date, date(1, 1));
        assert_eq!(days.len(), FORECAST_DAYS);
    }

    #[test]
    fn test_errors_propagate() {
        let mut obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 40);
        obs[10].icon = "42d".to_string();

        assert_eq!(
            aggregate(&obs, 0, date(1, 1), &current()),
            Err(ForecastError::UnknownConditionFamily("42".to_string()))
        );
        assert_eq!(
            aggregate(&obs, 20 * 3600, date(1, 1), &current()),
            Err(ForecastError::InvalidOffset(20 * 3600))
        );
    }

    #[test]
    fn test_unordered_input_is_deterministic() {
        let obs = window(Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap(), 40);
        let mut reversed = obs.clone();
        reversed.reverse();

        let a = aggregate(&obs, -5 * 3600, date(1, 1), &current()).unwrap();
        let b = aggregate(&obs, -5 * 3600, date(1, 1), &current()).unwrap();
        let c = aggregate(&reversed, -5 * 3600, date(1, 1), &current()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}

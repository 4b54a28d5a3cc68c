use std::collections::BTreeMap;
use chrono::NaiveDate;
use crate::forecast::period::{LocalizedObservation, Period};
use crate::models::forecast::{DayAggregate, DayKind, PeriodSummary};

/// Resolved condition for one (date, period) bucket, long format
#[derive(Debug, Clone)]
pub struct ResolvedBucket {
    pub date: NaiveDate,
    pub day: String,
    pub hi: i32,
    pub lo: i32,
    pub period: Period,
    pub summary: PeriodSummary,
}

/// Calculates daily high and low per local date, i.e. the max of all slot maxima and the min of
/// all slot minima. Values are rounded half to even.
///
/// # Arguments
///
/// * 'localized' - all observations in local time
pub fn daily_extremes(localized: &[LocalizedObservation]) -> BTreeMap<NaiveDate, (i32, i32)> {
    let mut extremes: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for lo in localized {
        let entry = extremes
            .entry(lo.date)
            .or_insert((f64::NEG_INFINITY, f64::INFINITY));
        entry.0 = entry.0.max(lo.observation.temp_max);
        entry.1 = entry.1.min(lo.observation.temp_min);
    }

    extremes
        .into_iter()
        .map(|(date, (hi, lo))| (date, (hi.round_ties_even() as i32, lo.round_ties_even() as i32)))
        .collect()
}

/// Reshapes resolved buckets into one row per date with one column per period.
///
/// A period without any bucket takes the value of the nearest preceding period of the same
/// date. Periods before the first populated one (a date starting mid-day) take the value of the
/// first populated period. Rows are ordered by date.
///
/// # Arguments
///
/// * 'buckets' - resolved buckets for all dates and periods
pub fn pivot(buckets: &[ResolvedBucket]) -> Vec<DayAggregate> {
    let mut days: BTreeMap<NaiveDate, (&str, i32, i32, [Option<PeriodSummary>; 3])> = BTreeMap::new();

    for b in buckets {
        let row = days
            .entry(b.date)
            .or_insert((b.day.as_str(), b.hi, b.lo, [None, None, None]));
        row.3[b.period.index()] = Some(b.summary.clone());
    }

    days.into_iter()
        .filter_map(|(date, (day, hi, lo, slots))| {
            let [morning, noon, evening] = fill_gaps(slots)?;
            Some(DayAggregate {
                date,
                day: day.to_string(),
                hi,
                lo,
                morning,
                noon,
                evening,
                kind: DayKind::Forecast,
            })
        })
        .collect()
}

/// Forward fills empty periods, then fills any leading gap from the first populated period.
/// Returns None only if no period at all is populated.
///
/// # Arguments
///
/// * 'slots' - morning, noon and evening summaries
fn fill_gaps(mut slots: [Option<PeriodSummary>; 3]) -> Option<[PeriodSummary; 3]> {
    for i in 1..slots.len() {
        if slots[i].is_none() {
            slots[i] = slots[i - 1].clone();
        }
    }

    let first = slots.iter().flatten().next()?.clone();

    Some(slots.map(|s| s.unwrap_or_else(|| first.clone())))
}

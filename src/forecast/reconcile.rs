use chrono::NaiveDate;
use crate::forecast::period::day_label;
use crate::models::forecast::{CurrentConditions, DayAggregate, DayKind, PeriodSummary};

/// Condition shown for every period of a placeholder day
pub const NO_CONDITION: &str = "NONE";

/// Prepends a placeholder for today if the forecast doesn't start with today.
///
/// The forecast window and the current conditions are fetched at slightly different times, so
/// around midnight the first forecast day may already be tomorrow. In that case a placeholder
/// carrying high, low and icon from the current conditions is put in front. Existing days are
/// never removed.
///
/// # Arguments
///
/// * 'days' - aggregated forecast days ordered by date
/// * 'today' - the caller's current local date
/// * 'current' - current conditions snapshot
pub fn reconcile_today(mut days: Vec<DayAggregate>, today: NaiveDate, current: &CurrentConditions) -> Vec<DayAggregate> {
    let today_label = day_label(today);

    if days.first().is_some_and(|d| d.day == today_label) {
        return days;
    }

    let placeholder = DayAggregate {
        date: today,
        day: today_label,
        hi: current.hi,
        lo: current.lo,
        morning: PeriodSummary { condition: NO_CONDITION.to_string(), icon: None },
        noon: PeriodSummary { condition: NO_CONDITION.to_string(), icon: None },
        evening: PeriodSummary { condition: NO_CONDITION.to_string(), icon: Some(current.icon.clone()) },
        kind: DayKind::Placeholder,
    };
    days.insert(0, placeholder);

    days
}

use std::fmt;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use crate::errors::ForecastError;
use crate::models::forecast::ForecastObservation;

/// Largest accepted distance from UTC, in seconds
pub const MAX_UTC_OFFSET: i32 = 16 * 3600;

/// Part of a local day an observation belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Morning,
    Noon,
    Evening,
}

impl Period {
    /// Morning is [0, 12), noon is [12, 18) and evening is [18, 24)
    ///
    /// # Arguments
    ///
    /// * 'hour' - local hour of day
    pub fn from_hour(hour: u32) -> Period {
        match hour {
            0..12 => Period::Morning,
            12..18 => Period::Noon,
            _ => Period::Evening,
        }
    }

    /// Day/night tag an icon shown for this period should carry
    pub fn icon_suffix(&self) -> char {
        match self {
            Period::Morning | Period::Noon => 'd',
            Period::Evening => 'n',
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Period::Morning => 0,
            Period::Noon => 1,
            Period::Evening => 2,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Period::Morning => write!(f, "MORNING"),
            Period::Noon    => write!(f, "NOON"),
            Period::Evening => write!(f, "EVENING"),
        }
    }
}

/// An observation placed in local time
#[derive(Debug, Clone)]
pub struct LocalizedObservation<'a> {
    pub observation: &'a ForecastObservation,
    pub local_time: NaiveDateTime,
    pub date: NaiveDate,
    pub day: String,
    pub period: Period,
}

/// Upper case three letter weekday label, e.g. `MON`
///
/// # Arguments
///
/// * 'date' - the date to label
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string().to_uppercase()
}

/// Places every observation in local time given the offset from UTC, keeping input order
///
/// # Arguments
///
/// * 'observations' - raw forecast observations
/// * 'utc_offset' - offset from UTC in seconds
pub fn localize(observations: &[ForecastObservation], utc_offset: i32) -> Result<Vec<LocalizedObservation<'_>>, ForecastError> {
    if utc_offset.unsigned_abs() > MAX_UTC_OFFSET.unsigned_abs() {
        return Err(ForecastError::InvalidOffset(utc_offset));
    }
    let offset = FixedOffset::east_opt(utc_offset)
        .ok_or(ForecastError::InvalidOffset(utc_offset))?;

    let localized = observations
        .iter()
        .map(|o| {
            let local_time = o.date_time.with_timezone(&offset).naive_local();
            let date = local_time.date();
            LocalizedObservation {
                observation: o,
                local_time,
                date,
                day: day_label(date),
                period: Period::from_hour(local_time.hour()),
            }
        })
        .collect();

    Ok(localized)
}

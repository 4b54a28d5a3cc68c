use crate::errors::ForecastError;
use crate::forecast::period::{LocalizedObservation, Period};
use crate::forecast::priority::{icon_stem, rank};
use crate::models::forecast::PeriodSummary;

/// Selects the most severe condition among the observations of one bucket.
///
/// Observations are expected in chronological order; among equally severe conditions the first
/// one wins. The icon of the winner gets its day/night tag set from the period rather than from
/// the raw observation, since slots close to dusk or dawn may carry a tag that doesn't match.
///
/// The bucket must not be empty.
///
/// # Arguments
///
/// * 'bucket' - observations sharing the same date and period
/// * 'period' - the period of the bucket
pub fn resolve(bucket: &[&LocalizedObservation], period: Period) -> Result<PeriodSummary, ForecastError> {
    let mut dominant = bucket[0];
    let mut best = rank(&dominant.observation.icon)?;

    for &lo in &bucket[1..] {
        let r = rank(&lo.observation.icon)?;
        if r < best {
            best = r;
            dominant = lo;
        }
    }

    let icon = format!("{}{}", icon_stem(&dominant.observation.icon)?, period.icon_suffix());

    Ok(PeriodSummary { condition: dominant.observation.condition.clone(), icon: Some(icon) })
}

use chrono::{Duration, NaiveDate};

use crate::models::{Cycle, CyclePrediction};

/// Intervals at or below this many days are dropped as implausible.
pub const MIN_CYCLE_INTERVAL_DAYS: i64 = 15;
/// Intervals at or above this many days are dropped as implausible.
pub const MAX_CYCLE_INTERVAL_DAYS: i64 = 60;

/// Projects the next cycle start from the history of start dates.
///
/// Needs at least two cycles. Intervals between consecutive starts are kept
/// only when strictly between [`MIN_CYCLE_INTERVAL_DAYS`] and
/// [`MAX_CYCLE_INTERVAL_DAYS`]; the rest are ignored. The rounded mean of the
/// survivors is added to the latest start. `days_until_next_cycle` is counted
/// from `today` and goes negative once the prediction has passed.
pub fn get_cycle_prediction(cycles: &[Cycle], today: NaiveDate) -> CyclePrediction {
    if cycles.len() < 2 {
        return CyclePrediction::insufficient_data();
    }

    let mut starts: Vec<NaiveDate> = cycles.iter().map(|c| c.start_date).collect();
    starts.sort();

    let intervals: Vec<i64> = starts
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .filter(|days| *days > MIN_CYCLE_INTERVAL_DAYS && *days < MAX_CYCLE_INTERVAL_DAYS)
        .collect();

    if intervals.is_empty() {
        return CyclePrediction::insufficient_data();
    }

    let mean = intervals.iter().sum::<i64>() as f64 / intervals.len() as f64;
    let average = mean.round() as i64;

    let Some(last_start) = starts.last().copied() else {
        return CyclePrediction::insufficient_data();
    };
    let Some(predicted) = last_start.checked_add_signed(Duration::days(average)) else {
        return CyclePrediction::insufficient_data();
    };

    CyclePrediction {
        predicted_start_date: Some(predicted),
        days_until_next_cycle: Some((predicted - today).num_days()),
        average_cycle_length: Some(average),
    }
}

pub fn get_cycle_prediction_today(cycles: &[Cycle]) -> CyclePrediction {
    get_cycle_prediction(cycles, super::today())
}

//! Pure cycle computations.
//!
//! Everything here works on calendar dates and borrowed cycle slices. Callers
//! fetch a profile's cycles from the store and pass in the reference day
//! explicitly, so results depend only on the arguments.

mod prediction;
mod stats;
mod status;

pub use prediction::{
    get_cycle_prediction, get_cycle_prediction_today, MAX_CYCLE_INTERVAL_DAYS,
    MIN_CYCLE_INTERVAL_DAYS,
};
pub use stats::cycle_stats;
pub use status::{get_cycle_status, get_cycle_status_today};

use chrono::{Local, NaiveDate};

/// Current calendar day in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

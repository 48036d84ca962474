use chrono::NaiveDate;

use crate::models::{Cycle, CycleStatus};

/// Determines whether `reference` falls inside a logged cycle.
///
/// Cycles are scanned in the order given. When several logged cycles overlap
/// `reference`, the first one in that order is reported.
pub fn get_cycle_status(cycles: &[Cycle], reference: NaiveDate) -> CycleStatus {
    let Some(cycle) = cycles.iter().find(|c| c.contains(reference)) else {
        return CycleStatus::off_period();
    };

    let (start, _) = cycle.bounds();
    CycleStatus {
        is_on_period: true,
        current_day: (reference - start).num_days() + 1,
        active_cycle_id: Some(cycle.id),
    }
}

pub fn get_cycle_status_today(cycles: &[Cycle]) -> CycleStatus {
    get_cycle_status(cycles, super::today())
}

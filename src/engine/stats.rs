use crate::models::{Cycle, CycleStat, CycleStatsSummary};

/// Per-cycle lengths in start order, with averages over the values present.
///
/// `cycle_length` is the gap to the next start and is `None` for the latest
/// cycle. No outlier filtering is applied here.
pub fn cycle_stats(cycles: &[Cycle]) -> CycleStatsSummary {
    let mut ordered: Vec<&Cycle> = cycles.iter().collect();
    ordered.sort_by_key(|c| c.start_date);

    let stats: Vec<CycleStat> = ordered
        .iter()
        .enumerate()
        .map(|(i, cycle)| {
            let (first, last) = cycle.bounds();
            CycleStat {
                cycle_number: i + 1,
                cycle_id: cycle.id,
                start_date: cycle.start_date,
                period_length: (last - first).num_days() + 1,
                cycle_length: ordered
                    .get(i + 1)
                    .map(|next| (next.start_date - cycle.start_date).num_days()),
            }
        })
        .collect();

    CycleStatsSummary {
        average_period_length: average(stats.iter().map(|s| s.period_length)),
        average_cycle_length: average(stats.iter().filter_map(|s| s.cycle_length)),
        cycle_stats: stats,
    }
}

fn average(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (total, count) = values.fold((0i64, 0usize), |(t, n), v| (t + v, n + 1));
    (count > 0).then(|| total as f64 / count as f64)
}

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::aggregate::{
    hourly_volume, mean_distance, mean_duration, mode_share, SkippedRow, UnknownModePolicy,
};
use crate::chart::{distance_chart, duration_chart, hourly_chart, mode_share_chart};
use crate::data::mode::ModeCatalog;
use crate::data::model::CommuteTable;
use crate::layout::{compose, Dashboard, DashboardCharts, SkippedTrips, HOUR_COLUMN};

/// Run every aggregator over `table` and lay the resulting charts out.
///
/// Nothing is cached here; each call recomputes from the table.
pub fn build_dashboard(
    table: &CommuteTable,
    catalog: &ModeCatalog,
    policy: UnknownModePolicy,
) -> Result<Dashboard> {
    let share = mode_share(table).context("counting trips per mode")?;
    let durations =
        mean_duration(table, catalog, policy).context("averaging trip duration")?;
    let distances =
        mean_distance(table, catalog, policy).context("averaging trip distance")?;
    let hourly = hourly_volume(table).context("counting trips per hour")?;

    // Duration and distance skip the same rows, so only one of them is reported.
    report_skipped(&[durations.skipped.as_slice(), hourly.skipped.as_slice()]);
    let skipped = SkippedTrips {
        averages: durations.skipped.len(),
        hourly: hourly.skipped.len(),
    };
    if skipped.any() {
        log::warn!(
            "Skipped {} trips in per-mode averages and {} in hourly counts",
            skipped.averages,
            skipped.hourly
        );
    }

    let charts = DashboardCharts {
        mode_share: mode_share_chart(&share, catalog),
        hourly: hourly_chart(&hourly),
        distance: distance_chart(&distances, catalog),
        duration: duration_chart(&durations, catalog),
    };
    let mut columns = table.columns.clone();
    columns.push(HOUR_COLUMN.to_string());
    Ok(compose(charts, columns, table.len(), skipped))
}

/// Emit one warning per skipped row, joining the reasons from every aggregate.
fn report_skipped(lists: &[&[SkippedRow]]) {
    let mut by_row: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for skip in lists.iter().flat_map(|list| list.iter()) {
        by_row.entry(skip.row).or_default().push(&skip.reason);
    }
    for (row, reasons) in by_row {
        log::warn!("Row {row}: skipping {}", reasons.join("; "));
    }
}

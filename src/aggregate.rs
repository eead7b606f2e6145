//! Aggregations over the loaded commute table.
//!
//! Each function reads the shared table and returns a fresh, immutable
//! aggregate. None of them depend on each other. Rows an aggregate cannot use
//! are returned as [`SkippedRow`]s instead of being logged here, so a row that
//! is unusable for several aggregates is reported once by the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::mode::{ModeCatalog, ModeSpec};
use crate::data::model::{Cell, CommuteTable, MODE_COLUMN, START_TIME_COLUMN};
use crate::error::AggregateError;

/// What to do with a trip whose mode label is not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnknownModePolicy {
    /// Leave the trip out of per-mode averages and report it as skipped.
    #[default]
    Skip,
    /// Fail the aggregation.
    Reject,
}

/// Minutes in a day; start times are minutes from midnight.
pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

// ---------------------------------------------------------------------------
// Aggregate types
// ---------------------------------------------------------------------------

/// A trip left out of an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Trip count per observed mode label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeShare {
    pub counts: BTreeMap<String, usize>,
}

impl ModeShare {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Per-mode mean of a derived field, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeMeans {
    pub means: Vec<(String, f64)>,
    /// Trips left out because of an unknown mode or an unusable duration.
    pub skipped: Vec<SkippedRow>,
}

impl ModeMeans {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.means
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }
}

/// Trip count per start hour, ordered by hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlyVolume {
    pub counts: BTreeMap<u32, usize>,
    /// Trips left out because `start_time` was missing or invalid.
    pub skipped: Vec<SkippedRow>,
}

impl HourlyVolume {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Mode share
// ---------------------------------------------------------------------------

/// Count trips per mode label. Only observed labels appear.
pub fn mode_share(table: &CommuteTable) -> Result<ModeShare, AggregateError> {
    let mode_idx = column(table, MODE_COLUMN)?;
    let mut counts = BTreeMap::new();
    for row in &table.rows {
        let label = row[mode_idx].as_label().unwrap_or_default();
        *counts.entry(label).or_insert(0) += 1;
    }
    Ok(ModeShare { counts })
}

// ---------------------------------------------------------------------------
// Average duration / distance
// ---------------------------------------------------------------------------

/// Mean trip duration (minutes) per catalogued mode.
pub fn mean_duration(
    table: &CommuteTable,
    catalog: &ModeCatalog,
    policy: UnknownModePolicy,
) -> Result<ModeMeans, AggregateError> {
    per_mode_means(table, catalog, policy, |_, duration| duration)
}

/// Mean trip distance (metres) per catalogued mode, where each trip's
/// distance is its duration times the mode's fixed speed.
pub fn mean_distance(
    table: &CommuteTable,
    catalog: &ModeCatalog,
    policy: UnknownModePolicy,
) -> Result<ModeMeans, AggregateError> {
    per_mode_means(table, catalog, policy, |mode, duration| {
        duration * mode.speed_m_per_min
    })
}

fn per_mode_means<F>(
    table: &CommuteTable,
    catalog: &ModeCatalog,
    policy: UnknownModePolicy,
    derive: F,
) -> Result<ModeMeans, AggregateError>
where
    F: Fn(&ModeSpec, f64) -> f64,
{
    let mode_idx = column(table, MODE_COLUMN)?;
    let duration_idx: Vec<usize> = catalog
        .iter()
        .map(|m| column(table, &m.duration_column))
        .collect::<Result<_, _>>()?;

    let mut sums = vec![0.0; catalog.len()];
    let mut counts = vec![0usize; catalog.len()];
    let mut skipped = Vec::new();

    for (row_no, row) in table.rows.iter().enumerate() {
        let label = row[mode_idx].as_label().unwrap_or_default();
        let Some((pos, mode)) = catalog.find(&label) else {
            match policy {
                UnknownModePolicy::Reject => {
                    return Err(AggregateError::UnknownMode { row: row_no, label });
                }
                UnknownModePolicy::Skip => {
                    skipped.push(SkippedRow {
                        row: row_no,
                        reason: format!("unrecognized mode '{label}'"),
                    });
                    continue;
                }
            }
        };

        match row[duration_idx[pos]].as_f64().filter(|d| d.is_finite()) {
            Some(duration) => {
                sums[pos] += derive(mode, duration);
                counts[pos] += 1;
            }
            None => skipped.push(SkippedRow {
                row: row_no,
                reason: format!(
                    "{label} trip with unusable {} = {}",
                    mode.duration_column, row[duration_idx[pos]]
                ),
            }),
        }
    }

    let means = catalog
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, mode)| (mode.label.clone(), sums[i] / counts[i] as f64))
        .collect();

    Ok(ModeMeans { means, skipped })
}

// ---------------------------------------------------------------------------
// Hourly volume
// ---------------------------------------------------------------------------

/// Hour bucket (0..=23) of a start time in minutes from midnight.
/// `None` for negative, non-finite or past-midnight input.
pub fn hour_of(start_minutes: f64) -> Option<u32> {
    if !(0.0..MINUTES_PER_DAY).contains(&start_minutes) {
        return None;
    }
    Some((start_minutes / 60.0).floor() as u32)
}

/// Hour bucket of a `start_time` cell, for the table panel's derived column.
pub fn cell_hour(cell: &Cell) -> Option<u32> {
    cell.as_f64().and_then(hour_of)
}

/// Count trips per start hour.
pub fn hourly_volume(table: &CommuteTable) -> Result<HourlyVolume, AggregateError> {
    let start_idx = column(table, START_TIME_COLUMN)?;
    let mut counts = BTreeMap::new();
    let mut skipped = Vec::new();

    for (row_no, row) in table.rows.iter().enumerate() {
        match cell_hour(&row[start_idx]) {
            Some(hour) => *counts.entry(hour).or_insert(0) += 1,
            None => skipped.push(SkippedRow {
                row: row_no,
                reason: format!("invalid start_time = {}", row[start_idx]),
            }),
        }
    }

    Ok(HourlyVolume { counts, skipped })
}

fn column(table: &CommuteTable, name: &str) -> Result<usize, AggregateError> {
    table
        .column_index(name)
        .ok_or_else(|| AggregateError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};

    fn ab_catalog() -> ModeCatalog {
        ModeCatalog::new(vec![
            ModeSpec::new("A", 100.0, BLUE),
            ModeSpec::new("B", 50.0, RED),
        ])
    }

    /// Rows of (mode, start_time, A duration, B duration).
    fn ab_table(rows: &[(&str, Cell, Cell, Cell)]) -> CommuteTable {
        CommuteTable::new(
            vec![
                "transportation".into(),
                "start_time".into(),
                "A_total_duration".into(),
                "B_total_duration".into(),
            ],
            rows.iter()
                .map(|(m, s, a, b)| vec![Cell::String(m.to_string()), s.clone(), a.clone(), b.clone()])
                .collect(),
        )
    }

    fn two_trips() -> CommuteTable {
        ab_table(&[
            ("A", Cell::Integer(0), Cell::Integer(10), Cell::Null),
            ("B", Cell::Integer(60), Cell::Null, Cell::Integer(20)),
        ])
    }

    #[test]
    fn mode_share_counts_each_mode() {
        let share = mode_share(&two_trips()).unwrap();
        assert_eq!(share.counts.get("A"), Some(&1));
        assert_eq!(share.counts.get("B"), Some(&1));
        assert_eq!(share.total(), 2);
    }

    #[test]
    fn mean_duration_selects_the_mode_column() {
        let means = mean_duration(&two_trips(), &ab_catalog(), UnknownModePolicy::Skip).unwrap();
        assert_eq!(means.means, vec![("A".into(), 10.0), ("B".into(), 20.0)]);
        assert!(means.skipped.is_empty());
    }

    #[test]
    fn mean_distance_scales_by_speed() {
        let means = mean_distance(&two_trips(), &ab_catalog(), UnknownModePolicy::Skip).unwrap();
        assert_eq!(means.get("A"), Some(1000.0));
        assert_eq!(means.get("B"), Some(1000.0));
    }

    #[test]
    fn distance_mean_is_duration_mean_times_speed() {
        let table = ab_table(&[
            ("A", Cell::Integer(0), Cell::Float(3.3), Cell::Null),
            ("A", Cell::Integer(0), Cell::Float(7.1), Cell::Null),
            ("A", Cell::Integer(0), Cell::Float(12.9), Cell::Null),
            ("B", Cell::Integer(0), Cell::Null, Cell::Float(41.7)),
            ("B", Cell::Integer(0), Cell::Null, Cell::Float(0.4)),
        ]);
        let catalog = ab_catalog();
        let durations = mean_duration(&table, &catalog, UnknownModePolicy::Skip).unwrap();
        let distances = mean_distance(&table, &catalog, UnknownModePolicy::Skip).unwrap();
        for mode in catalog.iter() {
            let d = durations.get(&mode.label).unwrap();
            let m = distances.get(&mode.label).unwrap();
            assert!((m - d * mode.speed_m_per_min).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_mode_is_skipped_or_rejected() {
        let table = ab_table(&[
            ("A", Cell::Integer(0), Cell::Integer(10), Cell::Null),
            ("C", Cell::Integer(0), Cell::Integer(99), Cell::Integer(99)),
        ]);
        let catalog = ab_catalog();

        let skipped = mean_duration(&table, &catalog, UnknownModePolicy::Skip).unwrap();
        assert_eq!(skipped.means, vec![("A".into(), 10.0)]);
        assert_eq!(skipped.skipped.len(), 1);
        assert_eq!(skipped.skipped[0].row, 1);

        let err = mean_duration(&table, &catalog, UnknownModePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            AggregateError::UnknownMode {
                row: 1,
                label: "C".into()
            }
        );

        // Mode share still reports every observed label.
        assert_eq!(mode_share(&table).unwrap().counts.get("C"), Some(&1));
    }

    #[test]
    fn non_numeric_duration_is_skipped_not_zeroed() {
        let table = ab_table(&[
            ("A", Cell::Integer(0), Cell::Integer(10), Cell::Null),
            ("A", Cell::Integer(0), Cell::String("n/a".into()), Cell::Null),
        ]);
        let means = mean_duration(&table, &ab_catalog(), UnknownModePolicy::Skip).unwrap();
        assert_eq!(means.get("A"), Some(10.0));
        assert_eq!(means.get("B"), None);
        assert_eq!(means.skipped.len(), 1);
        assert!(means.skipped[0].reason.contains("n/a"));
    }

    #[test]
    fn start_times_bucket_by_hour() {
        let table = ab_table(&[
            ("A", Cell::Integer(0), Cell::Null, Cell::Null),
            ("A", Cell::Integer(59), Cell::Null, Cell::Null),
            ("A", Cell::Integer(60), Cell::Null, Cell::Null),
            ("B", Cell::Integer(125), Cell::Null, Cell::Null),
        ]);
        let volume = hourly_volume(&table).unwrap();
        assert_eq!(volume.counts, BTreeMap::from([(0, 2), (1, 1), (2, 1)]));
        assert_eq!(volume.total(), table.len());
    }

    #[test]
    fn invalid_start_times_are_skipped() {
        let table = ab_table(&[
            ("A", Cell::Float(600.5), Cell::Null, Cell::Null),
            ("A", Cell::Integer(-5), Cell::Null, Cell::Null),
            ("A", Cell::String("noon".into()), Cell::Null, Cell::Null),
            ("A", Cell::Null, Cell::Null, Cell::Null),
        ]);
        let volume = hourly_volume(&table).unwrap();
        assert_eq!(volume.counts, BTreeMap::from([(10, 1)]));
        let rows: Vec<usize> = volume.skipped.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn hour_of_rejects_nan_and_negative() {
        assert_eq!(hour_of(f64::NAN), None);
        assert_eq!(hour_of(-0.1), None);
        assert_eq!(hour_of(1439.9), Some(23));
    }

    #[test]
    fn hour_of_rejects_times_past_midnight() {
        assert_eq!(hour_of(MINUTES_PER_DAY), None);
        assert_eq!(hour_of(1e300), None);
        assert_eq!(hour_of(9_223_372_036_854_775_807.0), None);
    }

    #[test]
    fn huge_start_times_are_skipped_not_saturated() {
        let table = ab_table(&[
            ("A", Cell::Float(1e300), Cell::Null, Cell::Null),
            ("A", Cell::Integer(i64::MAX), Cell::Null, Cell::Null),
            ("A", Cell::Integer(1440), Cell::Null, Cell::Null),
            ("A", Cell::Integer(545), Cell::Null, Cell::Null),
        ]);
        let volume = hourly_volume(&table).unwrap();
        assert_eq!(volume.counts, BTreeMap::from([(9, 1)]));
        assert_eq!(volume.skipped.len(), 3);
        assert_eq!(volume.total() + volume.skipped.len(), table.len());
    }

    #[test]
    fn cell_hour_reads_numeric_cells() {
        assert_eq!(cell_hour(&Cell::Integer(610)), Some(10));
        assert_eq!(cell_hour(&Cell::String("noon".into())), None);
        assert_eq!(cell_hour(&Cell::Null), None);
    }

    #[test]
    fn missing_column_is_reported() {
        let table = CommuteTable::new(vec!["transportation".into()], vec![]);
        assert_eq!(
            hourly_volume(&table).unwrap_err(),
            AggregateError::MissingColumn("start_time".into())
        );
    }
}

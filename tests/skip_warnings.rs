use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use ladybug_dashboard::aggregate::UnknownModePolicy;
use ladybug_dashboard::data::loader::read_csv;
use ladybug_dashboard::data::mode::ModeCatalog;
use ladybug_dashboard::pipeline::build_dashboard;

/// Keeps every warning so the test can count them.
struct Capture(Mutex<Vec<String>>);

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.0.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static WARNINGS: Capture = Capture(Mutex::new(Vec::new()));

const TRIPS: &str = "\
transportation,start_time,ladybug_total_duration,foot_total_duration
ladybug,545,6.0,
scooter,600,3.0,3.0
foot,610,,n/a
foot,noon,,12.0
scooter,later,1.0,1.0
";

#[test]
fn each_skipped_row_is_reported_once() {
    log::set_logger(&WARNINGS).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let table = read_csv(TRIPS.as_bytes(), &ModeCatalog::default()).unwrap();
    let dashboard = build_dashboard(&table, &ModeCatalog::default(), UnknownModePolicy::Skip)
        .unwrap();
    assert_eq!(dashboard.skipped.averages, 3);
    assert_eq!(dashboard.skipped.hourly, 2);

    let warnings = WARNINGS.0.lock().unwrap().clone();
    for row in 1..=4 {
        let prefix = format!("Row {row}:");
        let hits = warnings.iter().filter(|w| w.starts_with(&prefix)).count();
        assert_eq!(hits, 1, "row {row} in {warnings:?}");
    }
    assert!(!warnings.iter().any(|w| w.starts_with("Row 0:")));

    // A row unusable for both averages and hourly counts gives both reasons.
    let row4 = warnings.iter().find(|w| w.starts_with("Row 4:")).unwrap();
    assert!(row4.contains("scooter") && row4.contains("later"));
}

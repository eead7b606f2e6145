use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;

use super::mode::ModeCatalog;
use super::model::{Cell, CommuteTable, MODE_COLUMN, START_TIME_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the commute CSV at `path`.
///
/// Layout: header row with column names, one trip per row. Required columns:
/// * `transportation` – mode label, never empty
/// * `start_time`     – minutes from midnight
/// * `<mode>_total_duration` for every mode in `catalog`
///
/// All other columns are kept for the table panel.
pub fn load_csv(path: &Path, catalog: &ModeCatalog) -> Result<CommuteTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, catalog)
}

/// Parse a commute CSV from any reader.
pub fn read_csv<R: Read>(reader: R, catalog: &ModeCatalog) -> Result<CommuteTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let required = [MODE_COLUMN, START_TIME_COLUMN]
        .into_iter()
        .chain(catalog.iter().map(|m| m.duration_column.as_str()));
    for name in required {
        if !columns.iter().any(|c| c == name) {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }
    let mode_idx = columns
        .iter()
        .position(|c| c == MODE_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn(MODE_COLUMN.to_string()))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        // Mode labels are categorical, so they keep their text as written.
        let row: Vec<Cell> = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i != mode_idx {
                    Cell::parse(field)
                } else if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::String(field.to_string())
                }
            })
            .collect();
        if row[mode_idx] == Cell::Null {
            return Err(LoadError::EmptyMode { row: row_no });
        }
        rows.push(row);
    }

    Ok(CommuteTable::new(columns, rows))
}

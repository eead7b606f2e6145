use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single value in the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed CSV cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// Guess the type of a raw CSV field. Empty text is `Null`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::String(s.to_string())
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text form used for categorical columns (numbers are rendered as-is).
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::String(s) => Some(s.clone()),
            Cell::Integer(i) => Some(i.to_string()),
            Cell::Float(v) => Some(v.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// CommuteTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Column holding the transportation mode label of each trip.
pub const MODE_COLUMN: &str = "transportation";
/// Column holding the trip start time in minutes from midnight.
pub const START_TIME_COLUMN: &str = "start_time";

/// The full parsed CSV. Every source column is kept so the table panel can
/// show the raw data; aggregators look columns up by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CommuteTable {
    /// Header names in file order.
    pub columns: Vec<String>,
    /// Rows, each with exactly `columns.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl CommuteTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        CommuteTable { columns, rows }
    }

    /// Index of a column by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

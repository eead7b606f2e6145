use serde::Serialize;

use crate::color::{Rgb, BLUE, RED};

/// Walking speed: 5 km/h expressed in metres per minute.
pub const FOOT_SPEED_M_PER_MIN: f64 = 5.0 * (1000.0 / 60.0);
/// Ladybug speed: 17 km/h expressed in metres per minute.
pub const LADYBUG_SPEED_M_PER_MIN: f64 = 17.0 * (1000.0 / 60.0);

// ---------------------------------------------------------------------------
// ModeSpec – one transportation mode
// ---------------------------------------------------------------------------

/// Everything the pipeline needs to know about one transportation mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSpec {
    /// Label as it appears in the `transportation` column.
    pub label: String,
    /// Column holding this mode's trip duration in minutes.
    pub duration_column: String,
    /// Fixed travel speed used to derive distance.
    pub speed_m_per_min: f64,
    /// Series colour in charts.
    pub color: Rgb,
}

impl ModeSpec {
    /// Mode whose duration lives in `<label>_total_duration`.
    pub fn new(label: &str, speed_m_per_min: f64, color: Rgb) -> Self {
        ModeSpec {
            label: label.to_string(),
            duration_column: format!("{label}_total_duration"),
            speed_m_per_min,
            color,
        }
    }

    /// Legend name: label with an upper-case first letter.
    pub fn display_name(&self) -> String {
        capitalize(&self.label)
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// ModeCatalog – label → selector lookup
// ---------------------------------------------------------------------------

/// Ordered table of known modes. Order drives bar order and legend order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeCatalog {
    modes: Vec<ModeSpec>,
}

impl Default for ModeCatalog {
    fn default() -> Self {
        ModeCatalog::new(vec![
            ModeSpec::new("ladybug", LADYBUG_SPEED_M_PER_MIN, BLUE),
            ModeSpec::new("foot", FOOT_SPEED_M_PER_MIN, RED),
        ])
    }
}

impl ModeCatalog {
    pub fn new(modes: Vec<ModeSpec>) -> Self {
        ModeCatalog { modes }
    }

    pub fn get(&self, label: &str) -> Option<&ModeSpec> {
        self.modes.iter().find(|m| m.label == label)
    }

    /// Catalog position and spec of a label; the position keeps aggregates in
    /// catalog order.
    pub fn find(&self, label: &str) -> Option<(usize, &ModeSpec)> {
        self.modes.iter().enumerate().find(|(_, m)| m.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModeSpec> {
        self.modes.iter()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

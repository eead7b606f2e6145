//! Renderer-independent chart descriptions and the builders that turn
//! aggregates into them.

use serde::Serialize;

use crate::aggregate::{HourlyVolume, ModeMeans, ModeShare};
use crate::color::{generate_palette, Rgb, BLUE, GRAY, RED};
use crate::data::mode::{capitalize, ModeCatalog};

/// Every chart panel is drawn at this size (px).
pub const CHART_SIZE: [f32; 2] = [400.0, 400.0];
/// Displayed hour window on the hourly chart. Data outside it is kept.
pub const HOUR_WINDOW: [f64; 2] = [9.0, 18.0];
/// Inner radius of the mode-share donut, as a fraction of the outer radius.
pub const PIE_HOLE: f64 = 0.3;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    LineScatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the whole pie in `0.0..=1.0`.
    pub fraction: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    Pie {
        hole: f64,
        slices: Vec<PieSlice>,
    },
    Bar {
        name: String,
        categories: Vec<String>,
        values: Vec<f64>,
        color: Rgb,
    },
    Line {
        name: String,
        points: Vec<[f64; 2]>,
        color: Rgb,
        width: f32,
    },
    Markers {
        name: String,
        points: Vec<[f64; 2]>,
        color: Rgb,
        size: f32,
    },
}

impl Series {
    pub fn is_empty(&self) -> bool {
        match self {
            Series::Pie { slices, .. } => slices.is_empty(),
            Series::Bar { values, .. } => values.is_empty(),
            Series::Line { points, .. } | Series::Markers { points, .. } => points.is_empty(),
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, also used as the widget id.
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Displayed x range; `None` fits the data.
    pub x_range: Option<[f64; 2]>,
    pub legend_title: Option<String>,
    pub size: [f32; 2],
    pub template: Template,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn new(id: &str, kind: ChartKind, title: &str) -> Self {
        ChartSpec {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            x_label: None,
            y_label: None,
            x_range: None,
            legend_title: None,
            size: CHART_SIZE,
            template: Template::Dark,
            series: Vec::new(),
        }
    }

    fn axes(mut self, x: &str, y: &str) -> Self {
        self.x_label = Some(x.to_string());
        self.y_label = Some(y.to_string());
        self
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Donut chart of trips per mode, largest share first.
///
/// Catalogued modes keep their catalog colour; any other label gets a
/// generated one.
pub fn mode_share_chart(share: &ModeShare, catalog: &ModeCatalog) -> ChartSpec {
    let total = share.total() as f64;
    let mut entries: Vec<(&String, usize)> = share.counts.iter().map(|(l, &n)| (l, n)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut fallback = generate_palette(entries.len()).into_iter();
    let slices = entries
        .into_iter()
        .map(|(label, count)| {
            let color = match catalog.get(label) {
                Some(mode) => mode.color,
                None => fallback.next().unwrap_or(GRAY),
            };
            PieSlice {
                label: label.clone(),
                value: count as f64,
                fraction: if total > 0.0 { count as f64 / total } else { 0.0 },
                color,
            }
        })
        .collect();

    let mut spec = ChartSpec::new("mode_share", ChartKind::Pie, "Ladybug vs. Foot Share");
    spec.series.push(Series::Pie {
        hole: PIE_HOLE,
        slices,
    });
    spec
}

/// Bar chart of mean trip duration per mode.
pub fn duration_chart(means: &ModeMeans, catalog: &ModeCatalog) -> ChartSpec {
    let mut spec = ChartSpec::new("avg_duration", ChartKind::Bar, "Average Trip Duration (min)")
        .axes("Mode", "Average duration (min)");
    spec.legend_title = Some("Transportation".to_string());
    spec.series = mode_bars(means, catalog);
    spec
}

/// Bar chart of mean trip distance per mode.
pub fn distance_chart(means: &ModeMeans, catalog: &ModeCatalog) -> ChartSpec {
    let mut spec = ChartSpec::new("avg_distance", ChartKind::Bar, "Average Trip Distance (m)")
        .axes("Mode", "Average distance (m)");
    spec.series = mode_bars(means, catalog);
    spec
}

/// One single-bar series per mode so each mode gets its own legend entry.
fn mode_bars(means: &ModeMeans, catalog: &ModeCatalog) -> Vec<Series> {
    means
        .means
        .iter()
        .map(|(label, value)| Series::Bar {
            name: capitalize(label),
            categories: vec![label.clone()],
            values: vec![*value],
            color: catalog.get(label).map(|m| m.color).unwrap_or(GRAY),
        })
        .collect()
}

/// Line plus markers of trips per start hour.
pub fn hourly_chart(volume: &HourlyVolume) -> ChartSpec {
    let points: Vec<[f64; 2]> = volume
        .counts
        .iter()
        .map(|(&hour, &count)| [hour as f64, count as f64])
        .collect();

    let mut spec = ChartSpec::new("hourly_volume", ChartKind::LineScatter, "Trips per Hour")
        .axes("Hour of day", "Trips");
    spec.x_range = Some(HOUR_WINDOW);
    spec.series = vec![
        Series::Line {
            name: "Line".to_string(),
            points: points.clone(),
            color: BLUE,
            width: 2.0,
        },
        Series::Markers {
            name: "Scatter".to_string(),
            points,
            color: RED,
            size: 10.0,
        },
    ];
    spec
}

//! Fixed dashboard layout: four charts over a raw-data table on a 12-column grid.

use eframe::egui::{pos2, Rect};
use serde::Serialize;

use crate::chart::ChartSpec;
use crate::color::{Rgb, ACCENT};

pub const GRID_COLUMNS: usize = 12;
pub const GRID_ROWS: usize = 5;
pub const MAX_WIDTH: f32 = 1200.0;
pub const TABLE_PAGE_SIZE: usize = 6;
pub const DASHBOARD_TITLE: &str = "Ladybug Dashboard";
/// Derived column appended to the table panel: hour bucket of `start_time`.
pub const HOUR_COLUMN: &str = "hour";

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Half-open row/column ranges on the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSpan {
    pub rows: [usize; 2],
    pub cols: [usize; 2],
}

impl GridSpan {
    pub const fn new(rows: [usize; 2], cols: [usize; 2]) -> Self {
        GridSpan { rows, cols }
    }

    /// Screen rectangle of this span inside `outer`.
    pub fn rect(&self, outer: Rect) -> Rect {
        let cell_w = outer.width() / GRID_COLUMNS as f32;
        let cell_h = outer.height() / GRID_ROWS as f32;
        Rect::from_min_max(
            pos2(
                outer.min.x + self.cols[0] as f32 * cell_w,
                outer.min.y + self.rows[0] as f32 * cell_h,
            ),
            pos2(
                outer.min.x + self.cols[1] as f32 * cell_w,
                outer.min.y + self.rows[1] as f32 * cell_h,
            ),
        )
    }

    fn overlaps(&self, other: &GridSpan) -> bool {
        self.rows[0] < other.rows[1]
            && other.rows[0] < self.rows[1]
            && self.cols[0] < other.cols[1]
            && other.cols[0] < self.cols[1]
    }
}

// ---------------------------------------------------------------------------
// Table pagination
// ---------------------------------------------------------------------------

/// Splits `rows` rows into pages of `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub rows: usize,
    pub page_size: usize,
}

impl Pager {
    pub fn new(rows: usize, page_size: usize) -> Self {
        Pager {
            rows,
            page_size: page_size.max(1),
        }
    }

    /// At least one page, even for an empty table.
    pub fn page_count(&self) -> usize {
        self.rows.div_ceil(self.page_size).max(1)
    }

    /// Row indices shown on `page` (clamped to the last page).
    pub fn page_rows(&self, page: usize) -> std::ops::Range<usize> {
        let page = page.min(self.page_count() - 1);
        let start = (page * self.page_size).min(self.rows);
        let end = (start + self.page_size).min(self.rows);
        start..end
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelContent {
    Chart(ChartSpec),
    /// Raw data table over the full dataset.
    Table {
        columns: Vec<String>,
        pager: Pager,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub span: GridSpan,
    pub content: PanelContent,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        match &self.content {
            PanelContent::Chart(spec) => spec.is_empty(),
            PanelContent::Table { columns, pager } => columns.is_empty() || pager.rows == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
}

/// Trips left out of aggregates, surfaced in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkippedTrips {
    pub averages: usize,
    pub hourly: usize,
}

impl SkippedTrips {
    pub fn any(&self) -> bool {
        self.averages > 0 || self.hourly > 0
    }
}

/// Themed container holding every panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub accent: Rgb,
    pub header_background: Rgb,
    pub theme: Theme,
    pub max_width: f32,
    pub panels: Vec<Panel>,
    pub skipped: SkippedTrips,
}

/// The four charts the composer places, by role.
pub struct DashboardCharts {
    pub mode_share: ChartSpec,
    pub hourly: ChartSpec,
    pub distance: ChartSpec,
    pub duration: ChartSpec,
}

/// Place charts and the data table on the grid.
pub fn compose(
    charts: DashboardCharts,
    columns: Vec<String>,
    rows: usize,
    skipped: SkippedTrips,
) -> Dashboard {
    let panels = vec![
        Panel {
            span: GridSpan::new([0, 3], [0, 3]),
            content: PanelContent::Chart(charts.mode_share),
        },
        Panel {
            span: GridSpan::new([0, 3], [3, 6]),
            content: PanelContent::Chart(charts.hourly),
        },
        Panel {
            span: GridSpan::new([0, 3], [6, 9]),
            content: PanelContent::Chart(charts.distance),
        },
        Panel {
            span: GridSpan::new([0, 3], [9, 12]),
            content: PanelContent::Chart(charts.duration),
        },
        Panel {
            span: GridSpan::new([3, 5], [0, GRID_COLUMNS]),
            content: PanelContent::Table {
                columns,
                pager: Pager::new(rows, TABLE_PAGE_SIZE),
            },
        },
    ];
    debug_assert!(panels
        .iter()
        .enumerate()
        .all(|(i, a)| panels[i + 1..].iter().all(|b| !a.span.overlaps(&b.span))));

    Dashboard {
        title: DASHBOARD_TITLE.to_string(),
        accent: ACCENT,
        header_background: ACCENT,
        theme: Theme::Dark,
        max_width: MAX_WIDTH,
        panels,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_splits_rows() {
        let pager = Pager::new(13, 6);
        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.page_rows(0), 0..6);
        assert_eq!(pager.page_rows(2), 12..13);
        assert_eq!(pager.page_rows(99), 12..13);
    }

    #[test]
    fn empty_pager_has_one_empty_page() {
        let pager = Pager::new(0, 6);
        assert_eq!(pager.page_count(), 1);
        assert!(pager.page_rows(0).is_empty());
    }

    #[test]
    fn span_maps_onto_screen() {
        let outer = Rect::from_min_max(pos2(0.0, 0.0), pos2(1200.0, 500.0));
        let rect = GridSpan::new([0, 3], [3, 6]).rect(outer);
        assert_eq!(rect, Rect::from_min_max(pos2(300.0, 0.0), pos2(600.0, 300.0)));

        let table = GridSpan::new([3, 5], [0, 12]).rect(outer);
        assert_eq!(table.width(), 1200.0);
        assert_eq!(table.min.y, 300.0);
    }

    #[test]
    fn spans_overlap_only_when_sharing_cells() {
        let a = GridSpan::new([0, 3], [0, 3]);
        assert!(!a.overlaps(&GridSpan::new([0, 3], [3, 6])));
        assert!(a.overlaps(&GridSpan::new([2, 4], [2, 4])));
    }
}

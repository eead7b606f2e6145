use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

use crate::chart::{ChartSpec, PieSlice, Series};

/// Sub-segments per full turn when tessellating a donut.
const DONUT_STEPS: usize = 96;

// ---------------------------------------------------------------------------
// Chart panel
// ---------------------------------------------------------------------------

/// Render one chart spec into the available space.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.label(RichText::new(&spec.title).strong());
    if spec.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data");
        });
        return;
    }

    let width = ui.available_width().min(spec.size[0]);
    let height = ui.available_height().min(spec.size[1]);

    match spec.series.first() {
        Some(Series::Pie { hole, slices }) => pie(ui, spec, *hole, slices, width, height),
        _ => xy(ui, spec, width, height),
    }
}

fn pie(ui: &mut Ui, spec: &ChartSpec, hole: f64, slices: &[PieSlice], width: f32, height: f32) {
    Plot::new(&spec.id)
        .legend(Legend::default())
        .width(width)
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in slices {
                let end = start + slice.fraction;
                let color = slice.color.to_color32();
                for quad in donut_segments(start, end, hole) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color))
                            .name(&slice.label),
                    );
                }
                let [x, y] = polar((start + end) / 2.0, (1.0 + hole) / 2.0);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong(),
                ));
                start = end;
            }
        });
}

fn xy(ui: &mut Ui, spec: &ChartSpec, width: f32, height: f32) {
    // Bar charts place one category per integer x position.
    let categories: Vec<String> = spec
        .series
        .iter()
        .filter_map(|s| match s {
            Series::Bar { categories, .. } => Some(categories.clone()),
            _ => None,
        })
        .flatten()
        .collect();

    // A fixed x window pins the view, so navigation is off for those charts.
    let bounds = spec.x_range.map(|range| window_bounds(range, &spec.series));
    let navigable = bounds.is_none();
    let mut plot = Plot::new(&spec.id)
        .legend(Legend::default())
        .width(width)
        .height(height)
        .allow_boxed_zoom(navigable)
        .allow_drag(navigable)
        .allow_scroll(navigable)
        .allow_zoom(navigable);
    if let Some(x) = &spec.x_label {
        plot = plot.x_axis_label(x.as_str());
    }
    if let Some(y) = &spec.y_label {
        plot = plot.y_axis_label(y.as_str());
    }
    if !categories.is_empty() {
        let labels = categories.clone();
        plot = plot.x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        if let Some(bounds) = bounds {
            plot_ui.set_plot_bounds(bounds);
        }
        let mut slot = 0.0;
        for series in &spec.series {
            match series {
                Series::Bar {
                    name,
                    values,
                    color,
                    ..
                } => {
                    let bars: Vec<Bar> = values
                        .iter()
                        .map(|&v| {
                            let bar = Bar::new(slot, v).width(0.6).name(name);
                            slot += 1.0;
                            bar
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars).name(name).color(color.to_color32()),
                    );
                }
                Series::Line {
                    name,
                    points,
                    color,
                    width,
                } => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .name(name)
                            .color(color.to_color32())
                            .width(*width),
                    );
                }
                Series::Markers {
                    name,
                    points,
                    color,
                    size,
                } => {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points.clone()))
                            .name(name)
                            .color(color.to_color32())
                            .radius(size / 2.0),
                    );
                }
                Series::Pie { .. } => {}
            }
        }
    });
}

/// View for a chart with a fixed x window: x spans exactly `[lo, hi]`, y covers
/// zero and every point with a little headroom.
pub fn window_bounds([lo, hi]: [f64; 2], series: &[Series]) -> PlotBounds {
    let ys = series
        .iter()
        .filter_map(|s| match s {
            Series::Line { points, .. } | Series::Markers { points, .. } => Some(points),
            _ => None,
        })
        .flatten()
        .map(|p| p[1])
        .filter(|y| y.is_finite());
    let (y_min, y_max) = ys.fold((0.0_f64, 0.0_f64), |(min, max), y| (min.min(y), max.max(y)));
    let y_max = if y_max > y_min { y_max * 1.1 } else { y_min + 1.0 };
    PlotBounds::from_min_max([lo, y_min], [hi, y_max])
}

// ---------------------------------------------------------------------------
// Donut geometry
// ---------------------------------------------------------------------------

/// Point on the unit circle at `fraction` of a turn, starting at 12 o'clock
/// and going clockwise, scaled by `radius`.
fn polar(fraction: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * fraction;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Tessellate the ring sector between `start` and `end` (fractions of a turn)
/// into convex quads, since plot polygons only fill convex shapes.
pub fn donut_segments(start: f64, end: f64, hole: f64) -> Vec<Vec<[f64; 2]>> {
    if end <= start {
        return Vec::new();
    }
    let steps = (((end - start) * DONUT_STEPS as f64).ceil() as usize).max(1);
    let step = (end - start) / steps as f64;
    (0..steps)
        .map(|i| {
            let a = start + step * i as f64;
            let b = a + step;
            vec![polar(a, 1.0), polar(b, 1.0), polar(b, hole), polar(a, hole)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn quarter_sector_runs_clockwise_from_top() {
        let quads = donut_segments(0.0, 0.25, 0.3);
        assert_eq!(quads.len(), DONUT_STEPS / 4);
        assert!(close(quads[0][0], [0.0, 1.0]));
        assert!(close(quads[quads.len() - 1][1], [1.0, 0.0]));
        assert!(close(quads[0][3], [0.0, 0.3]));
    }

    #[test]
    fn hour_window_pins_x_and_fits_counts() {
        let chart = crate::chart::hourly_chart(&crate::aggregate::HourlyVolume {
            counts: [(7, 2), (9, 4), (13, 10)].into_iter().collect(),
            skipped: Vec::new(),
        });
        let [lo, hi] = chart.x_range.unwrap();
        let bounds = window_bounds([lo, hi], &chart.series);
        assert_eq!(bounds.min()[0], 9.0);
        assert_eq!(bounds.max()[0], 18.0);
        assert_eq!(bounds.min()[1], 0.0);
        assert!(bounds.max()[1] >= 10.0);
    }

    #[test]
    fn window_without_points_is_still_valid() {
        let bounds = window_bounds([9.0, 18.0], &[]);
        assert!(bounds.is_valid());
        assert_eq!(bounds.max()[1], 1.0);
    }

    #[test]
    fn empty_sector_has_no_quads() {
        assert!(donut_segments(0.5, 0.5, 0.3).is_empty());
    }

    #[test]
    fn tiny_sector_still_draws() {
        assert_eq!(donut_segments(0.0, 0.001, 0.3).len(), 1);
    }
}

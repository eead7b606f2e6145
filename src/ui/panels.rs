use eframe::egui::{self, Rect, RichText, Ui, UiBuilder};

use crate::color::{ACCENT_GREEN, ACCENT_RED};
use crate::layout::PanelContent;
use crate::state::AppState;
use crate::ui::plot;
use crate::ui::table::{self, PageNav};

const PANEL_GAP: f32 = 6.0;

// ---------------------------------------------------------------------------
// Header bar
// ---------------------------------------------------------------------------

/// Render the title bar on the accent background.
pub fn header(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(
            RichText::new(&state.dashboard.title)
                .color(egui::Color32::WHITE)
                .strong(),
        );
        ui.separator();
        ui.label(
            RichText::new(format!("{} trips loaded", state.table.len()))
                .color(ACCENT_GREEN.to_color32()),
        );
        let skipped = state.dashboard.skipped;
        if skipped.any() {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} skipped in averages, {} in hourly counts",
                    skipped.averages, skipped.hourly
                ))
                .color(ACCENT_RED.to_color32()),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard grid
// ---------------------------------------------------------------------------

/// Lay every panel out on the grid inside the available area.
pub fn grid(ui: &mut Ui, state: &mut AppState) {
    let available = ui.available_rect_before_wrap();
    let width = available.width().min(state.dashboard.max_width);
    let outer = Rect::from_min_size(available.min, egui::vec2(width, available.height()));

    let mut nav = None;
    for (i, panel) in state.dashboard.panels.iter().enumerate() {
        let rect = panel.span.rect(outer).shrink(PANEL_GAP / 2.0);
        ui.scope_builder(UiBuilder::new().max_rect(rect), |ui: &mut Ui| {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_size(ui.available_size());
                ui.push_id(i, |ui: &mut Ui| match &panel.content {
                    PanelContent::Chart(spec) => plot::chart(ui, spec),
                    PanelContent::Table { columns, pager } => {
                        nav = table::data_table(ui, &state.table, columns, *pager, state.page);
                    }
                });
            });
        });
    }

    match nav {
        Some(PageNav::Prev) => state.prev_page(),
        Some(PageNav::Next) => state.next_page(),
        None => {}
    }
}

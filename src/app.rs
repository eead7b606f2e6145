use eframe::egui;

use crate::layout::Theme;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let accent = state.dashboard.accent.to_color32();
        let mut visuals = match state.dashboard.theme {
            Theme::Dark => egui::Visuals::dark(),
        };
        visuals.selection.bg_fill = accent;
        visuals.hyperlink_color = accent;
        cc.egui_ctx.set_visuals(visuals);

        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title on accent background ----
        let header_fill = self.state.dashboard.header_background.to_color32();
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::default().fill(header_fill).inner_margin(8.0))
            .show(ctx, |ui| {
                panels::header(ui, &self.state);
            });

        // ---- Central panel: chart grid and data table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::grid(ui, &mut self.state);
        });
    }
}

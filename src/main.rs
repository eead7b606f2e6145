use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use ladybug_dashboard::app::DashboardApp;
use ladybug_dashboard::config::Config;
use ladybug_dashboard::data::cache::DataCache;
use ladybug_dashboard::data::mode::ModeCatalog;
use ladybug_dashboard::pipeline::build_dashboard;
use ladybug_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let cache = DataCache::new(&config.csv, ModeCatalog::default());
    let table = cache
        .table()
        .inspect_err(|e| log::error!("Failed to load trips: {e}"))
        .with_context(|| format!("loading {}", cache.path().display()))?;
    let dashboard = build_dashboard(&table, cache.catalog(), config.unknown_modes)?;

    if let Some(path) = &config.export {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &dashboard)
            .context("writing dashboard JSON")?;
        log::info!("Wrote dashboard description to {}", path.display());
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1240.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(dashboard, table);
    eframe::run_native(
        "Ladybug Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::TitanicExplorerApp;
use config::AppConfig;
use eframe::egui;
use state::Dashboard;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load().context("loading configuration")?;
    let selection = config.initial_selection()?;

    let dataset = match data::loader::load_file(&config.dataset_path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} passengers from {}",
        dataset.len(),
        config.dataset_path.display()
    );
    if dataset.is_empty() {
        log::warn!("{} has no passenger rows", config.dataset_path.display());
    }

    let dashboard = Dashboard::new(Arc::new(dataset), selection, config.histogram_bins);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(TitanicExplorerApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}

mod app;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use app::InventoryDashboardApp;
use eframe::egui;
use inventory_kpi::data::loader::load_file;

/// Read from the working directory at startup.
const DEFAULT_DATA_PATH: &str = "inventory_forecasting.csv";
const WINDOW_TITLE: &str = "Inventory KPI Dashboard";

fn main() -> Result<()> {
    env_logger::init();

    // A bad startup file is fatal: nothing to show without it.
    let path = Path::new(DEFAULT_DATA_PATH);
    let dataset = load_file(path).with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} records from {} ({} regions, {} categories, {} stores)",
        dataset.len(),
        path.display(),
        dataset.regions.len(),
        dataset.categories.len(),
        dataset.stores.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(InventoryDashboardApp::new(
                dataset,
                path.to_path_buf(),
            )))
        }),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}

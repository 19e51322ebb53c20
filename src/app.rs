use std::path::PathBuf;

use eframe::egui;
use inventory_kpi::data::model::InventoryDataset;
use inventory_kpi::state::AppState;

use crate::ui::{charts, panels};

const FILTER_PANEL_WIDTH: f32 = 240.0;

pub struct InventoryDashboardApp {
    pub state: AppState,
}

impl InventoryDashboardApp {
    /// Start with `dataset` loaded and every filter value selected.
    pub fn new(dataset: InventoryDataset, source: PathBuf) -> Self {
        let mut state = AppState::default();
        state.set_dataset(dataset, Some(source));
        Self { state }
    }
}

impl eframe::App for InventoryDashboardApp {
    // Panels must be added before the central one so it takes the remaining space.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::SidePanel::left("filters")
            .default_width(FILTER_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}

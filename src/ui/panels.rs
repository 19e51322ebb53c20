use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use inventory_kpi::data::loader::load_file;
use inventory_kpi::data::model::Dimension;
use inventory_kpi::report::write_summary;
use inventory_kpi::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multiselect per dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let all_values = dataset.observed(dim);

                // Show count of selected / total in the header
                let n_selected = state.selection.values(dim).len();
                let n_total = all_values.len();
                let header_text = format!("Select {dim}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(dim != Dimension::Store)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.selection.select_all(dim, dataset);
                                changed = true;
                            }
                            if ui.small_button("None").clicked() {
                                state.selection.select_none(dim);
                                changed = true;
                            }
                        });

                        for value in all_values {
                            let mut checked = state.selection.values(dim).contains(value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.selection.toggle(dim, value);
                                changed = true;
                            }
                        }
                    });
            }
        });

    // Only recompute when a widget actually moved.
    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(source) = &state.source {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open inventory data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {}",
                    dataset.len(),
                    path.display()
                );
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                // Keep showing the previous dataset.
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export KPI summary")
        .add_filter("JSON", &["json"])
        .set_file_name("inventory_kpis.json")
        .save_file();

    if let Some(path) = file {
        match write_summary(&path, &state.selection, &state.summary) {
            Ok(()) => {
                log::info!("Exported KPI summary to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};
use inventory_kpi::color::{generate_palette, ValueScale};
use inventory_kpi::data::aggregate::{format_metric, DailyInventory};
use inventory_kpi::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

/// Triangles in a full circle; slices get a proportional share.
const PIE_SEGMENTS: usize = 96;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render KPI tiles and the four charts for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view inventory KPIs  (File → Open…)");
        });
        return;
    }

    let summary = &state.summary;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Inventory KPI Dashboard");
            ui.add_space(8.0);

            ui.columns(2, |cols: &mut [Ui]| {
                kpi_tile(
                    &mut cols[0],
                    "Stockout Rate (%)",
                    &format_metric(summary.stockout_rate, "%"),
                );
                kpi_tile(
                    &mut cols[1],
                    "Avg Inventory Level",
                    &format_metric(summary.average_inventory, ""),
                );
            });

            ui.separator();
            ui.strong("Inventory Level Over Time");
            inventory_over_time(ui, &summary.daily_inventory);

            ui.separator();
            ui.strong("Total Inventory per Store");
            totals_bar_chart(ui, "store_totals", "Store ID", &summary.totals.by_store);

            ui.separator();
            ui.strong("Inventory per Category");
            totals_bar_chart(ui, "category_totals", "Category", &summary.totals.by_category);

            ui.separator();
            ui.strong("Inventory Distribution by Region");
            region_pie(ui, &summary.totals.by_region);
        });
}

fn kpi_tile(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.label(RichText::new(title).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn empty_chart(ui: &mut Ui) {
    ui.label(RichText::new("no data").italics().weak());
}

// ---------------------------------------------------------------------------
// Line chart: daily average inventory
// ---------------------------------------------------------------------------

fn inventory_over_time(ui: &mut Ui, series: &[DailyInventory]) {
    if series.is_empty() {
        empty_chart(ui);
        return;
    }

    // x is days since 0001-01-01 so the axis stays linear in time.
    let points: PlotPoints = series
        .iter()
        .map(|p| [p.date.num_days_from_ce() as f64, p.avg_inventory])
        .collect();

    Plot::new("inventory_over_time")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Avg Inventory Level")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| day_label(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Avg Inventory Level").width(1.5));
        });
}

fn day_label(value: f64) -> String {
    let day = value.round();
    if (value - day).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(day as i32)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bar charts: totals per store / category
// ---------------------------------------------------------------------------

fn totals_bar_chart(ui: &mut Ui, id: &str, axis: &str, totals: &BTreeMap<String, f64>) {
    if totals.is_empty() {
        empty_chart(ui);
        return;
    }

    // Shade bars by height.
    let scale = ValueScale::from_values(totals.values().copied());
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (key, &value))| {
            Bar::new(i as f64, value)
                .name(key)
                .fill(scale.color_for(value))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = totals.keys().cloned().collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(axis)
        .y_axis_label("Inventory Level")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Inventory Level"));
        });
}

/// Axis text for bar positions; only whole positions carry a label.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart: totals per region
// ---------------------------------------------------------------------------

fn region_pie(ui: &mut Ui, totals: &BTreeMap<String, f64>) {
    let total: f64 = totals.values().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        empty_chart(ui);
        return;
    }
    let colors = generate_palette(totals.len());

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(CHART_HEIGHT, CHART_HEIGHT), Sense::hover());
        let center = response.rect.center();
        let radius = CHART_HEIGHT * 0.45;

        // Start at twelve o'clock, clockwise on screen.
        let mut start = -FRAC_PI_2;
        for (&value, &color) in totals.values().zip(&colors) {
            let sweep = (value.max(0.0) / total) as f32 * TAU;
            let steps = ((sweep / TAU) * PIE_SEGMENTS as f32).ceil().max(1.0) as usize;
            for i in 0..steps {
                let a0 = start + sweep * i as f32 / steps as f32;
                let a1 = start + sweep * (i + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::vec2(a0.cos(), a0.sin()),
                        center + radius * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.add_space(16.0);
        ui.vertical(|ui: &mut Ui| region_legend(ui, totals, &colors, total));
    });
}

fn region_legend(ui: &mut Ui, totals: &BTreeMap<String, f64>, colors: &[Color32], total: f64) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(60.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Region");
            });
            header.col(|ui| {
                ui.strong("Inventory Level");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for ((region, &value), &color) in totals.iter().zip(colors) {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(format!("■ {region}")).color(color));
                    });
                    row.col(|ui| {
                        ui.label(format!("{value:.0}"));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", 100.0 * value.max(0.0) / total));
                    });
                });
            }
        });
}

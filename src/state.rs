use std::path::PathBuf;

use crate::data::aggregate::KpiSummary;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{Dimension, InventoryDataset, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Filter interactions go through [`AppState::refilter`], which recomputes
/// the visible rows and the KPI summary in one pass.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<InventoryDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Allowed values per dimension.
    pub selection: FilterSelection,

    /// Indices of records passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and chart series for the visible records (cached).
    pub summary: KpiSummary,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset filters to "everything".
    pub fn set_dataset(&mut self, dataset: InventoryDataset, source: Option<PathBuf>) {
        self.selection = FilterSelection::all(&dataset);
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute visible rows and the summary after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.summary = KpiSummary::default();
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.selection);
        let view: Vec<&Record> = self.visible_indices.iter().map(|&i| &ds.records[i]).collect();
        self.summary = KpiSummary::compute(&view);
        log::debug!(
            "refiltered: {} of {} records visible",
            self.visible_indices.len(),
            ds.len()
        );
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(dim, ds);
            self.refilter();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.select_none(dim);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    const SAMPLE_CSV: &str = "\
Date,Region,Category,Store ID,Units Sold,Inventory Level
2024-01-01,East,A,1,10,5
2024-01-01,West,B,2,3,8
2024-01-02,East,B,1,4,9
";

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(load_reader(SAMPLE_CSV.as_bytes()).unwrap(), None);
        state
    }

    #[test]
    fn empty_state_has_no_summary() {
        let mut state = AppState::default();
        state.refilter();
        assert!(state.visible_indices.is_empty());
        assert!(state.summary.is_empty());
    }

    #[test]
    fn set_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summary.record_count, 3);
        assert_eq!(state.selection.regions.len(), 2);
    }

    #[test]
    fn toggling_recomputes_summary() {
        let mut state = loaded();
        state.toggle_filter_value(Dimension::Region, "West");
        assert_eq!(state.visible_indices, vec![0, 2]);
        assert_eq!(state.summary.average_inventory, Some(7.0));
        assert_eq!(state.summary.stockout_rate, Some(50.0));
        assert!(!state.summary.totals.by_region.contains_key("West"));
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = loaded();
        state.select_none(Dimension::Category);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary.stockout_rate, None);

        state.select_all(Dimension::Category);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn new_dataset_resets_selection() {
        let mut state = loaded();
        state.select_none(Dimension::Store);
        let other = "\
Date,Region,Category,Store ID,Units Sold,Inventory Level
2024-03-01,South,C,9,1,1
";
        state.set_dataset(
            load_reader(other.as_bytes()).unwrap(),
            Some(PathBuf::from("other.csv")),
        );
        assert_eq!(state.visible_indices, vec![0]);
        assert!(state.selection.stores.contains("9"));
        assert_eq!(state.source, Some(PathBuf::from("other.csv")));
    }
}

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Dimension, InventoryDataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Allowed values for each filterable dimension.
///
/// A record passes when its region, category and store are all allowed.
/// An empty set allows nothing, so the filtered view is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub stores: BTreeSet<String>,
}

impl FilterSelection {
    /// Every observed value selected (i.e., show everything).
    pub fn all(dataset: &InventoryDataset) -> Self {
        let mut selection = FilterSelection::default();
        for dim in Dimension::ALL {
            selection.select_all(dim, dataset);
        }
        selection
    }

    pub fn values(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Region => &self.regions,
            Dimension::Category => &self.categories,
            Dimension::Store => &self.stores,
        }
    }

    fn values_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Region => &mut self.regions,
            Dimension::Category => &mut self.categories,
            Dimension::Store => &mut self.stores,
        }
    }

    /// Flip a single value in or out of the selection.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.values_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self, dim: Dimension, dataset: &InventoryDataset) {
        *self.values_mut(dim) = dataset.observed(dim).iter().cloned().collect();
    }

    pub fn select_none(&mut self, dim: Dimension) {
        self.values_mut(dim).clear();
    }

    /// Logical AND of the three membership tests.
    pub fn allows(&self, record: &Record) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.values(dim).contains(dim.key(record)))
    }
}

/// The records passing `selection`, in their original order.
pub fn filter_records<'a>(records: &'a [Record], selection: &FilterSelection) -> Vec<&'a Record> {
    records.iter().filter(|r| selection.allows(r)).collect()
}

/// Return indices of records that pass the selection.
pub fn filtered_indices(dataset: &InventoryDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.allows(r))
        .map(|(i, _)| i)
        .collect()
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
2024-01-02,North,A,3,7,7
2024-01-03,West,A,2,12,2
";

    fn dataset() -> InventoryDataset {
        load_reader(SAMPLE_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn default_selection_keeps_everything() {
        let ds = dataset();
        let selection = FilterSelection::all(&ds);
        let view = filter_records(&ds.records, &selection);
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.records).all(|(a, b)| *a == b));
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn single_region_keeps_order() {
        let ds = dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.select_none(Dimension::Region);
        selection.toggle(Dimension::Region, "East");
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 2]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.toggle(Dimension::Category, "B");
        selection.toggle(Dimension::Store, "3");
        // category A only, stores 1 and 2
        let view = filter_records(&ds.records, &selection);
        assert_eq!(view.len(), 2);
        assert!(view
            .iter()
            .all(|r| r.category == "A" && r.store_id != "3"));
    }

    #[test]
    fn empty_set_yields_empty_view() {
        let ds = dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.select_none(Dimension::Store);
        assert!(filter_records(&ds.records, &selection).is_empty());
    }

    #[test]
    fn every_selection_gives_a_member_subset() {
        let ds = dataset();
        let regions = ds.observed(Dimension::Region).to_vec();
        // every subset of regions, with category B dropped
        for mask in 0u32..(1 << regions.len()) {
            let mut selection = FilterSelection::all(&ds);
            selection.select_none(Dimension::Region);
            for (i, region) in regions.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    selection.toggle(Dimension::Region, region);
                }
            }
            selection.toggle(Dimension::Category, "B");

            let view = filter_records(&ds.records, &selection);
            for r in &view {
                assert!(ds.records.contains(r));
                assert!(selection.regions.contains(&r.region));
                assert!(selection.categories.contains(&r.category));
                assert!(selection.stores.contains(&r.store_id));
            }
            let expected = ds.records.iter().filter(|r| selection.allows(r)).count();
            assert_eq!(view.len(), expected);
        }
    }

    #[test]
    fn toggle_twice_restores() {
        let ds = dataset();
        let before = FilterSelection::all(&ds);
        let mut selection = before.clone();
        selection.toggle(Dimension::Region, "West");
        assert!(!selection.regions.contains("West"));
        selection.toggle(Dimension::Region, "West");
        assert_eq!(selection, before);
    }
}

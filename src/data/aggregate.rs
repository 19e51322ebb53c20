//! KPI and grouped summaries over a filtered view.
//!
//! Every function takes any iterator of `&Record` so the same code serves the
//! full dataset and a filtered subsequence. Scalar KPIs are `None` when there
//! is nothing to average over.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Dimension, Record};

/// Round to two decimals, exact ties to even (`round(x, 2)` in numpy).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Percentage of records where units sold exceeded inventory.
pub fn stockout_rate<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let (count, stockouts) = records.into_iter().fold((0usize, 0usize), |(n, s), r| {
        (n + 1, s + usize::from(r.is_stockout()))
    });
    if count == 0 {
        return None;
    }
    Some(round2(100.0 * stockouts as f64 / count as f64))
}

/// Mean inventory level.
pub fn average_inventory<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let (count, sum) = records
        .into_iter()
        .fold((0usize, 0.0), |(n, s), r| (n + 1, s + r.inventory_level));
    if count == 0 {
        return None;
    }
    Some(round2(sum / count as f64))
}

/// Sum of inventory level, ungrouped.
pub fn total_inventory<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(|r| r.inventory_level).sum()
}

/// One point of the inventory-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyInventory {
    pub date: NaiveDate,
    pub avg_inventory: f64,
}

/// Mean inventory level per date, oldest first.
pub fn inventory_over_time<'a, I>(records: I) -> Vec<DailyInventory>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for r in records {
        let slot = by_date.entry(r.date).or_insert((0.0, 0));
        slot.0 += r.inventory_level;
        slot.1 += 1;
    }
    by_date
        .into_iter()
        .map(|(date, (sum, n))| DailyInventory {
            date,
            avg_inventory: sum / n as f64,
        })
        .collect()
}

/// Sum of inventory level per value of `dim`, keys sorted.
pub fn total_inventory_by<'a, I>(records: I, dim: Dimension) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(dim.key(r).to_string()).or_default() += r.inventory_level;
    }
    totals
}

/// Inventory totals for the three categorical breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedTotals {
    pub by_store: BTreeMap<String, f64>,
    pub by_category: BTreeMap<String, f64>,
    pub by_region: BTreeMap<String, f64>,
}

impl GroupedTotals {
    pub fn compute(records: &[&Record]) -> Self {
        GroupedTotals {
            by_store: total_inventory_by(records.iter().copied(), Dimension::Store),
            by_category: total_inventory_by(records.iter().copied(), Dimension::Category),
            by_region: total_inventory_by(records.iter().copied(), Dimension::Region),
        }
    }

    pub fn get(&self, dim: Dimension) -> &BTreeMap<String, f64> {
        match dim {
            Dimension::Region => &self.by_region,
            Dimension::Category => &self.by_category,
            Dimension::Store => &self.by_store,
        }
    }
}

// ---------------------------------------------------------------------------
// KpiSummary – everything the dashboard draws for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub record_count: usize,
    /// Percent, `None` when the view is empty.
    pub stockout_rate: Option<f64>,
    pub average_inventory: Option<f64>,
    pub daily_inventory: Vec<DailyInventory>,
    pub totals: GroupedTotals,
}

impl KpiSummary {
    pub fn compute(records: &[&Record]) -> Self {
        KpiSummary {
            record_count: records.len(),
            stockout_rate: stockout_rate(records.iter().copied()),
            average_inventory: average_inventory(records.iter().copied()),
            daily_inventory: inventory_over_time(records.iter().copied()),
            totals: GroupedTotals::compute(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Render an optional KPI with two decimals, `"no data"` when absent.
pub fn format_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{suffix}"),
        None => "no data".to_string(),
    }
}

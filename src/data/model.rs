use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Record – one row of the inventory CSV
// ---------------------------------------------------------------------------

/// A single inventory observation. Columns beyond these six are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Store ID")]
    pub store_id: String,
    #[serde(rename = "Units Sold")]
    pub units_sold: f64,
    #[serde(rename = "Inventory Level")]
    pub inventory_level: f64,
}

impl Record {
    /// Demand exceeded what was on hand.
    pub fn is_stockout(&self) -> bool {
        self.units_sold > self.inventory_level
    }
}

/// Date-only layouts tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp layouts; the time of day is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a calendar date from the textual forms found in inventory exports.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        // offset or `Z` suffix: keep the local calendar date
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{s}'")))
}

// ---------------------------------------------------------------------------
// Dimension – the filterable categorical columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Region,
    Category,
    Store,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::Category, Dimension::Store];

    /// Column header as it appears in the CSV.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Category => "Category",
            Dimension::Store => "Store ID",
        }
    }

    /// The record's value for this dimension.
    pub fn key(self, record: &Record) -> &str {
        match self {
            Dimension::Region => &record.region,
            Dimension::Category => &record.category,
            Dimension::Store => &record.store_id,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// InventoryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded records plus the distinct values of each dimension,
/// in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct InventoryDataset {
    pub records: Vec<Record>,
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    pub stores: Vec<String>,
}

impl InventoryDataset {
    /// Build the per-dimension value lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut dataset = InventoryDataset {
            records: Vec::new(),
            regions: Vec::new(),
            categories: Vec::new(),
            stores: Vec::new(),
        };
        for dim in Dimension::ALL {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            let observed: Vec<String> = records
                .iter()
                .map(|r| dim.key(r))
                .filter(|k| seen.insert(*k))
                .map(str::to_string)
                .collect();
            *dataset.observed_mut(dim) = observed;
        }
        dataset.records = records;
        dataset
    }

    /// Distinct values of `dim`, first-seen order.
    pub fn observed(&self, dim: Dimension) -> &[String] {
        match dim {
            Dimension::Region => &self.regions,
            Dimension::Category => &self.categories,
            Dimension::Store => &self.stores,
        }
    }

    fn observed_mut(&mut self, dim: Dimension) -> &mut Vec<String> {
        match dim {
            Dimension::Region => &mut self.regions,
            Dimension::Category => &mut self.categories,
            Dimension::Store => &mut self.stores,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

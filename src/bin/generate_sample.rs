//! Writes a deterministic `inventory_forecasting.csv` for trying the dashboard.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

const OUTPUT_PATH: &str = "inventory_forecasting.csv";
const DAYS: i64 = 90;
const REGIONS: &[&str] = &["North", "South", "East", "West"];
const CATEGORIES: &[&str] = &["Groceries", "Toys", "Electronics", "Furniture", "Clothing"];
const STORES: &[&str] = &["S001", "S002", "S003", "S004", "S005"];

/// splitmix64: small, seedable, good enough for sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    writer.write_record([
        "Date",
        "Store ID",
        "Product ID",
        "Category",
        "Region",
        "Inventory Level",
        "Units Sold",
    ])?;

    let mut rows = 0usize;
    for day in 0..DAYS {
        let date = start + Duration::days(day);
        // Weekly demand swing.
        let season = 1.0 + 0.3 * ((day as f64) * std::f64::consts::TAU / 7.0).sin();

        for (s, store) in STORES.iter().enumerate() {
            let region = REGIONS[s % REGIONS.len()];
            for (c, category) in CATEGORIES.iter().enumerate() {
                let inventory = rng.range(20.0, 500.0).round();
                let units_sold = (rng.range(0.0, 300.0) * season).round();
                writer.write_record([
                    date.format("%Y-%m-%d").to_string(),
                    store.to_string(),
                    format!("P{:04}", c + 1),
                    category.to_string(),
                    region.to_string(),
                    inventory.to_string(),
                    units_sold.to_string(),
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows to {OUTPUT_PATH}");
    Ok(())
}

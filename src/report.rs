//! JSON export of the current selection and its KPI summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::KpiSummary;
use crate::data::filter::FilterSelection;

#[derive(Serialize)]
struct SummaryReport<'a> {
    selection: &'a FilterSelection,
    summary: &'a KpiSummary,
}

/// Pretty-printed JSON of `selection` and `summary`.
pub fn summary_json(selection: &FilterSelection, summary: &KpiSummary) -> Result<String> {
    serde_json::to_string_pretty(&SummaryReport { selection, summary })
        .context("serializing KPI summary")
}

/// Write the summary report to `path`, replacing any existing file.
pub fn write_summary(path: &Path, selection: &FilterSelection, summary: &KpiSummary) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &SummaryReport { selection, summary })
        .context("writing KPI summary")?;
    writer.flush().context("flushing KPI summary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;
    use crate::data::model::Record;
    use serde_json::Value as JsonValue;

    #[test]
    fn report_carries_selection_and_metrics() {
        let ds = load_reader(
            "\
Date,Region,Category,Store ID,Units Sold,Inventory Level
2024-01-01,East,A,1,10,5
2024-01-01,West,B,2,3,8
"
            .as_bytes(),
        )
        .unwrap();
        let selection = FilterSelection::all(&ds);
        let view: Vec<&Record> = ds.records.iter().collect();
        let summary = KpiSummary::compute(&view);

        let json: JsonValue = serde_json::from_str(&summary_json(&selection, &summary).unwrap()).unwrap();
        assert_eq!(json["selection"]["regions"], serde_json::json!(["East", "West"]));
        assert_eq!(json["summary"]["record_count"], 2);
        assert_eq!(json["summary"]["stockout_rate"], 50.0);
        assert_eq!(json["summary"]["average_inventory"], 6.5);
        assert_eq!(json["summary"]["daily_inventory"][0]["date"], "2024-01-01");
        assert_eq!(json["summary"]["totals"]["by_region"]["West"], 8.0);
    }

    #[test]
    fn empty_view_exports_null_metrics() {
        let summary = KpiSummary::default();
        let json: JsonValue =
            serde_json::from_str(&summary_json(&FilterSelection::default(), &summary).unwrap()).unwrap();
        assert!(json["summary"]["stockout_rate"].is_null());
        assert!(json["summary"]["average_inventory"].is_null());
    }
}

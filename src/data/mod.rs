/// Data layer: records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  inventory_forecasting.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → InventoryDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ InventoryDataset │  Vec<Record>, observed values per dimension
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region ∧ category ∧ store membership → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  stockout rate, avg inventory, daily series, totals
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

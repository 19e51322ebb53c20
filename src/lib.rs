//! Inventory KPI dashboard core: CSV loading, selection filtering and
//! aggregation, plus the state object the egui front end drives.

pub mod color;
pub mod data;
pub mod report;
pub mod state;

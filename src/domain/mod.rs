//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - source rows (`PricePoint`, `RegionPurchase`) and the loaded `Dataset`
//! - input enums (`WeightUnit`, `PriceBand`, `ExportFormat`)
//! - fixed conversion constants

pub mod types;

pub use types::*;

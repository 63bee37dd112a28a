//! Input/output helpers.
//!
//! - CSV ingest + validation of the source tables (`ingest`)
//! - monthly table export (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;

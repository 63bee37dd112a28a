//! `silver-dashboard` library crate.
//!
//! The binary (`silver`) is a thin wrapper around this library so that:
//!
//! - view logic is testable without spawning processes or a terminal
//! - the CLI and the TUI share one set of view handlers
//!
//! Layout:
//!
//! - `io`: CSV ingest of the two source tables, plus the monthly export
//! - `views`: the four dashboard views and the dispatcher over them
//! - `report`/`plot`: plain-text and ASCII rendering for the CLI
//! - `tui`: the interactive Ratatui dashboard

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod theme;
pub mod tui;
pub mod views;

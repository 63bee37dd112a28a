//! Terminal plots for the CLI (the TUI draws with plotters/ratatui instead).

pub mod ascii;

pub use ascii::*;

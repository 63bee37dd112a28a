//! Shared domain types.
//!
//! Rows are loaded once and never mutated; derived views live in `crate::views`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fixed INR → USD multiplier applied to every calculator quote.
pub const INR_TO_USD: f64 = 0.012;

/// Grams per kilogram.
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Months used to spread an annual purchase total evenly.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// One row of the historical price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub year: i32,
    /// Month label as it appears in the source (`Jan`, `January`, `1`, ...).
    pub month: String,
    pub price_per_kg: f64,
}

impl PricePoint {
    /// Calendar position of `month` (1..=12), when the label is recognised.
    pub fn month_ordinal(&self) -> Option<u32> {
        month_ordinal(&self.month)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a month label: full name, three-letter abbreviation, or number.
pub fn month_ordinal(label: &str) -> Option<u32> {
    let label = label.trim();
    if let Ok(n) = label.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let lower = label.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
}

/// One row of the region purchase table. `region` is unique within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPurchase {
    pub region: String,
    pub purchased_kg: f64,
}

/// Both source tables, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub prices: Vec<PricePoint>,
    pub purchases: Vec<RegionPurchase>,
}

/// Weight unit accepted by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 2] = [WeightUnit::Grams, WeightUnit::Kilograms];

    pub fn to_grams(self, weight: f64) -> f64 {
        match self {
            WeightUnit::Grams => weight,
            WeightUnit::Kilograms => weight * GRAMS_PER_KG,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WeightUnit::Grams => "grams",
            WeightUnit::Kilograms => "kilograms",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            WeightUnit::Grams => WeightUnit::Kilograms,
            WeightUnit::Kilograms => WeightUnit::Grams,
        }
    }
}

/// Price band over `price_per_kg` used by the historical view.
///
/// Bounds are inclusive on both sides, so 20000 and 30000 each belong to two
/// adjacent bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    /// `price <= 20000`
    #[default]
    Low,
    /// `20000 <= price <= 30000`
    Mid,
    /// `price >= 30000`
    High,
}

impl PriceBand {
    pub const ALL: [PriceBand; 3] = [PriceBand::Low, PriceBand::Mid, PriceBand::High];

    pub const LOWER_SEAM: f64 = 20_000.0;
    pub const UPPER_SEAM: f64 = 30_000.0;

    pub fn contains(self, price_per_kg: f64) -> bool {
        match self {
            PriceBand::Low => price_per_kg <= Self::LOWER_SEAM,
            PriceBand::Mid => (Self::LOWER_SEAM..=Self::UPPER_SEAM).contains(&price_per_kg),
            PriceBand::High => price_per_kg >= Self::UPPER_SEAM,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::Low => "≤ 20000",
            PriceBand::Mid => "20000 – 30000",
            PriceBand::High => "≥ 30000",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PriceBand::Low => PriceBand::Mid,
            PriceBand::Mid => PriceBand::High,
            PriceBand::High => PriceBand::Low,
        }
    }
}

/// Output format for the monthly projection export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ordinal_accepts_names_abbreviations_and_numbers() {
        assert_eq!(month_ordinal("Jan"), Some(1));
        assert_eq!(month_ordinal("january"), Some(1));
        assert_eq!(month_ordinal("SEP"), Some(9));
        assert_eq!(month_ordinal(" 12 "), Some(12));
        assert_eq!(month_ordinal("03"), Some(3));
        assert_eq!(month_ordinal("13"), None);
        assert_eq!(month_ordinal("Ja"), None);
        assert_eq!(month_ordinal("Smarch"), None);
    }

    #[test]
    fn kilograms_normalize_to_grams() {
        assert_eq!(WeightUnit::Kilograms.to_grams(2.5), 2500.0);
        assert_eq!(WeightUnit::Grams.to_grams(2.5), 2.5);
        assert_eq!(WeightUnit::Grams.toggle(), WeightUnit::Kilograms);
    }

    #[test]
    fn band_seams_belong_to_both_neighbours() {
        assert!(PriceBand::Low.contains(20_000.0));
        assert!(PriceBand::Mid.contains(20_000.0));
        assert!(!PriceBand::High.contains(20_000.0));

        assert!(PriceBand::Mid.contains(30_000.0));
        assert!(PriceBand::High.contains(30_000.0));
        assert!(!PriceBand::Low.contains(30_000.0));

        assert!(PriceBand::Low.contains(0.0));
        assert!(PriceBand::High.contains(95_000.0));
    }

    #[test]
    fn band_cycle_visits_every_band() {
        let mut band = PriceBand::default();
        let mut seen = Vec::new();
        for _ in 0..PriceBand::ALL.len() {
            seen.push(band);
            band = band.next();
        }
        assert_eq!(seen, PriceBand::ALL.to_vec());
        assert_eq!(band, PriceBand::Low);
    }
}

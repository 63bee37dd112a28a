//! Top purchasers and the per-region monthly projection.

use serde::Serialize;

use crate::domain::{MONTHS_PER_YEAR, RegionPurchase};
use crate::views::regional::sort_descending;

/// Size of the top-purchasers ranking.
pub const TOP_N: usize = 5;

/// Projected single-month sales for one region.
///
/// The figure is the annual total spread evenly over twelve months; it is
/// presented as the January figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyEstimate {
    pub region: String,
    pub monthly_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsView {
    pub top: Vec<RegionPurchase>,
    /// Every region, in table order.
    pub monthly: Vec<MonthlyEstimate>,
}

/// First `n` entries of the descending ranking.
pub fn top_regions(purchases: &[RegionPurchase], n: usize) -> Vec<RegionPurchase> {
    let mut ranked = sort_descending(purchases);
    ranked.truncate(n);
    ranked
}

pub fn monthly_projection(purchases: &[RegionPurchase]) -> Vec<MonthlyEstimate> {
    purchases
        .iter()
        .map(|p| MonthlyEstimate {
            region: p.region.clone(),
            monthly_kg: p.purchased_kg / MONTHS_PER_YEAR,
        })
        .collect()
}

pub fn insights_view(purchases: &[RegionPurchase]) -> InsightsView {
    InsightsView {
        top: top_regions(purchases, TOP_N),
        monthly: monthly_projection(purchases),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(region: &str, kg: f64) -> RegionPurchase {
        RegionPurchase {
            region: region.to_string(),
            purchased_kg: kg,
        }
    }

    #[test]
    fn top_is_a_prefix_of_the_full_ranking() {
        let table: Vec<RegionPurchase> = (0..8)
            .map(|i| r(&format!("R{i}"), ((i * 37) % 11) as f64))
            .collect();
        let full = sort_descending(&table);
        let view = insights_view(&table);
        assert_eq!(view.top.len(), TOP_N);
        assert_eq!(view.top[..], full[..TOP_N]);
    }

    #[test]
    fn small_tables_keep_every_row() {
        let table = vec![r("A", 50.0), r("B", 100.0), r("C", 100.0)];
        let view = insights_view(&table);
        let names: Vec<&str> = view.top.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
        assert!(insights_view(&[]).top.is_empty());
    }

    #[test]
    fn monthly_is_annual_over_twelve_in_table_order() {
        let table = vec![r("Goa", 120.0), r("Assam", 7.0), r("Delhi", 0.0)];
        let monthly = monthly_projection(&table);
        assert_eq!(monthly.len(), 3);
        for (row, est) in table.iter().zip(&monthly) {
            assert_eq!(est.region, row.region);
            assert_eq!(est.monthly_kg, row.purchased_kg / 12.0);
        }
        assert_eq!(monthly[0].monthly_kg, 10.0);
    }
}

//! Regions ranked by purchased quantity.

use serde::Serialize;

use crate::domain::RegionPurchase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalView {
    /// Descending by `purchased_kg`; ties keep table order.
    pub ranked: Vec<RegionPurchase>,
}

/// Stable descending sort by purchased quantity.
pub fn sort_descending(purchases: &[RegionPurchase]) -> Vec<RegionPurchase> {
    let mut sorted = purchases.to_vec();
    // `sort_by` is stable, which keeps equal totals in their original order.
    sorted.sort_by(|a, b| b.purchased_kg.total_cmp(&a.purchased_kg));
    sorted
}

pub fn regional_view(purchases: &[RegionPurchase]) -> RegionalView {
    RegionalView {
        ranked: sort_descending(purchases),
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

    fn names(rows: &[RegionPurchase]) -> Vec<&str> {
        rows.iter().map(|r| r.region.as_str()).collect()
    }

    #[test]
    fn ties_keep_original_order() {
        let table = vec![r("A", 50.0), r("B", 100.0), r("C", 100.0)];
        let view = regional_view(&table);
        assert_eq!(names(&view.ranked), ["B", "C", "A"]);
    }

    #[test]
    fn output_is_non_increasing() {
        let table = vec![
            r("Goa", 3.0),
            r("Assam", 90.5),
            r("Bihar", 12.0),
            r("Delhi", 90.5),
            r("Kerala", 0.0),
            r("Odisha", 44.0),
        ];
        let ranked = sort_descending(&table);
        assert_eq!(ranked.len(), table.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].purchased_kg >= pair[1].purchased_kg);
        }
        assert_eq!(names(&ranked)[..2], ["Assam", "Delhi"]);
    }

    #[test]
    fn empty_table_gives_empty_ranking() {
        assert!(regional_view(&[]).ranked.is_empty());
    }
}

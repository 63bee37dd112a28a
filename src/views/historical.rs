//! Band-filtered price history, grouped by year.

use serde::Serialize;

use crate::domain::{PriceBand, PricePoint, month_ordinal};

/// One line of the historical chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    pub year: i32,
    /// `(month label, price per kg)` in source order.
    pub points: Vec<(String, f64)>,
}

impl YearSeries {
    /// `(x, price)` pairs for plotting. `x` is the calendar month when the label
    /// parses, otherwise the 1-based row position within the year.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, (month, price))| {
                let x = month_ordinal(month).unwrap_or(idx as u32 + 1);
                (f64::from(x), *price)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalView {
    pub band: PriceBand,
    pub series: Vec<YearSeries>,
}

impl HistoricalView {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Min/max price over every plotted point.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut prices = self.series.iter().flat_map(|s| s.points.iter().map(|(_, p)| *p));
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

pub fn filter_by_band(prices: &[PricePoint], band: PriceBand) -> Vec<&PricePoint> {
    prices.iter().filter(|p| band.contains(p.price_per_kg)).collect()
}

/// Group rows by year, years in order of first appearance, rows in source order.
pub fn group_by_year<'a>(rows: impl IntoIterator<Item = &'a PricePoint>) -> Vec<YearSeries> {
    let mut series: Vec<YearSeries> = Vec::new();
    for row in rows {
        let point = (row.month.clone(), row.price_per_kg);
        match series.iter_mut().find(|s| s.year == row.year) {
            Some(existing) => existing.points.push(point),
            None => series.push(YearSeries {
                year: row.year,
                points: vec![point],
            }),
        }
    }
    series
}

pub fn historical_view(prices: &[PricePoint], band: PriceBand) -> HistoricalView {
    HistoricalView {
        band,
        series: group_by_year(filter_by_band(prices, band)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(year: i32, month: &str, price: f64) -> PricePoint {
        PricePoint {
            year,
            month: month.to_string(),
            price_per_kg: price,
        }
    }

    fn sample() -> Vec<PricePoint> {
        vec![
            p(2016, "Jan", 18_000.0),
            p(2016, "Feb", 20_000.0),
            p(2017, "Jan", 25_000.0),
            p(2016, "Mar", 30_000.0),
            p(2018, "Jan", 42_000.0),
        ]
    }

    #[test]
    fn every_point_lands_in_some_band() {
        let data = sample();
        for point in &data {
            assert!(PriceBand::ALL.iter().any(|b| b.contains(point.price_per_kg)));
        }
    }

    #[test]
    fn seam_points_appear_in_both_neighbouring_bands() {
        let data = sample();
        let low = historical_view(&data, PriceBand::Low);
        let mid = historical_view(&data, PriceBand::Mid);
        let high = historical_view(&data, PriceBand::High);

        assert_eq!(low.point_count(), 2);
        assert_eq!(mid.point_count(), 3);
        assert_eq!(high.point_count(), 2);
        assert_eq!(
            low.point_count() + mid.point_count() + high.point_count(),
            data.len() + 2
        );
    }

    #[test]
    fn groups_follow_first_appearance_and_keep_row_order() {
        let data = sample();
        let view = historical_view(&data, PriceBand::Mid);
        let years: Vec<i32> = view.series.iter().map(|s| s.year).collect();
        assert_eq!(years, [2016, 2017]);
        assert_eq!(
            view.series[0].points,
            vec![("Feb".to_string(), 20_000.0), ("Mar".to_string(), 30_000.0)]
        );
    }

    #[test]
    fn empty_filter_gives_empty_view() {
        let data = vec![p(2020, "Jan", 50_000.0)];
        let view = historical_view(&data, PriceBand::Low);
        assert!(view.series.is_empty());
        assert_eq!(view.price_range(), None);
    }

    #[test]
    fn chart_points_use_calendar_months_when_known() {
        let series = YearSeries {
            year: 2019,
            points: vec![
                ("Mar".to_string(), 1.0),
                ("Q2".to_string(), 2.0),
                ("12".to_string(), 3.0),
            ],
        };
        assert_eq!(series.chart_points(), vec![(3.0, 1.0), (2.0, 2.0), (12.0, 3.0)]);
    }

    #[test]
    fn price_range_spans_all_series() {
        let data = sample();
        let view = historical_view(&data, PriceBand::High);
        assert_eq!(view.price_range(), Some((30_000.0, 42_000.0)));
    }
}

//! Dashboard views and the selector that dispatches to them.
//!
//! Every handler is a pure function of its input and the immutable
//! [`DashboardContext`]; nothing is cached between renders.

use tracing::debug;

use crate::domain::{Dataset, PriceBand};
use crate::theme::Theme;

pub mod calculator;
pub mod historical;
pub mod insights;
pub mod regional;

pub use calculator::{CalculatorInput, Quote};
pub use historical::{HistoricalView, YearSeries};
pub use insights::{InsightsView, MonthlyEstimate};
pub use regional::RegionalView;

/// Read-only state shared by every view handler.
#[derive(Debug, Clone, Copy)]
pub struct DashboardContext<'a> {
    pub data: &'a Dataset,
    pub theme: Theme,
}

impl<'a> DashboardContext<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self {
            data,
            theme: Theme::default(),
        }
    }
}

/// Navigation entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Calculator,
    Historical,
    Regional,
    Insights,
}

impl View {
    pub const ALL: [View; 4] = [View::Calculator, View::Historical, View::Regional, View::Insights];

    pub fn label(self) -> &'static str {
        match self {
            View::Calculator => "Price Calculator",
            View::Historical => "Historical Prices",
            View::Regional => "State-wise Purchases",
            View::Insights => "Silver Insights",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A view together with its per-view inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    Calculator(CalculatorInput),
    Historical(PriceBand),
    Regional,
    Insights,
}

impl ViewRequest {
    pub fn view(&self) -> View {
        match self {
            ViewRequest::Calculator(_) => View::Calculator,
            ViewRequest::Historical(_) => View::Historical,
            ViewRequest::Regional => View::Regional,
            ViewRequest::Insights => View::Insights,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutput {
    Calculator(Quote),
    Historical(HistoricalView),
    Regional(RegionalView),
    Insights(InsightsView),
}

/// Run exactly one view handler.
pub fn render(request: &ViewRequest, ctx: &DashboardContext<'_>) -> ViewOutput {
    debug!(view = request.view().label(), "rendering view");
    match request {
        ViewRequest::Calculator(input) => ViewOutput::Calculator(calculator::quote(input)),
        ViewRequest::Historical(band) => {
            ViewOutput::Historical(historical::historical_view(&ctx.data.prices, *band))
        }
        ViewRequest::Regional => ViewOutput::Regional(regional::regional_view(&ctx.data.purchases)),
        ViewRequest::Insights => ViewOutput::Insights(insights::insights_view(&ctx.data.purchases)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, RegionPurchase, WeightUnit};

    fn dataset() -> Dataset {
        Dataset {
            prices: vec![PricePoint {
                year: 2020,
                month: "Jan".to_string(),
                price_per_kg: 45_000.0,
            }],
            purchases: vec![
                RegionPurchase {
                    region: "A".to_string(),
                    purchased_kg: 50.0,
                },
                RegionPurchase {
                    region: "B".to_string(),
                    purchased_kg: 100.0,
                },
            ],
        }
    }

    #[test]
    fn labels_round_trip_through_navigation() {
        for view in View::ALL {
            assert_eq!(View::from_label(view.label()), Some(view));
        }
        assert_eq!(View::from_label("silver insights"), Some(View::Insights));
        assert_eq!(View::from_label("Settings"), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(View::Insights.next(), View::Calculator);
        assert_eq!(View::Calculator.prev(), View::Insights);
        assert_eq!(View::Historical.next().prev(), View::Historical);
    }

    #[test]
    fn render_dispatches_to_the_requested_handler() {
        let data = dataset();
        let ctx = DashboardContext::new(&data);

        let out = render(
            &ViewRequest::Calculator(CalculatorInput {
                weight: 1.0,
                unit: WeightUnit::Kilograms,
                price_per_gram: 2.0,
            }),
            &ctx,
        );
        assert!(matches!(out, ViewOutput::Calculator(q) if q.total_cost_inr == 2000.0));

        match render(&ViewRequest::Historical(PriceBand::High), &ctx) {
            ViewOutput::Historical(view) => assert_eq!(view.point_count(), 1),
            other => panic!("unexpected output: {other:?}"),
        }

        match render(&ViewRequest::Regional, &ctx) {
            ViewOutput::Regional(view) => assert_eq!(view.ranked[0].region, "B"),
            other => panic!("unexpected output: {other:?}"),
        }

        match render(&ViewRequest::Insights, &ctx) {
            ViewOutput::Insights(view) => {
                assert_eq!(view.top.len(), 2);
                assert_eq!(view.monthly[0].region, "A");
            }
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn request_reports_its_view() {
        assert_eq!(ViewRequest::Regional.view(), View::Regional);
        assert_eq!(ViewRequest::Historical(PriceBand::Mid).view(), View::Historical);
    }
}

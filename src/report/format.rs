//! Formatted terminal output for the CLI subcommands.
//!
//! We keep formatting code in one place so:
//! - the view handlers stay pure and testable
//! - output changes are localized (important for snapshot-style tests)

use crate::views::{CalculatorInput, HistoricalView, InsightsView, MonthlyEstimate, Quote, RegionalView};
use crate::domain::RegionPurchase;

/// Format an amount with thousands separators and two decimals (`750,000.00`).
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && !fixed.trim_start_matches(['0', '.']).is_empty() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Calculator summary.
pub fn format_quote(input: &CalculatorInput, quote: &Quote) -> String {
    let mut out = String::new();
    out.push_str("=== Silver Price Calculator ===\n");
    out.push_str(&format!(
        "Weight: {} {} ({} g) @ ₹ {}/g\n",
        trim_number(input.weight),
        input.unit.display_name(),
        trim_number(quote.weight_in_grams),
        format_money(input.price_per_gram),
    ));
    out.push_str(&format!("Total Cost: ₹ {}\n", format_money(quote.total_cost_inr)));
    out.push_str(&format!("USD Equivalent: $ {}\n", format_money(quote.total_cost_usd)));
    out
}

/// Year-grouped price listing for the selected band.
pub fn format_historical(view: &HistoricalView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== Historical Silver Prices ({}) ===\n",
        view.band.label()
    ));

    if view.series.is_empty() {
        out.push_str("No prices in this band.\n");
        return out;
    }

    out.push_str(&format!(
        "Points: n={} | years={}\n",
        view.point_count(),
        view.series.len()
    ));
    for series in &view.series {
        let cells: Vec<String> = series
            .points
            .iter()
            .map(|(month, price)| format!("{month} {}", format_money(*price)))
            .collect();
        out.push_str(&format!("{}: {}\n", series.year, cells.join(" | ")));
    }
    out
}

/// Ranked purchase table.
pub fn format_regional(view: &RegionalView) -> String {
    let mut out = String::new();
    out.push_str("=== State-wise Silver Purchases ===\n");
    out.push_str(&format_purchase_table(&view.ranked));
    out
}

/// Top purchasers plus the monthly projection table.
pub fn format_insights(view: &InsightsView) -> String {
    let mut out = String::new();
    out.push_str("=== Silver Sales Insights ===\n");
    out.push_str(&format!("Top {} states by purchases:\n", view.top.len()));
    out.push_str(&format_purchase_table(&view.top));
    out.push('\n');
    out.push_str("January month silver sales (annual / 12):\n");
    out.push_str(&format_monthly_table(&view.monthly));
    out
}

fn format_purchase_table(rows: &[RegionPurchase]) -> String {
    let width = name_width(rows.iter().map(|r| r.region.as_str()));
    let mut out = String::new();
    out.push_str(&format!("{:>3} {:<width$} {:>14}\n", "#", "State", "Purchased (kg)"));
    for (idx, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} {:<width$} {:>14}\n",
            idx + 1,
            r.region,
            format_money(r.purchased_kg)
        ));
    }
    if rows.is_empty() {
        out.push_str("  (no rows)\n");
    }
    out
}

fn format_monthly_table(rows: &[MonthlyEstimate]) -> String {
    let width = name_width(rows.iter().map(|r| r.region.as_str()));
    let mut out = String::new();
    out.push_str(&format!("{:<width$} {:>16}\n", "State", "January_Sales_kg"));
    for r in rows {
        out.push_str(&format!("{:<width$} {:>16.3}\n", r.region, r.monthly_kg));
    }
    if rows.is_empty() {
        out.push_str("  (no rows)\n");
    }
    out
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max("State".len())
}

fn trim_number(v: f64) -> String {
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

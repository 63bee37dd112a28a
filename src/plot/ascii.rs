//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line plots: `o` at data points, `-` between them
//! - bar charts: one row per label, `#` bars scaled to the widest value

use crate::views::{HistoricalView, MonthlyEstimate};
use crate::domain::RegionPurchase;

/// Render the historical view as one polyline per year over month 1..=12.
pub fn render_historical_plot(view: &HistoricalView, width: usize, height: usize) -> String {
    let lines: Vec<Vec<(f64, f64)>> = view.series.iter().map(|s| s.chart_points()).collect();
    let header = |x0: f64, x1: f64, y0: f64, y1: f64| {
        format!("Plot: month=[{x0:.0}, {x1:.0}] | price=[{y0:.2}, {y1:.2}] INR/kg\n")
    };
    render_lines(&lines, Some((1.0, 12.0)), width, height, header)
}

/// Render the monthly projection as a line over regions in table order.
pub fn render_monthly_plot(monthly: &[MonthlyEstimate], width: usize, height: usize) -> String {
    let line: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(idx, m)| ((idx + 1) as f64, m.monthly_kg))
        .collect();
    let header = |x0: f64, x1: f64, y0: f64, y1: f64| {
        format!("Plot: state=[{x0:.0}, {x1:.0}] | january sales=[{y0:.2}, {y1:.2}] kg\n")
    };
    render_lines(&[line], None, width, height, header)
}

/// Horizontal bar chart, one row per region in the given order.
pub fn render_bar_chart(rows: &[RegionPurchase], width: usize) -> String {
    let width = width.max(10);
    let label_width = rows.iter().map(|r| r.region.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|r| r.purchased_kg).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for r in rows {
        let len = if max > 0.0 {
            ((r.purchased_kg / max) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label_width$} |{} {:.2}\n",
            r.region,
            "#".repeat(len),
            r.purchased_kg
        ));
    }
    out
}

fn render_lines(
    lines: &[Vec<(f64, f64)>],
    x_domain: Option<(f64, f64)>,
    width: usize,
    height: usize,
    header: impl Fn(f64, f64, f64, f64) -> String,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let all = || lines.iter().flatten();
    let Some((x_min, x_max)) = x_domain.or_else(|| range(all().map(|p| p.0))) else {
        return "Plot: no data\n".to_string();
    };
    let Some((y_min, y_max)) = range(all().map(|p| p.1)) else {
        return "Plot: no data\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let (x_min, x_max) = if x_max > x_min { (x_min, x_max) } else { pad_range(x_min, x_max, 0.5) };

    let mut grid = vec![vec![' '; width]; height];

    // Connectors first so markers overlay them.
    for line in lines {
        let mut prev = None;
        for &(x, y) in line {
            let cell = (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height));
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, cell.0, cell.1, '-');
            }
            prev = Some(cell);
        }
    }
    for &(x, y) in all() {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = header(x_min, x_max, y_min, y_max);
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Min/max of the values; a single repeated value yields a degenerate range.
fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 { span * frac } else { min.abs().max(1.0) * frac };
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

//! Plotters-powered line chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only multi-line chart.
///
/// All series and bounds are computed outside the render call, which keeps
/// `render()` focused on drawing.
pub struct LinePlottersChart<'a> {
    /// One polyline per series (e.g. one per year).
    pub lines: &'a [Vec<(f64, f64)>],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub line_color: RGBColor,
    pub marker_color: RGBColor,
    pub axis_color: RGBColor,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for LinePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&self.axis_color))
                .axis_style(&self.axis_color)
                .bold_line_style(&self.axis_color)
                .draw()?;

            for line in self.lines {
                chart.draw_series(LineSeries::new(line.iter().copied(), &self.line_color))?;
            }

            // `Circle` markers render with wrong radii through the ratatui
            // backend, so data points are drawn as single pixels.
            for line in self.lines {
                chart.draw_series(
                    line.iter()
                        .map(|&(x, y)| Pixel::new((x, y), self.marker_color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

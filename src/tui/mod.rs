//! Ratatui-based terminal dashboard.
//!
//! One tab per view. Each redraw builds a `ViewRequest` from the current UI
//! inputs and runs exactly one view handler against the loaded tables.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs},
    Terminal,
};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::domain::{Dataset, ExportFormat, PriceBand, RegionPurchase};
use crate::error::AppError;
use crate::report::format_money;
use crate::views::{
    CalculatorInput, DashboardContext, HistoricalView, InsightsView, Quote, RegionalView, View, ViewOutput,
    ViewRequest,
};

mod plotters_chart;

use plotters_chart::LinePlottersChart;

/// Start the TUI over an already-loaded dataset.
pub fn run(data: &Dataset, config: &DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(DashboardContext::new(data));
    app.status = format!(
        "Loaded {} prices and {} states from {}",
        data.prices.len(),
        data.purchases.len(),
        config.data_dir.display()
    );
    info!("dashboard started");
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Calculator input rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalcField {
    Weight,
    Unit,
    Price,
}

impl CalcField {
    const ALL: [CalcField; 3] = [CalcField::Weight, CalcField::Unit, CalcField::Price];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

struct App<'a> {
    ctx: DashboardContext<'a>,
    view: View,
    calc: CalculatorInput,
    calc_field: CalcField,
    /// Text typed into the selected numeric field, while editing.
    editing: Option<String>,
    band: PriceBand,
    status: String,
}

impl<'a> App<'a> {
    fn new(ctx: DashboardContext<'a>) -> Self {
        Self {
            ctx,
            view: View::default(),
            calc: CalculatorInput::default(),
            calc_field: CalcField::Weight,
            editing: None,
            band: PriceBand::default(),
            status: String::new(),
        }
    }

    fn request(&self) -> ViewRequest {
        match self.view {
            View::Calculator => ViewRequest::Calculator(self.calc),
            View::Historical => ViewRequest::Historical(self.band),
            View::Regional => ViewRequest::Regional,
            View::Insights => ViewRequest::Insights,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab | KeyCode::Right => self.view = self.view.next(),
            KeyCode::BackTab | KeyCode::Left => self.view = self.view.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.view = View::ALL[idx];
            }
            _ => match self.view {
                View::Calculator => self.handle_calculator_key(code),
                View::Historical => {
                    if code == KeyCode::Char('b') {
                        self.band = self.band.next();
                        self.status = format!("band: {}", self.band.label());
                    }
                }
                View::Insights => {
                    if code == KeyCode::Char('e') {
                        self.export_monthly(ExportFormat::Csv);
                    } else if code == KeyCode::Char('j') {
                        self.export_monthly(ExportFormat::Json);
                    }
                }
                View::Regional => {}
            },
        }
        false
    }

    fn handle_calculator_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                let idx = self.calc_field.index();
                self.calc_field = CalcField::ALL[idx.saturating_sub(1)];
            }
            KeyCode::Down => {
                let idx = (self.calc_field.index() + 1).min(CalcField::ALL.len() - 1);
                self.calc_field = CalcField::ALL[idx];
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_field(1.0),
            KeyCode::Char('-') => self.adjust_field(-1.0),
            KeyCode::Char('u') => {
                self.calc.unit = self.calc.unit.toggle();
                self.status = format!("unit: {}", self.calc.unit.display_name());
            }
            KeyCode::Enter => match self.calc_field {
                CalcField::Unit => self.calc.unit = self.calc.unit.toggle(),
                CalcField::Weight | CalcField::Price => {
                    self.editing = Some(String::new());
                    self.status = "Type a number. Enter to apply, Esc to cancel.".to_string();
                }
            },
            _ => {}
        }
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = buffer.trim().to_string();
                self.editing = None;
                self.apply_edit(&text);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '.' && !buffer.contains('.')) => {
                buffer.push(c);
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self, text: &str) {
        let value = match text.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("Invalid number '{text}'");
                return;
            }
        };
        match self.calc_field {
            CalcField::Weight => self.calc.weight = value,
            CalcField::Price => self.calc.price_per_gram = value,
            CalcField::Unit => {}
        }
        self.calc = self.calc.clamped();
        self.status = "Updated.".to_string();
    }

    fn adjust_field(&mut self, delta: f64) {
        match self.calc_field {
            CalcField::Weight => self.calc.weight += delta,
            CalcField::Price => self.calc.price_per_gram += delta,
            CalcField::Unit => self.calc.unit = self.calc.unit.toggle(),
        }
        self.calc = self.calc.clamped();
    }

    fn export_monthly(&mut self, format: ExportFormat) {
        let monthly = crate::views::insights::monthly_projection(&self.ctx.data.purchases);
        let path = crate::io::export::default_export_path(format);
        match crate::io::export::write_monthly(&path, &monthly, format) {
            Ok(()) => self.status = format!("Wrote {}", path.display()),
            Err(err) => {
                warn!(error = %err, "monthly export failed");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_tabs(frame, chunks[0]);

        let output = crate::views::render(&self.request(), &self.ctx);
        match &output {
            ViewOutput::Calculator(quote) => self.draw_calculator(frame, chunks[1], quote),
            ViewOutput::Historical(view) => self.draw_historical(frame, chunks[1], view),
            ViewOutput::Regional(view) => self.draw_regional(frame, chunks[1], view),
            ViewOutput::Insights(view) => self.draw_insights(frame, chunks[1], view),
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = View::ALL
            .iter()
            .enumerate()
            .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.view.index())
            .block(
                Block::default()
                    .title("Silver Dashboard")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.ctx.theme.primary.to_ratatui())),
            )
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(self.ctx.theme.secondary.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_calculator(&self, frame: &mut ratatui::Frame<'_>, area: Rect, quote: &Quote) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let editing = |field: CalcField| {
            self.editing
                .as_ref()
                .filter(|_| self.calc_field == field)
                .map(|buf| format!("{buf}_"))
        };
        let weight = editing(CalcField::Weight).unwrap_or_else(|| format!("{}", self.calc.weight));
        let price = editing(CalcField::Price).unwrap_or_else(|| format_money(self.calc.price_per_gram));

        let items = vec![
            ListItem::new(format!("Weight: {weight}")),
            ListItem::new(format!("Unit: {}", self.calc.unit.display_name())),
            ListItem::new(format!("Price per gram (INR): {price}")),
        ];
        let list = List::new(items)
            .block(Block::default().title("Silver Price Calculator").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(self.ctx.theme.accent.to_ratatui()))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.calc_field.index()));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let value_style = Style::default()
            .fg(self.ctx.theme.secondary.to_ratatui())
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::raw("Total Cost: "),
                Span::styled(format!("₹ {}", format_money(quote.total_cost_inr)), value_style),
            ]),
            Line::from(vec![
                Span::raw("USD Equivalent: "),
                Span::styled(format!("$ {}", format_money(quote.total_cost_usd)), value_style),
            ]),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_historical(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &HistoricalView) {
        let block = Block::default()
            .title(format!(
                "Historical Silver Prices (Filtered: {}) | n={}",
                view.band.label(),
                view.point_count()
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let lines: Vec<Vec<(f64, f64)>> = view.series.iter().map(|s| s.chart_points()).collect();
        let Some((mut x_bounds, y_bounds)) = chart_bounds(&lines) else {
            self.draw_placeholder(frame, inner, "No prices in this band.");
            return;
        };
        // Keep the full calendar visible even when a band covers few months.
        x_bounds[0] = x_bounds[0].min(1.0);
        x_bounds[1] = x_bounds[1].max(12.0);

        self.draw_line_chart(frame, inner, &lines, x_bounds, y_bounds, "Month", "Price (INR per kg)");
    }

    fn draw_regional(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &RegionalView) {
        self.draw_bar_chart(frame, area, "State-wise Silver Purchases (kg)", &view.ranked);
    }

    fn draw_insights(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &InsightsView) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0]);

        self.draw_bar_chart(frame, top[0], "Top 5 States with Highest Silver Purchases", &view.top);

        let block = Block::default()
            .title("January Silver Sales Across States")
            .borders(Borders::ALL);
        let inner = block.inner(top[1]);
        frame.render_widget(block, top[1]);
        frame.render_widget(Clear, inner);

        let line: Vec<(f64, f64)> = view
            .monthly
            .iter()
            .enumerate()
            .map(|(idx, m)| ((idx + 1) as f64, m.monthly_kg))
            .collect();
        let lines = vec![line];
        match chart_bounds(&lines) {
            Some((x_bounds, y_bounds)) => {
                self.draw_line_chart(frame, inner, &lines, x_bounds, y_bounds, "State #", "January Sales (kg)");
            }
            None => self.draw_placeholder(frame, inner, "No states loaded."),
        }

        let header = Row::new(vec![Cell::from("#"), Cell::from("State"), Cell::from("January_Sales_kg")])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let table_rows = view.monthly.iter().enumerate().map(|(idx, m)| {
            Row::new(vec![
                Cell::from(format!("{}", idx + 1)),
                Cell::from(m.region.clone()),
                Cell::from(format!("{:.3}", m.monthly_kg)),
            ])
        });
        let table = Table::new(
            table_rows,
            [Constraint::Length(4), Constraint::Percentage(50), Constraint::Length(18)],
        )
        .header(header)
        .block(
            Block::default()
                .title("January Month Silver Sales (e: export CSV, j: export JSON)")
                .borders(Borders::ALL),
        );
        frame.render_widget(table, rows[1]);
    }

    fn draw_bar_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, rows: &[RegionPurchase]) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        if rows.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            self.draw_placeholder(frame, inner, "No states loaded.");
            return;
        }

        let data: Vec<(&str, u64)> = rows
            .iter()
            .map(|r| (r.region.as_str(), r.purchased_kg.round() as u64))
            .collect();
        let inner_width = area.width.saturating_sub(2);
        let bar_width = bar_width_for(inner_width, data.len());

        let chart = BarChart::default()
            .block(block)
            .data(data.as_slice())
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(self.ctx.theme.secondary.to_ratatui()))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(self.ctx.theme.secondary.to_ratatui()),
            )
            .label_style(Style::default().fg(self.ctx.theme.accent.to_ratatui()));
        frame.render_widget(chart, area);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line_chart(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        lines: &[Vec<(f64, f64)>],
        x_bounds: [f64; 2],
        y_bounds: [f64; 2],
        x_label: &str,
        y_label: &str,
    ) {
        let widget = LinePlottersChart {
            lines,
            x_bounds,
            y_bounds,
            x_label,
            y_label,
            line_color: self.ctx.theme.secondary.to_plotters(),
            marker_color: self.ctx.theme.accent.to_plotters(),
            axis_color: self.ctx.theme.accent.to_plotters(),
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, area);
    }

    fn draw_placeholder(&self, frame: &mut ratatui::Frame<'_>, area: Rect, message: &str) {
        let msg = Paragraph::new(message.to_string()).style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.view {
            View::Calculator => "↑/↓ field  Enter edit  +/- adjust  u unit",
            View::Historical => "b band",
            View::Regional => "",
            View::Insights => "e export csv  j export json",
        };
        let line = Line::from(vec![
            Span::styled("←/→ or 1-4 view  q quit  ", Style::default().fg(Color::Gray)),
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// X/Y bounds covering every point, padded 5% vertically.
fn chart_bounds(lines: &[Vec<(f64, f64)>]) -> Option<([f64; 2], [f64; 2])> {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in lines.iter().flatten() {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }

    if x_max <= x_min {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let span = y_max - y_min;
    let pad = if span > 0.0 { span * 0.05 } else { y_min.abs().max(1.0) * 0.05 };
    Some(([x_min, x_max], [y_min - pad, y_max + pad]))
}

/// Widest bar that still fits `n` bars (plus 1-cell gaps) into `width`.
fn bar_width_for(width: u16, n: usize) -> u16 {
    if n == 0 {
        return 1;
    }
    let n = n as u16;
    (width.saturating_sub(n.saturating_sub(1)) / n).clamp(1, 12)
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    if v.abs() >= 10_000.0 {
        format!("{:.0}k", v / 1000.0)
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::domain::WeightUnit;

    fn dataset() -> Dataset {
        Dataset {
            prices: Vec::new(),
            purchases: vec![
                RegionPurchase {
                    region: "Kerala".to_string(),
                    purchased_kg: 120.0,
                },
                RegionPurchase {
                    region: "Goa".to_string(),
                    purchased_kg: 24.0,
                },
            ],
        }
    }

    #[test]
    fn navigation_keys_switch_views() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        assert_eq!(app.view, View::Calculator);

        app.handle_key(KeyCode::Right);
        assert_eq!(app.view, View::Historical);
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(app.view, View::Insights);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.view, View::Calculator);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn band_key_cycles_on_historical_view() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Char('b'));
        assert_eq!(app.band, PriceBand::Mid);
        assert_eq!(app.request(), ViewRequest::Historical(PriceBand::Mid));
    }

    #[test]
    fn typed_weight_is_applied_and_digits_do_not_navigate() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        app.handle_key(KeyCode::Enter);
        for c in "2.5".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view, View::Calculator);
        assert_eq!(app.calc.weight, 2.5);
    }

    #[test]
    fn adjustments_respect_floors() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.calc_field, CalcField::Price);
        app.calc.price_per_gram = 1.5;
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.calc.price_per_gram, 1.0);

        app.handle_key(KeyCode::Char('u'));
        assert_eq!(app.calc.unit, WeightUnit::Kilograms);
    }

    #[test]
    fn escape_cancels_edit() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('9'));
        app.handle_key(KeyCode::Esc);
        assert!(app.editing.is_none());
        assert_eq!(app.calc.weight, 10.0);
    }

    #[test]
    fn calculator_screen_shows_totals() {
        let data = dataset();
        let mut app = App::new(DashboardContext::new(&data));
        app.calc = CalculatorInput {
            weight: 10.0,
            unit: WeightUnit::Kilograms,
            price_per_gram: 75.0,
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("750,000.00"));
        assert!(screen.contains("9,000.00"));
    }

    #[test]
    fn bounds_pad_flat_series() {
        let (x, y) = chart_bounds(&[vec![(3.0, 100.0)]]).unwrap();
        assert_eq!(x, [2.5, 3.5]);
        assert_eq!(y, [95.0, 105.0]);
        assert!(chart_bounds(&[Vec::new()]).is_none());
    }

    #[test]
    fn bar_width_fits_area() {
        assert_eq!(bar_width_for(40, 5), 7);
        assert_eq!(bar_width_for(4, 10), 1);
        assert_eq!(bar_width_for(200, 2), 12);
    }
}

//! Terminal UI for the price dashboard
//!
//! Rendered with ratatui: header with model details, slider panel, ranked
//! price table, horizontal bar chart, and a footer for errors and a summary.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::app::DashboardApp;
use crate::features::SliderField;
use crate::presentation::Rgb;

const METER_WIDTH: usize = 20;

/// Render the UI
pub fn render(f: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(19),   // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(38), // Sliders
            Constraint::Length(44), // Table
            Constraint::Min(30),    // Chart
        ])
        .split(chunks[1]);

    render_header(f, app, chunks[0]);
    render_sliders(f, app, body[0]);
    render_table(f, app, body[1]);
    render_chart(f, app, body[2]);
    render_footer(f, app, chunks[2]);
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Render header with title and model metadata
fn render_header(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let last_update = app
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "Never".to_string());

    let model = match &app.model_info {
        Some(info) => format!(
            "XGBoost {} {} | {} trees | {}",
            info.xgboost_version, info.booster, info.num_trees, info.objective
        ),
        None => "unknown".to_string(),
    };

    let title = vec![
        Line::from(vec![
            Span::styled(
                "Apartment Price Prediction in Polish Cities",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Model: "),
            Span::styled(model, Style::default().fg(Color::Yellow)),
            Span::raw("  |  Last update: "),
            Span::styled(last_update, Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "↑/↓ select | ←/→ adjust | [/] ±10 | Home/End min/max | 'd' defaults | 'q' quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Text meter for one slider position
fn meter(value: f64, min: f64, max: f64) -> String {
    let ratio = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let pos = (ratio * (METER_WIDTH - 1) as f64).round() as usize;

    (0..METER_WIDTH)
        .map(|i| match i.cmp(&pos) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

fn render_sliders(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let mut lines = Vec::with_capacity(SliderField::ALL.len() * 2);

    for (idx, field) in SliderField::ALL.iter().enumerate() {
        let spec = field.spec();
        let selected = idx == app.selected;
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(Span::styled(
            format!("{} {}", if selected { "▶" } else { " " }, spec.label),
            style,
        )));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                meter(field.get(&app.values), spec.min, spec.max),
                if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
            Span::raw(" "),
            Span::styled(field.display(&app.values), style),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Apartment"),
    );
    f.render_widget(paragraph, area);
}

/// Render ranked price table
fn render_table(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let header_cells = ["#", "City", "Predicted Price"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows: Vec<Row> = app
        .ranked
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let style = if result.is_highlighted {
                Style::default()
                    .fg(color(app.presentation.palette.highlight))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", idx + 1)),
                Cell::from(result.city_name.clone()),
                Cell::from(
                    Line::from(app.presentation.format_price(result.predicted_price))
                        .alignment(ratatui::layout::Alignment::Right),
                ),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(13),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Predicted Apartment Prices"),
    )
    .column_spacing(1);

    f.render_widget(table, area);
}

/// Render horizontal bar chart, most expensive city on top
fn render_chart(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let palette = app.presentation.palette;

    let bars: Vec<Bar> = app
        .ranked
        .iter()
        .map(|result| {
            let fill = color(palette.fill(result.is_highlighted));
            Bar::default()
                .value(result.predicted_price.max(0.0).round() as u64)
                .label(Line::from(result.city_name.clone()))
                .text_value(app.presentation.format_price(result.predicted_price))
                .style(Style::default().fg(fill))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(fill)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max = app
        .ranked
        .max_price()
        .map(|p| p.max(1.0).round() as u64)
        .unwrap_or(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Predicted Apartment Prices Across Cities"),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Render footer with errors or a summary of the highlighted city
fn render_footer(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let content = if let Some(error) = &app.error_message {
        Line::from(vec![
            Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
            Span::styled(
                "  (change an input to retry)",
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if let Some(first) = app.ranked.entries().first() {
        let mut spans = vec![
            Span::styled("Most expensive: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "{} ({})",
                first.city_name,
                app.presentation.format_price(first.predicted_price)
            )),
        ];
        if let Some((rank, highlighted)) = app
            .ranked
            .iter()
            .enumerate()
            .find(|(_, r)| r.is_highlighted)
        {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                format!("{}: ", highlighted.city_name),
                Style::default().fg(color(app.presentation.palette.highlight)),
            ));
            spans.push(Span::raw(format!(
                "#{} of {} ({})",
                rank + 1,
                app.ranked.len(),
                app.presentation.format_price(highlighted.predicted_price)
            )));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            "No predictions to show.",
            Style::default().fg(Color::Yellow),
        ))
    };

    let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

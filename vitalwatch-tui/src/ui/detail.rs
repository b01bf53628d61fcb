//! Detail overlay rendering.
//!
//! Displays a modal overlay for the selected child: the age-specific normal
//! range, the current heart rate, a 24-hour chart and the most recent
//! measurements.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};
use vitalwatch_types::{format_age, HeartRateSeries, VitalKind, VitalStatus};

use crate::app::App;
use crate::data::ChildData;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Number of recent measurements listed next to the chart.
pub const RECENT_MEASUREMENTS: usize = 6;

/// Padding above and below the normal range on the chart's y axis.
const Y_MARGIN: f64 = 10.0;

/// Render the child detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(child) = app.selected_child() else {
        return;
    };

    let overlay_width = (area.width * 95 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Child info
        Constraint::Min(8),    // Chart and recent measurements
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    render_header(frame, app, child, chunks[0]);

    let content =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(30)]).split(chunks[1]);
    render_chart(frame, app, &child.series, content[0]);
    render_recent(frame, app, &child.series, content[1]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Esc:close  ↑↓:next child  n:nutrition ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, child: &ChildData, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let status_style = app.theme.status_style(child.status);

    let heart_rate = match (child.metric(VitalKind::HeartRate), child.heart_rate()) {
        (Some(metric), _) => Span::styled(
            format!("{} {} {}", metric.value, metric.unit, metric.trend.arrow()),
            app.theme.status_style(metric.status).add_modifier(Modifier::BOLD),
        ),
        (None, Some(bpm)) => Span::styled(format!("{} bpm", bpm), bold),
        (None, None) => Span::raw("-"),
    };

    let alert_style = if child.alert_count > 0 {
        app.theme.status_style(VitalStatus::Warning)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", child.name), bold),
            Span::styled(
                format!("{} ({})", format_age(child.age_months), child.band.label()),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Normal range: "),
            Span::styled(child.band.normal_range_label(), bold),
            Span::raw(format!(" for {}", child.band.range_label())),
        ]),
        Line::from(vec![
            Span::raw(" Current: "),
            heart_rate,
            Span::raw("    Alerts (24h): "),
            Span::styled(child.alert_count.to_string(), alert_style),
            Span::raw("    Status: "),
            Span::styled(
                format!("{} {}", child.status.symbol(), child.status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default()
        .title(" Child Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(frame: &mut Frame, app: &App, series: &HeartRateSeries, area: Rect) {
    let block = Block::default()
        .title(" Heart Rate (24h) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if series.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No heart-rate history",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let points = chart_points(series);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;
    let (y_min, y_max) = y_bounds(series);
    let low = [(0.0, series.band.normal_low), (x_max, series.band.normal_low)];
    let high = [(0.0, series.band.normal_high), (x_max, series.band.normal_high)];

    let range_style = Style::default().fg(app.theme.border).add_modifier(Modifier::DIM);
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(range_style)
            .data(&low),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(range_style)
            .data(&high),
        Dataset::default()
            .name("bpm")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.chart_line))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y_min, y_max])
                .labels(vec![
                    format!("{:.0}", y_min),
                    format!("{:.0}", (y_min + y_max) / 2.0),
                    format!("{:.0}", y_max),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_recent(frame: &mut Frame, app: &App, series: &HeartRateSeries, area: Rect) {
    let header = Row::new(vec![Cell::from("Time"), Cell::from("BPM"), Cell::from("")])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = series
        .recent(RECENT_MEASUREMENTS)
        .map(|p| {
            Row::new(vec![
                Cell::from(p.time_label.clone()),
                Cell::from(format!("{}", p.value)),
                Cell::from(p.deviation.label()).style(app.theme.deviation_style(p.deviation)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Recent ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}

/// Series as (position, bpm) pairs for the chart.
fn chart_points(series: &HeartRateSeries) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect()
}

/// Y axis bounds covering the normal range and every point, with a margin.
fn y_bounds(series: &HeartRateSeries) -> (f64, f64) {
    let lo = series.min().unwrap_or(series.band.normal_low).min(series.band.normal_low);
    let hi = series.max().unwrap_or(series.band.normal_high).max(series.band.normal_high);
    ((lo - Y_MARGIN).max(0.0), hi + Y_MARGIN)
}

/// First, middle and last hour labels.
fn x_labels(series: &HeartRateSeries) -> Vec<String> {
    let labels: Vec<&str> = series.points.iter().map(|p| p.time_label.as_str()).collect();
    match labels.as_slice() {
        [] => Vec::new(),
        [only] => vec![only.to_string()],
        [first, .., last] => {
            let middle = labels[labels.len() / 2];
            vec![first.to_string(), middle.to_string(), last.to_string()]
        }
    }
}

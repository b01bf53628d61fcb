//! Summary view rendering.
//!
//! Displays a table of all children with their latest vitals, a heart-rate
//! sparkline and overall status.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use vitalwatch_types::{format_age, VitalKind, VitalMetric};

use crate::app::App;
use crate::data::ChildData;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of sparkline cells shown per row.
const SPARKLINE_WIDTH: usize = 8;

/// Column to sort by in the Summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Name,
    Age,
    HeartRate,
    #[default]
    Status,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Name => SortColumn::Age,
            SortColumn::Age => SortColumn::HeartRate,
            SortColumn::HeartRate => SortColumn::Status,
            SortColumn::Status => SortColumn::Name,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Age => "age",
            SortColumn::HeartRate => "hr",
            SortColumn::Status => "status",
        }
    }
}

/// Render the Summary view showing all children in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };
    let total = data.children.len();
    let children = app.visible_children();

    let header = Row::new(vec![
        Cell::from(format_header("Child", SortColumn::Name, app)),
        Cell::from(format_header("Age", SortColumn::Age, app)),
        Cell::from("Band"),
        Cell::from(format_header("HR", SortColumn::HeartRate, app)),
        Cell::from("SpO₂"),
        Cell::from("Sleep"),
        Cell::from("Activity"),
        Cell::from("Trend"),
        Cell::from(format_header("Status", SortColumn::Status, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = children
        .iter()
        .map(|c| {
            let hr = match (c.metric(VitalKind::HeartRate), c.heart_rate()) {
                (Some(metric), _) => Cell::from(format!(
                    "{} {}",
                    format_metric(metric),
                    app.history.trend(&c.name).arrow()
                ))
                .style(app.theme.status_style(metric.status)),
                (None, Some(bpm)) => Cell::from(format!("{} bpm", bpm)),
                (None, None) => Cell::from("-"),
            };

            Row::new(vec![
                Cell::from(c.name.clone()),
                Cell::from(format_age(c.age_months)),
                Cell::from(c.band.label()),
                hr,
                metric_cell(app, c, VitalKind::SpO2),
                metric_cell(app, c, VitalKind::Sleep),
                metric_cell(app, c, VitalKind::Activity),
                Cell::from(render_sparkline(&app.history.sparkline(&c.name))),
                Cell::from(c.status.symbol()).style(app.theme.status_style(c.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),    // Child
        Constraint::Length(5),  // Age
        Constraint::Fill(2),    // Band
        Constraint::Length(10), // HR with trend arrow
        Constraint::Length(6),  // SpO2
        Constraint::Length(7),  // Sleep
        Constraint::Length(10), // Activity
        Constraint::Min(8),     // Sparkline
        Constraint::Min(6),     // Status
    ];

    let selected = app.selected_child_index.min(children.len().saturating_sub(1));
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !children.is_empty() {
        format!(" [{}/{}]", selected + 1, children.len())
    } else {
        String::new()
    };

    let title = format!(
        " Children ({}/{}) [s:sort {}{}]{}{} ",
        children.len(),
        total,
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

fn metric_cell<'a>(app: &App, child: &ChildData, kind: VitalKind) -> Cell<'a> {
    match child.metric(kind) {
        Some(metric) => {
            Cell::from(format_metric(metric)).style(app.theme.status_style(metric.status))
        }
        None => Cell::from("-"),
    }
}

/// Value and unit, with a space only for word units ("98%", "14 hrs").
pub fn format_metric(metric: &VitalMetric) -> String {
    if metric.unit == "%" {
        format!("{}%", metric.value)
    } else {
        format!("{} {}", metric.value, metric.unit)
    }
}

/// Sort children by the given column and direction.
///
/// Ties are broken by name so the order is stable between snapshots.
pub fn sort_children_by(children: &mut [&ChildData], column: SortColumn, ascending: bool) {
    children.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortColumn::Age => a.age_months.total_cmp(&b.age_months),
            SortColumn::HeartRate => {
                let a_hr = a.heart_rate().unwrap_or(0.0);
                let b_hr = b.heart_rate().unwrap_or(0.0);
                a_hr.total_cmp(&b_hr)
            }
            SortColumn::Status => a.status.cmp(&b.status),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == Ordering::Equal {
            a.name.cmp(&b.name)
        } else {
            primary
        }
    });
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return " ".repeat(SPARKLINE_WIDTH);
    }

    let skip = data.len().saturating_sub(SPARKLINE_WIDTH);
    data[skip..].iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

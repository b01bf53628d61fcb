//! Alerts view rendering.
//!
//! Lists every out-of-range reading and heart-rate excursion as a sortable
//! table, or a reassuring message when everything is normal. Alerts can be
//! marked read or dismissed, and the list narrowed to unread or critical.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use vitalwatch_types::VitalStatus;

use crate::app::App;
use crate::data::{Alert, ChildData};

/// Column to sort alerts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertSortColumn {
    #[default]
    Status,
    Child,
    Vital,
    When,
}

impl AlertSortColumn {
    pub fn next(self) -> Self {
        match self {
            Self::Status => Self::Child,
            Self::Child => Self::Vital,
            Self::Vital => Self::When,
            Self::When => Self::Status,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Child => "child",
            Self::Vital => "vital",
            Self::When => "time",
        }
    }
}

/// Which alerts the view lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertFilter {
    #[default]
    All,
    Unread,
    Critical,
}

impl AlertFilter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Unread,
            Self::Unread => Self::Critical,
            Self::Critical => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Critical => "critical",
        }
    }

    /// Whether an alert with this status and read state is listed.
    pub fn accepts(self, status: VitalStatus, read: bool) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !read,
            Self::Critical => status == VitalStatus::Critical,
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            Self::All => "Every alert has been dismissed",
            Self::Unread => "No unread alerts",
            Self::Critical => "No critical alerts",
        }
    }
}

/// Render the alerts table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let alerts = app.visible_alerts();
    if alerts.is_empty() {
        if data.alerts().is_empty() {
            render_all_normal(frame, app, area);
            return;
        }
        if app.filter_text.is_empty() {
            render_nothing_listed(frame, app, area);
            return;
        }
    }

    let critical_count = alerts.iter().filter(|(_, a)| a.status() == VitalStatus::Critical).count();
    let warning_count = alerts.iter().filter(|(_, a)| a.status() == VitalStatus::Warning).count();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(format_header("Status", AlertSortColumn::Status, app)),
        Cell::from(format_header("Child", AlertSortColumn::Child, app)),
        Cell::from(format_header("Vital", AlertSortColumn::Vital, app)),
        Cell::from("Value"),
        Cell::from(format_header("When", AlertSortColumn::When, app)),
        Cell::from("Detail"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = alerts
        .iter()
        .map(|(child, alert)| {
            let status_style = app.theme.status_style(alert.status());
            let read = app.is_alert_read(child, alert);
            let row_style = if read {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(if read { " " } else { "●" }).style(status_style),
                Cell::from(alert.status().symbol()).style(status_style),
                Cell::from(child.name.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(alert.label()),
                Cell::from(alert.value()).style(status_style),
                Cell::from(alert.when().to_string())
                    .style(Style::default().add_modifier(Modifier::DIM)),
                Cell::from(alert.detail()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(1),  // Unread marker
        Constraint::Length(6),  // Status
        Constraint::Fill(2),    // Child
        Constraint::Fill(2),    // Vital
        Constraint::Length(10), // Value
        Constraint::Length(6),  // When
        Constraint::Fill(2),    // Detail
    ];

    let sort_dir = if app.alert_sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let selected = app.selected_alert_index.min(alerts.len().saturating_sub(1));
    let position_info = if !alerts.is_empty() {
        format!(" [{}/{}]", selected + 1, alerts.len())
    } else {
        String::new()
    };

    let title = format!(
        " Alerts ({} crit, {} warn, {} unread) [f:{}] [s:sort {}{}]{}{} ",
        critical_count,
        warning_count,
        app.unread_alert_count(),
        app.alert_filter.label(),
        app.alert_sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let border_color = if critical_count > 0 {
        app.theme.critical
    } else if warning_count > 0 {
        app.theme.warning
    } else {
        app.theme.border
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_all_normal(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Alerts ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.normal));

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("    ✓ ", Style::default().fg(app.theme.normal)),
            Span::styled(
                "All vitals within normal range",
                Style::default().fg(app.theme.normal).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "      No readings outside the age-specific ranges.",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_nothing_listed(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Alerts [f:{}] ", app.alert_filter.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("    {}", app.alert_filter.empty_message()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "      f:change filter  r:reload",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn format_header(name: &str, col: AlertSortColumn, app: &App) -> Span<'static> {
    if app.alert_sort_column == col {
        let arrow = if app.alert_sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort alerts by column and direction, then by child and time for stability.
pub fn sort_alerts(items: &mut [(&ChildData, Alert)], column: AlertSortColumn, ascending: bool) {
    items.sort_by(|a, b| {
        let primary = match column {
            AlertSortColumn::Status => a.1.status().cmp(&b.1.status()),
            AlertSortColumn::Child => a.0.name.to_lowercase().cmp(&b.0.name.to_lowercase()),
            AlertSortColumn::Vital => a.1.label().cmp(b.1.label()),
            AlertSortColumn::When => a.1.when().cmp(b.1.when()),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == Ordering::Equal {
            a.0.name
                .to_lowercase()
                .cmp(&b.0.name.to_lowercase())
                .then_with(|| a.1.when().cmp(b.1.when()))
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Thresholds, VitalsData};
    use vitalwatch_types::{HealthReading, RangeDeviation, SeriesPoint, Snapshot, VitalMetric};

    fn data() -> VitalsData {
        let reading = |bpm: f64| HealthReading {
            heart_rate: VitalMetric::new(bpm, "bpm"),
            spo2: VitalMetric::new(98.0, "%"),
            sleep_hours: VitalMetric::new(14.0, "hrs"),
            activity_level: VitalMetric::new(80.0, "%"),
        };
        let snapshot = Snapshot::builder()
            // Infant 80-120: warning
            .child("Fatima", |c| c.age_months(8.0).reading(reading(125.0)))
            // Toddler 70-110: critical
            .child("Paul", |c| c.age_months(18.0).reading(reading(125.0)))
            .child("John", |c| {
                c.age_months(24.0)
                    .point(SeriesPoint::new(3, 100.0, 0).with_deviation(RangeDeviation::High))
                    .point(SeriesPoint::new(1, 60.0, 0).with_deviation(RangeDeviation::Low))
            })
            .build();
        VitalsData::from_snapshot(snapshot, &Thresholds::default())
    }

    fn order(column: AlertSortColumn, ascending: bool) -> Vec<(String, String)> {
        let data = data();
        let mut alerts = data.alerts();
        sort_alerts(&mut alerts, column, ascending);
        alerts
            .iter()
            .map(|(c, a)| (c.name.clone(), a.when().to_string()))
            .collect()
    }

    #[test]
    fn test_status_descending_puts_critical_first() {
        let order = order(AlertSortColumn::Status, false);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0].0, "Paul");
        // Warnings tie on status and fall back to child, then time
        assert_eq!(order[1], ("Fatima".to_string(), "now".to_string()));
        assert_eq!(order[2], ("John".to_string(), "01:00".to_string()));
        assert_eq!(order[3], ("John".to_string(), "03:00".to_string()));
    }

    #[test]
    fn test_sort_by_child() {
        let names: Vec<String> = order(AlertSortColumn::Child, true)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["Fatima", "John", "John", "Paul"]);
    }

    #[test]
    fn test_filter_accepts() {
        assert!(AlertFilter::All.accepts(VitalStatus::Warning, true));
        assert!(AlertFilter::Unread.accepts(VitalStatus::Warning, false));
        assert!(!AlertFilter::Unread.accepts(VitalStatus::Critical, true));
        assert!(AlertFilter::Critical.accepts(VitalStatus::Critical, true));
        assert!(!AlertFilter::Critical.accepts(VitalStatus::Warning, false));
        assert_eq!(AlertFilter::Critical.next(), AlertFilter::All);
    }

    #[test]
    fn test_sort_column_cycles() {
        assert_eq!(AlertSortColumn::Status.next(), AlertSortColumn::Child);
        assert_eq!(AlertSortColumn::When.next(), AlertSortColumn::Status);
    }
}

//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the overall status of every child.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" VITALWATCH ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref data) = app.data else {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let counts = data.status_counts();
    let dim = Style::default().add_modifier(Modifier::DIM);

    let count_span = |n: usize, style: Style| {
        if n > 0 {
            Span::styled(n.to_string(), style)
        } else {
            Span::styled("0", dim)
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(counts.overall())),
        title,
        Span::raw("│ "),
        Span::styled(counts.normal.to_string(), Style::default().fg(app.theme.normal)),
        Span::raw(" normal "),
        count_span(counts.warning, Style::default().fg(app.theme.warning)),
        Span::raw(" warn "),
        count_span(
            counts.critical,
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" crit │ "),
        Span::styled(
            data.children.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" children │ "),
        Span::styled(app.source_description().to_string(), dim),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let alert_count = app.unread_alert_count();
    let titles: Vec<Line> = vec![
        Line::from(" 1:Summary "),
        Line::from(format!(" 2:Alerts ({}) ", alert_count)),
        Line::from(" 3:Nutrition "),
    ];

    let selected = match app.current_view {
        View::Summary => 0,
        View::Alerts => 1,
        View::Nutrition => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the breadcrumb trail, time since last update and the controls for
/// the current view. Temporary status messages and errors take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else {
            match app.current_view {
                View::Summary => "/:search s:sort S:reverse Enter:detail n:nutrition ?:help q:quit",
                View::Alerts => "/:search f:filter m:read M:all read d:dismiss s:sort ?:help q:quit",
                View::Nutrition => "↑↓:select child a:age group t:meal time Esc:back ?:help q:quit",
            }
        };

        // Keep showing the last good data while the source is failing
        let elapsed = data.last_updated.elapsed().as_secs_f64();
        let age = match app.load_error {
            Some(ref err) => format!("Stale {:.1}s ({})", elapsed, err),
            None => format!("Updated {:.1}s ago", elapsed),
        };

        format!(" {} | {} | {}", app.breadcrumb(), age, controls)
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Waiting for data... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Summary/Alerts/Nutrition"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Child detail"),
        Line::from("  n           Nutrition for child"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Summary & Alerts"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        section(" Alerts"),
        Line::from("  f         Cycle all/unread/critical"),
        Line::from("  m         Mark selected read"),
        Line::from("  M         Mark all read"),
        Line::from("  d         Dismiss until resolved"),
        Line::from(""),
        section(" Nutrition"),
        Line::from("  a         Cycle meal age group"),
        Line::from("  t         Cycle meal time"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 37u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use vitalwatch_types::nutrition::Priority;
use vitalwatch_types::{RangeDeviation, VitalStatus};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for readings just outside the normal range.
    pub warning: Color,
    /// Color for readings past the tolerance.
    pub critical: Color,
    /// Color for readings inside the normal range.
    pub normal: Color,
    /// Line color of the heart-rate chart.
    pub chart_line: Color,
    /// Color for panel borders.
    pub border: Color,
    /// Style for table headers and titles.
    pub header: Style,
    /// Style for the selected row.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border type for panels.
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            normal: Color::Green,
            chart_line: Color::LightRed,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            normal: Color::Green,
            chart_line: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Pick a theme from the terminal background luminance.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a vital status.
    pub fn status_style(&self, status: VitalStatus) -> Style {
        match status {
            VitalStatus::Normal => Style::default().fg(self.normal),
            VitalStatus::Warning => Style::default().fg(self.warning),
            VitalStatus::Critical => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a high/low badge on a series point.
    pub fn deviation_style(&self, deviation: RangeDeviation) -> Style {
        match deviation {
            RangeDeviation::Within => Style::default().fg(self.normal),
            RangeDeviation::High => Style::default().fg(self.critical),
            RangeDeviation::Low => Style::default().fg(self.warning),
        }
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => Style::default().fg(self.normal).add_modifier(Modifier::BOLD),
            Priority::Medium => Style::default().fg(self.highlight),
        }
    }
}

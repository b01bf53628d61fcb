//! Application state and navigation logic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use vitalwatch_types::nutrition::MealFilter;

use crate::data::{export, Alert, AlertKey, ChildData, History, Thresholds, VitalsData};
use crate::source::DataSource;
use crate::ui::alerts::{sort_alerts, AlertFilter, AlertSortColumn};
use crate::ui::summary::{sort_children_by, SortColumn};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Child detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every child with their latest vitals.
    Summary,
    /// Out-of-range readings across all children.
    Alerts,
    /// Food recommendations for the selected child and the meal catalog.
    Nutrition,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Summary => View::Alerts,
            View::Alerts => View::Nutrition,
            View::Nutrition => View::Summary,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Summary => View::Nutrition,
            View::Alerts => View::Summary,
            View::Nutrition => View::Alerts,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Summary => "Summary",
            View::Alerts => "Alerts",
            View::Nutrition => "Nutrition",
        }
    }
}

/// Saved state for returning to a previous view.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub view: View,
    pub selected_child_index: usize,
    pub selected_alert_index: usize,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<VitalsData>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,

    // Navigation state. Indices are positions in the filtered, sorted lists.
    pub selected_child_index: usize,
    pub selected_alert_index: usize,
    pub view_stack: Vec<ViewState>,

    // Sorting (Summary and Nutrition)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Sorting (Alerts)
    pub alert_sort_column: AlertSortColumn,
    pub alert_sort_ascending: bool,

    // Alert state. Keys of alerts that have resolved are forgotten.
    pub alert_filter: AlertFilter,
    read_alerts: HashSet<AlertKey>,
    dismissed_alerts: HashSet<AlertKey>,

    // Meal catalog (Nutrition)
    pub meal_filter: MealFilter,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    pub theme: Theme,
    pub export_path: PathBuf,

    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and thresholds.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self::with_theme(source, thresholds, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn DataSource>, thresholds: Thresholds, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Summary,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            selected_child_index: 0,
            selected_alert_index: 0,
            view_stack: Vec::new(),
            // Worst status first, like the snapshot order
            sort_column: SortColumn::default(),
            sort_ascending: false,
            alert_sort_column: AlertSortColumn::default(),
            alert_sort_ascending: false,
            alert_filter: AlertFilter::default(),
            read_alerts: HashSet::new(),
            dismissed_alerts: HashSet::new(),
            meal_filter: MealFilter::default(),
            filter_text: String::new(),
            filter_active: false,
            theme,
            export_path: PathBuf::from("vitals_export.json"),
            status_message: None,
        }
    }

    /// Set where the `e` key writes its export.
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Push current state to stack and navigate to a new view.
    pub fn push_view(&mut self, view: View) {
        self.view_stack.push(ViewState {
            view: self.current_view,
            selected_child_index: self.selected_child_index,
            selected_alert_index: self.selected_alert_index,
        });
        self.current_view = view;
    }

    /// Pop the view stack and restore previous state.
    pub fn pop_view(&mut self) -> bool {
        if let Some(state) = self.view_stack.pop() {
            self.current_view = state.view;
            self.selected_child_index = state.selected_child_index;
            self.selected_alert_index = state.selected_alert_index;
            true
        } else {
            false
        }
    }

    /// Breadcrumb trail for current navigation.
    pub fn breadcrumb(&self) -> String {
        let mut parts: Vec<&str> = self.view_stack.iter().map(|s| s.view.label()).collect();
        parts.push(self.current_view.label());
        parts.join(" > ")
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) otherwise.
    ///
    /// The source is polled even after an error so a transient failure, like
    /// a half-written file, clears on the next good snapshot.
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(snapshot) = self.source.poll() else {
            self.load_error = self.source.error().map(str::to_string);
            return Ok(false);
        };

        let data = VitalsData::from_snapshot(snapshot, &self.thresholds);
        self.history.record(&data);
        self.data = Some(data);
        self.load_error = None;
        self.forget_resolved_alerts();
        self.clamp_selection();
        Ok(true)
    }

    /// Drop read and dismissed state for alerts no longer present, so a
    /// condition that returns is reported as new.
    fn forget_resolved_alerts(&mut self) {
        let current: HashSet<AlertKey> = self
            .data
            .as_ref()
            .map(|data| {
                data.alerts()
                    .iter()
                    .map(|(child, alert)| alert.key(&child.name))
                    .collect()
            })
            .unwrap_or_default();
        self.read_alerts.retain(|key| current.contains(key));
        self.dismissed_alerts.retain(|key| current.contains(key));
    }

    fn clamp_selection(&mut self) {
        let children = self.visible_children().len();
        let alerts = self.visible_alerts().len();
        self.selected_child_index = self.selected_child_index.min(children.saturating_sub(1));
        self.selected_alert_index = self.selected_alert_index.min(alerts.saturating_sub(1));
    }

    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view. The child selection carries over.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_alert_index = 0;
    }

    /// Open the Nutrition view for the selected child, remembering where we came from.
    pub fn open_nutrition(&mut self) {
        if self.current_view == View::Nutrition {
            return;
        }
        if self.current_view == View::Alerts {
            if let Some(index) = self.selected_child_position() {
                self.selected_child_index = index;
            }
        }
        self.show_detail_overlay = false;
        self.push_view(View::Nutrition);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Summary | View::Nutrition => {
                let max = self.visible_children().len().saturating_sub(1);
                self.selected_child_index = (self.selected_child_index + n).min(max);
            }
            View::Alerts => {
                let max = self.visible_alerts().len().saturating_sub(1);
                self.selected_alert_index = (self.selected_alert_index + n).min(max);
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Summary | View::Nutrition => {
                self.selected_child_index = self.selected_child_index.saturating_sub(n);
            }
            View::Alerts => {
                self.selected_alert_index = self.selected_alert_index.saturating_sub(n);
            }
        }
    }

    pub fn select_first(&mut self) {
        match self.current_view {
            View::Summary | View::Nutrition => self.selected_child_index = 0,
            View::Alerts => self.selected_alert_index = 0,
        }
    }

    pub fn select_last(&mut self) {
        match self.current_view {
            View::Summary | View::Nutrition => {
                self.selected_child_index = self.visible_children().len().saturating_sub(1);
            }
            View::Alerts => {
                self.selected_alert_index = self.visible_alerts().len().saturating_sub(1);
            }
        }
    }

    /// Select a row by its visual position, ignoring rows past the end.
    pub fn select_row(&mut self, row: usize) {
        match self.current_view {
            View::Summary | View::Nutrition => {
                if row < self.visible_children().len() {
                    self.selected_child_index = row;
                }
            }
            View::Alerts => {
                if row < self.visible_alerts().len() {
                    self.selected_alert_index = row;
                }
            }
        }
    }

    /// Children after filtering and sorting, in display order.
    pub fn visible_children(&self) -> Vec<&ChildData> {
        let Some(data) = &self.data else {
            return Vec::new();
        };
        let mut children: Vec<&ChildData> =
            data.children.iter().filter(|c| self.matches_filter(&c.name)).collect();
        sort_children_by(&mut children, self.sort_column, self.sort_ascending);
        children
    }

    /// Alerts after filtering and sorting, in display order.
    ///
    /// Dismissed alerts are hidden. The alert filter applies first, then the
    /// text filter, which matches either the child's name or the vital's
    /// label.
    pub fn visible_alerts(&self) -> Vec<(&ChildData, Alert)> {
        let mut alerts: Vec<(&ChildData, Alert)> = self
            .active_alerts()
            .into_iter()
            .filter(|(child, alert)| {
                self.alert_filter
                    .accepts(alert.status(), self.is_alert_read(child, alert))
            })
            .filter(|(child, alert)| {
                self.matches_filter(&child.name) || self.matches_filter(alert.label())
            })
            .collect();
        sort_alerts(&mut alerts, self.alert_sort_column, self.alert_sort_ascending);
        alerts
    }

    /// Every alert that has not been dismissed, unsorted.
    fn active_alerts(&self) -> Vec<(&ChildData, Alert)> {
        let Some(data) = &self.data else {
            return Vec::new();
        };
        data.alerts()
            .into_iter()
            .filter(|(child, alert)| !self.dismissed_alerts.contains(&alert.key(&child.name)))
            .collect()
    }

    pub fn is_alert_read(&self, child: &ChildData, alert: &Alert) -> bool {
        self.read_alerts.contains(&alert.key(&child.name))
    }

    /// Alerts not yet dismissed.
    pub fn active_alert_count(&self) -> usize {
        self.active_alerts().len()
    }

    /// Alerts neither read nor dismissed.
    pub fn unread_alert_count(&self) -> usize {
        self.active_alerts()
            .iter()
            .filter(|(child, alert)| !self.is_alert_read(child, alert))
            .count()
    }

    fn selected_alert_key(&self) -> Option<AlertKey> {
        self.visible_alerts()
            .get(self.selected_alert_index)
            .map(|(child, alert)| alert.key(&child.name))
    }

    /// Mark the alert under the cursor as read.
    pub fn mark_selected_alert_read(&mut self) {
        if let Some(key) = self.selected_alert_key() {
            self.read_alerts.insert(key);
            self.clamp_selection();
        }
    }

    /// Mark every active alert as read.
    pub fn mark_all_alerts_read(&mut self) {
        let keys: Vec<AlertKey> = self
            .active_alerts()
            .iter()
            .map(|(child, alert)| alert.key(&child.name))
            .collect();
        self.read_alerts.extend(keys);
        self.clamp_selection();
    }

    /// Hide the alert under the cursor until it resolves.
    ///
    /// Returns false when no alert is selected.
    pub fn dismiss_selected_alert(&mut self) -> bool {
        let Some(key) = self.selected_alert_key() else {
            return false;
        };
        self.dismissed_alerts.insert(key);
        self.clamp_selection();
        true
    }

    pub fn cycle_alert_filter(&mut self) {
        self.alert_filter = self.alert_filter.next();
        self.selected_alert_index = 0;
    }

    pub fn cycle_meal_age_group(&mut self) {
        self.meal_filter.cycle_age_group();
    }

    pub fn cycle_meal_time(&mut self) {
        self.meal_filter.cycle_meal_time();
    }

    /// The child under the cursor in the current view.
    ///
    /// In the Alerts view this is the child the selected alert belongs to.
    pub fn selected_child(&self) -> Option<&ChildData> {
        match self.current_view {
            View::Summary | View::Nutrition => {
                self.visible_children().get(self.selected_child_index).copied()
            }
            View::Alerts => self
                .visible_alerts()
                .into_iter()
                .nth(self.selected_alert_index)
                .map(|(child, _)| child),
        }
    }

    /// Position of the selected child in the child list.
    fn selected_child_position(&self) -> Option<usize> {
        let name = self.selected_child()?.name.clone();
        self.visible_children().iter().position(|c| c.name == name)
    }

    /// Open the detail overlay for the selected child.
    pub fn enter_detail(&mut self) {
        if self.selected_child().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then pop view stack, then go to Summary.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if !self.pop_view() && self.current_view != View::Summary {
            self.set_view(View::Summary);
        }
    }

    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column for the current view.
    pub fn cycle_sort(&mut self) {
        match self.current_view {
            View::Summary | View::Nutrition => self.sort_column = self.sort_column.next(),
            View::Alerts => self.alert_sort_column = self.alert_sort_column.next(),
        }
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        match self.current_view {
            View::Summary | View::Nutrition => self.sort_ascending = !self.sort_ascending,
            View::Alerts => self.alert_sort_ascending = !self.alert_sort_ascending,
        }
    }

    /// Enter filter input mode.
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode, keeping the text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Case-insensitive substring match against the filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        export::write(data, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelSource, FileSource};
    use tokio::sync::watch;
    use vitalwatch_types::nutrition::MealTime;
    use vitalwatch_types::{HealthReading, Snapshot, VitalMetric, VitalStatus};

    fn reading(bpm: f64) -> HealthReading {
        HealthReading {
            heart_rate: VitalMetric::new(bpm, "bpm"),
            spo2: VitalMetric::new(98.0, "%"),
            sleep_hours: VitalMetric::new(14.0, "hrs"),
            activity_level: VitalMetric::new(80.0, "%"),
        }
    }

    fn snapshot() -> Snapshot {
        snapshot_with_paul(125.0)
    }

    fn snapshot_with_paul(bpm: f64) -> Snapshot {
        Snapshot::builder()
            .child("Fatima", |c| c.age_months(8.0).reading(reading(125.0)))
            .child("Ibrahim", |c| c.age_months(36.0).reading(reading(85.0)))
            .child("Paul", |c| c.age_months(18.0).reading(reading(bpm)))
            .child("Mary", |c| c.age_months(12.0).reading(reading(90.0)))
            .build()
    }

    fn alert_names(app: &App) -> Vec<String> {
        app.visible_alerts()
            .iter()
            .map(|(c, _)| c.name.clone())
            .collect()
    }

    fn app() -> (watch::Sender<Snapshot>, App) {
        let (tx, source) = ChannelSource::create("test");
        tx.send(snapshot()).unwrap();
        let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());
        assert!(app.reload_data().unwrap());
        (tx, app)
    }

    fn names(app: &App) -> Vec<String> {
        app.visible_children().iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Summary.next(), View::Alerts);
        assert_eq!(View::Nutrition.next(), View::Summary);
        assert_eq!(View::Summary.prev(), View::Nutrition);
        assert_eq!(View::Alerts.label(), "Alerts");
    }

    #[test]
    fn test_reload_and_history() {
        let (tx, mut app) = app();
        assert_eq!(app.data.as_ref().unwrap().children.len(), 4);
        assert_eq!(app.history.len("Paul"), 1);
        assert!(!app.reload_data().unwrap());

        tx.send(snapshot()).unwrap();
        assert!(app.reload_data().unwrap());
        assert_eq!(app.history.len("Paul"), 2);
    }

    #[test]
    fn test_reload_recovers_after_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{"children":{"Fa"#).unwrap();

        let source = FileSource::new(&path);
        let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());
        assert!(!app.reload_data().unwrap());
        assert!(app.load_error.as_deref().unwrap().starts_with("Parse error"));
        assert!(!app.reload_data().unwrap());

        // The writer finishes the file
        std::fs::write(
            &path,
            r#"{"version":{"major":1,"minor":0},"timestamp_ms":0,"children":{"Fatima":{"age_months":8.0}}}"#,
        )
        .unwrap();

        assert!(app.reload_data().unwrap());
        assert!(app.load_error.is_none());
        assert_eq!(names(&app), vec!["Fatima"]);
    }

    #[test]
    fn test_default_order_is_worst_first() {
        let (_tx, app) = app();
        assert_eq!(names(&app), vec!["Paul", "Fatima", "Ibrahim", "Mary"]);
        assert_eq!(app.selected_child().unwrap().name, "Paul");
        assert_eq!(app.selected_child().unwrap().status, VitalStatus::Critical);
    }

    #[test]
    fn test_sort_by_name() {
        let (_tx, mut app) = app();
        app.sort_column = SortColumn::Name;
        app.sort_ascending = true;
        assert_eq!(names(&app), vec!["Fatima", "Ibrahim", "Mary", "Paul"]);

        app.toggle_sort_direction();
        assert_eq!(names(&app), vec!["Paul", "Mary", "Ibrahim", "Fatima"]);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let (_tx, mut app) = app();
        app.select_prev();
        assert_eq!(app.selected_child_index, 0);

        app.select_next_n(10);
        assert_eq!(app.selected_child_index, 3);

        app.select_first();
        app.select_next();
        assert_eq!(app.selected_child().unwrap().name, "Fatima");

        app.select_row(9);
        assert_eq!(app.selected_child_index, 1);
        app.select_last();
        assert_eq!(app.selected_child_index, 3);
    }

    #[test]
    fn test_filter() {
        let (_tx, mut app) = app();
        app.select_last();
        app.start_filter();
        for c in "MA".chars() {
            app.filter_push(c);
        }
        assert_eq!(names(&app), vec!["Fatima", "Mary"]);
        assert_eq!(app.selected_child_index, 1);

        app.clear_filter();
        assert!(!app.filter_active);
        assert_eq!(names(&app).len(), 4);
    }

    #[test]
    fn test_alerts_view_selects_alert_child() {
        let (_tx, mut app) = app();
        app.set_view(View::Alerts);

        let alerts = app.visible_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].0.name, "Paul");

        app.select_next();
        assert_eq!(app.selected_child().unwrap().name, "Fatima");

        // Filtering on the vital label keeps both alerts
        app.filter_text = "heart".to_string();
        assert_eq!(app.visible_alerts().len(), 2);
    }

    #[test]
    fn test_mark_read_and_alert_filters() {
        let (_tx, mut app) = app();
        app.set_view(View::Alerts);
        assert_eq!(app.unread_alert_count(), 2);

        app.mark_selected_alert_read();
        assert_eq!(app.unread_alert_count(), 1);
        let alerts = app.visible_alerts();
        assert_eq!(alerts[0].0.name, "Paul");
        assert!(app.is_alert_read(alerts[0].0, &alerts[0].1));
        assert!(!app.is_alert_read(alerts[1].0, &alerts[1].1));

        app.cycle_alert_filter();
        assert_eq!(app.alert_filter, AlertFilter::Unread);
        assert_eq!(alert_names(&app), vec!["Fatima"]);

        app.cycle_alert_filter();
        assert_eq!(app.alert_filter, AlertFilter::Critical);
        assert_eq!(alert_names(&app), vec!["Paul"]);

        app.mark_all_alerts_read();
        assert_eq!(app.unread_alert_count(), 0);
        assert_eq!(app.active_alert_count(), 2);
    }

    #[test]
    fn test_read_state_survives_new_snapshot() {
        let (tx, mut app) = app();
        app.set_view(View::Alerts);
        app.mark_selected_alert_read();

        tx.send(snapshot_with_paul(128.0)).unwrap();
        assert!(app.reload_data().unwrap());
        assert_eq!(app.unread_alert_count(), 1);
    }

    #[test]
    fn test_dismissed_alert_returns_after_it_resolves() {
        let (tx, mut app) = app();
        app.set_view(View::Alerts);

        assert!(app.dismiss_selected_alert());
        assert_eq!(app.active_alert_count(), 1);
        assert_eq!(alert_names(&app), vec!["Fatima"]);
        assert_eq!(app.selected_alert_index, 0);

        // Still out of range: stays dismissed
        tx.send(snapshot()).unwrap();
        app.reload_data().unwrap();
        assert_eq!(app.active_alert_count(), 1);

        // Back to normal, then out of range again: reported as new
        tx.send(snapshot_with_paul(90.0)).unwrap();
        app.reload_data().unwrap();
        tx.send(snapshot()).unwrap();
        app.reload_data().unwrap();
        assert_eq!(alert_names(&app), vec!["Paul", "Fatima"]);
        assert_eq!(app.unread_alert_count(), 2);
    }

    #[test]
    fn test_meal_filter_cycles() {
        let (_tx, mut app) = app();
        app.cycle_meal_age_group();
        app.cycle_meal_time();
        app.cycle_meal_time();
        assert_eq!(app.meal_filter.age_group, Some(4));
        assert_eq!(app.meal_filter.meal_time, Some(MealTime::Lunch));
    }

    #[test]
    fn test_detail_and_back() {
        let (_tx, mut app) = app();
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Summary);

        app.set_view(View::Alerts);
        app.go_back();
        assert_eq!(app.current_view, View::Summary);
    }

    #[test]
    fn test_open_nutrition_from_alerts() {
        let (_tx, mut app) = app();
        app.set_view(View::Alerts);
        app.select_next();

        app.open_nutrition();
        assert_eq!(app.current_view, View::Nutrition);
        assert_eq!(app.breadcrumb(), "Alerts > Nutrition");
        assert_eq!(app.selected_child().unwrap().name, "Fatima");

        app.go_back();
        assert_eq!(app.current_view, View::Alerts);
        assert_eq!(app.selected_alert_index, 1);
    }

    #[test]
    fn test_detail_needs_data() {
        let (_tx, source) = ChannelSource::create("empty");
        let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());
        app.enter_detail();
        assert!(!app.show_detail_overlay);
        assert!(app.export_state(Path::new("unused.json")).is_err());
    }

    #[test]
    fn test_status_message() {
        let (_tx, mut app) = app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));
    }

    #[test]
    fn test_export_state() {
        let (_tx, app) = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["summary"]["total_children"], 4);
        assert_eq!(json["summary"]["critical"], 1);
    }
}

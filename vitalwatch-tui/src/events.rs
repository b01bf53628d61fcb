//! Keyboard and mouse input handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Any key closes help
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            KeyCode::Char('n') => app.open_nutrition(),
            // Step through children while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Summary),
        KeyCode::Char('2') => app.set_view(View::Alerts),
        KeyCode::Char('3') => app.set_view(View::Nutrition),

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Char('n') => app.open_nutrition(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => {
            if let Err(e) = app.reload_data() {
                app.set_status_message(format!("Reload failed: {}", e));
            }
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.toggle_sort_direction(),

        // Alerts view
        KeyCode::Char('m') if app.current_view == View::Alerts => {
            app.mark_selected_alert_read()
        }
        KeyCode::Char('M') if app.current_view == View::Alerts => app.mark_all_alerts_read(),
        KeyCode::Char('d') if app.current_view == View::Alerts => {
            if app.dismiss_selected_alert() {
                app.set_status_message("Alert dismissed until it resolves".to_string());
            }
        }
        KeyCode::Char('f') if app.current_view == View::Alerts => app.cycle_alert_filter(),

        // Nutrition view
        KeyCode::Char('a') if app.current_view == View::Nutrition => app.cycle_meal_age_group(),
        KeyCode::Char('t') if app.current_view == View::Nutrition => app.cycle_meal_time(),

        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let path = app.export_path.clone();
            match app.export_state(&path) {
                Ok(()) => app.set_status_message(format!("Exported to {}", path.display())),
                Err(e) => app.set_status_message(format!("Export failed: {}", e)),
            }
        }

        _ => {}
    }
}

/// Handle key input while the filter is active.
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.filter_active = false,
        // Keep the text but stop typing
        KeyCode::Esc => app.cancel_filter(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }
        KeyCode::Char(c) => app.filter_push(c),
        _ => {}
    }
}

/// Handle mouse events.
///
/// `content_start_row` is the row of the table header in the content area.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            if clicked_row > content_start_row && !app.show_detail_overlay {
                app.select_row((clicked_row - content_start_row - 1) as usize);
            }

            // Tab bar is the second row. Approximate tab positions:
            // Summary (0-12), Alerts (13-26), Nutrition (27-40)
            if clicked_row == 1 {
                let col = mouse.column;
                if col < 13 {
                    app.set_view(View::Summary);
                } else if col < 27 {
                    app.set_view(View::Alerts);
                } else if col < 41 {
                    app.set_view(View::Nutrition);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Thresholds;
    use crate::source::ChannelSource;
    use crate::ui::{AlertFilter, Theme};
    use tokio::sync::watch;
    use vitalwatch_types::nutrition::MealTime;
    use vitalwatch_types::{HealthReading, Snapshot, VitalMetric};

    fn reading(bpm: f64) -> HealthReading {
        HealthReading {
            heart_rate: VitalMetric::new(bpm, "bpm"),
            spo2: VitalMetric::new(98.0, "%"),
            sleep_hours: VitalMetric::new(14.0, "hrs"),
            activity_level: VitalMetric::new(80.0, "%"),
        }
    }

    fn app() -> (watch::Sender<Snapshot>, App) {
        let (tx, source) = ChannelSource::create("test");
        // Fatima (infant 80-120) and Mary (toddler 70-110) both alert on heart rate
        let snapshot = Snapshot::builder()
            .child("Fatima", |c| c.age_months(8.0).reading(reading(125.0)))
            .child("Ibrahim", |c| c.age_months(36.0).reading(reading(85.0)))
            .child("Mary", |c| c.age_months(12.0).reading(reading(140.0)))
            .build();
        tx.send(snapshot).unwrap();
        let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());
        app.reload_data().unwrap();
        (tx, app)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for &code in codes {
            handle_key_event(app, key(code));
        }
    }

    fn mouse(kind: MouseEventKind, row: u16, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.current_view, View::Alerts);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.current_view, View::Nutrition);
        press(&mut app, &[KeyCode::BackTab, KeyCode::Left]);
        assert_eq!(app.current_view, View::Summary);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert!(app.show_help);
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_filter_typing() {
        let (_tx, mut app) = app();
        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('q'), KeyCode::Char('j')],
        );
        // Letters go to the filter, not to quit or navigation
        assert!(app.running);
        assert_eq!(app.filter_text, "qj");

        press(&mut app, &[KeyCode::Backspace, KeyCode::Backspace]);
        assert!(!app.filter_active);

        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('m'), KeyCode::Enter],
        );
        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "m");

        press(&mut app, &[KeyCode::Char('c')]);
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_ctrl_c_clears_filter() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('x')]);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.filter_text.is_empty());
        assert!(!app.filter_active);
    }

    #[test]
    fn test_detail_overlay_keys() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.show_detail_overlay);

        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.selected_child_index, 1);

        // q closes the overlay instead of quitting
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.show_detail_overlay);
        assert!(app.running);

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('n')]);
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Nutrition);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.current_view, View::Summary);
    }

    #[test]
    fn test_sort_keys() {
        let (_tx, mut app) = app();
        let column = app.sort_column;
        press(&mut app, &[KeyCode::Char('s')]);
        assert_ne!(app.sort_column, column);

        let ascending = app.sort_ascending;
        press(&mut app, &[KeyCode::Char('S')]);
        assert_ne!(app.sort_ascending, ascending);
    }

    #[test]
    fn test_export_key_reports_status() {
        let (_tx, app) = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut app = app.with_export_path(path.clone());

        press(&mut app, &[KeyCode::Char('e')]);
        assert!(path.exists());
        assert!(app.get_status_message().unwrap().starts_with("Exported to"));
    }

    #[test]
    fn test_alert_acknowledgement_keys() {
        let (_tx, mut app) = app();
        assert_eq!(app.unread_alert_count(), 2);

        // Only active in the Alerts view
        press(&mut app, &[KeyCode::Char('m'), KeyCode::Char('d')]);
        assert_eq!(app.unread_alert_count(), 2);
        assert_eq!(app.active_alert_count(), 2);

        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('m')]);
        assert_eq!(app.unread_alert_count(), 1);

        press(&mut app, &[KeyCode::Char('f')]);
        assert_eq!(app.alert_filter, AlertFilter::Unread);
        assert_eq!(app.visible_alerts().len(), 1);

        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.active_alert_count(), 1);
        assert_eq!(
            app.get_status_message(),
            Some("Alert dismissed until it resolves")
        );

        press(&mut app, &[KeyCode::Char('M')]);
        assert_eq!(app.unread_alert_count(), 0);
    }

    #[test]
    fn test_meal_filter_keys() {
        let (_tx, mut app) = app();
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('t')]);
        assert_eq!(app.meal_filter.age_group, None);

        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('a'), KeyCode::Char('t')]);
        assert_eq!(app.meal_filter.age_group, Some(4));
        assert_eq!(app.meal_filter.meal_time, Some(MealTime::Breakfast));
        assert!(app.running);
    }

    #[test]
    fn test_mouse() {
        let (_tx, mut app) = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollDown, 0, 0), 3);
        assert_eq!(app.selected_child_index, 1);

        // Row 4 is the first data row below a table header on row 3
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 4, 5), 3);
        assert_eq!(app.selected_child_index, 0);

        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 1, 15), 3);
        assert_eq!(app.current_view, View::Alerts);

        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), 3);
        assert_eq!(app.current_view, View::Summary);
    }
}

//! Nutrition view rendering.
//!
//! A child list on the left. On the right, the staple-food recommendations
//! for the selected child's age sit above the meal catalog, which is
//! filtered by age group and meal time.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use vitalwatch_types::format_age;
use vitalwatch_types::nutrition::{meals, recommendations_for, FoodRecommendation};

use crate::app::App;
use crate::data::ChildData;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.data.is_none() {
        return;
    }

    let chunks = Layout::horizontal([Constraint::Length(24), Constraint::Min(30)]).split(area);

    let children = app.visible_children();
    let selected = app.selected_child_index.min(children.len().saturating_sub(1));

    let items: Vec<ListItem> = children
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(c.status.symbol(), app.theme.status_style(c.status)),
                Span::raw(format!(" {} ({})", c.name, format_age(c.age_months))),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Children ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !children.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let Some(child) = children.get(selected) else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", child.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} · {}", format_age(child.age_months), child.band.label()),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(""),
    ];
    for rec in recommendations_for(child.age_months) {
        lines.extend(recommendation_lines(app, rec));
        lines.push(Line::from(""));
    }

    let right = Layout::vertical([Constraint::Min(8), Constraint::Length(10)]).split(chunks[1]);

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Recommended Foods ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );
    frame.render_widget(panel, right[0]);

    render_meals(frame, app, child, right[1]);
}

/// The meal catalog under the current filter. Meals the child is still too
/// young for are dimmed.
fn render_meals(frame: &mut Frame, app: &App, child: &ChildData, area: Rect) {
    let dim = Style::default().add_modifier(Modifier::DIM);

    let header = Row::new(vec![
        Cell::from("Meal"),
        Cell::from("Local name"),
        Cell::from("Age"),
        Cell::from("Time"),
        Cell::from("kcal"),
        Cell::from("Prep"),
        Cell::from("Nutrients"),
    ])
    .style(app.theme.header);

    let catalog = meals(&app.meal_filter);
    let rows: Vec<Row> = catalog
        .iter()
        .map(|meal| {
            let style = if meal.is_suitable_for(child.age_months) {
                Style::default()
            } else {
                dim
            };
            Row::new(vec![
                Cell::from(meal.name).style(app.theme.priority_style(meal.priority)),
                Cell::from(meal.local_name),
                Cell::from(meal.age_group()),
                Cell::from(meal.meal_time.label()),
                Cell::from(meal.calories_kcal.to_string()),
                Cell::from(format!("{}m", meal.preparation_minutes)),
                Cell::from(meal.nutrients.join(", ")),
            ])
            .style(style)
        })
        .collect();

    let title = format!(
        " Meals ({}) [a:{}] [t:{}] ",
        catalog.len(),
        app.meal_filter.age_group_label(),
        app.meal_filter.meal_time_label()
    );

    let widths = [
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(20),
    ];

    let body: Vec<Row> = if rows.is_empty() {
        vec![Row::new(vec![Cell::from("No meals match this filter").style(dim)])]
    } else {
        rows
    };

    let table = Table::new(body, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, area);
}

fn recommendation_lines(app: &App, rec: &FoodRecommendation) -> Vec<Line<'static>> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", rec.food),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({}) ", rec.local_name), dim),
            Span::styled(
                format!("[{}]", rec.priority.label()),
                app.theme.priority_style(rec.priority),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("   {} · {}", rec.portion, rec.timing)),
            Span::styled(format!("   {}", rec.benefits.join(", ")), dim),
        ]),
        Line::from(Span::styled(format!("   {}", rec.description), dim)),
    ]
}

//! KPI card component
//!
//! Renders one grid cell: a loading placeholder, the edit form, or the
//! total/delta/chart view with its insert markers.

use super::super::layout::{Cell, cell_borders};
use super::super::state::DashboardState;
use super::super::utils::{CUSTOM_GREEN, CUSTOM_RED};
use crate::cards::summary::{format_number, format_percentage_change, is_non_negative};
use crate::cards::{Card, EditField};
use crate::model::SegmentGroup;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols::{self, border};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Chart, Dataset, GraphType, List, ListItem, ListState, Padding, Paragraph,
};

/// Dotted dividers between cells.
const DIVIDER: border::Set = border::Set {
    top_left: "┄",
    top_right: "┄",
    bottom_left: "┄",
    bottom_right: "┄",
    vertical_left: "┆",
    vertical_right: "┆",
    horizontal_top: "┄",
    horizontal_bottom: "┄",
};

pub fn render_card(f: &mut Frame, cell: Cell, state: &DashboardState) {
    let block = Block::default()
        .borders(cell_borders(cell.index))
        .border_set(DIVIDER)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(2));
    let inner = block.inner(cell.area);
    f.render_widget(block, cell.area);

    let Some(card) = state.card_at(cell.index) else {
        return;
    };
    let focused = state.focus == cell.index;

    if !state.catalogs_loaded() {
        f.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else if card.edit_mode || !card.is_complete() {
        render_edit_form(f, inner, card, state, focused, state.is_initial_card(cell.index));
    } else {
        render_view(f, inner, card, focused);
        let highlighted = focused || state.hover == Some(cell.index);
        render_insert_markers(f, cell, highlighted);
    }
}

fn render_edit_form(
    f: &mut Frame,
    area: Rect,
    card: &Card,
    state: &DashboardState,
    focused: bool,
    is_initial: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(area);

    let active = |field: EditField| focused && card.field == field;
    let picker_style = |field: EditField| {
        if active(field) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    };

    f.render_widget(label("Metric", focused), chunks[0]);
    let metric_name = card
        .draft
        .metric
        .as_ref()
        .map(|m| m.display_name.as_str())
        .unwrap_or("");
    f.render_widget(
        Paragraph::new(format!("‹ {} ›", metric_name)).style(picker_style(EditField::Metric)),
        chunks[1],
    );

    f.render_widget(label("Segment", focused), chunks[2]);
    let (items, selected_row) = segment_items(&state.segment_groups, card);
    let mut list_state = ListState::default().with_selected(selected_row);
    let list = List::new(items)
        .highlight_style(picker_style(EditField::Segment))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, chunks[3], &mut list_state);

    let has_total = card.summary.has_total();
    let save = Span::styled(
        format!(" [Enter] {} ", if has_total { "Save" } else { "Add" }),
        Style::default()
            .fg(Color::White)
            .bg(CUSTOM_GREEN)
            .add_modifier(Modifier::BOLD),
    );
    let buttons = if is_initial {
        Line::from(save)
    } else {
        let cancel = Span::styled(
            format!(" [Esc] {} ", if has_total { "Delete" } else { "Cancel" }),
            Style::default().fg(CUSTOM_RED).add_modifier(Modifier::BOLD),
        );
        Line::from(vec![cancel, Span::raw("  "), save])
    };
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[4],
    );
}

fn label(text: &str, focused: bool) -> Paragraph<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(text).style(style)
}

/// Group headers followed by their options, plus the list row of the drafted segment.
fn segment_items<'a>(groups: &'a [SegmentGroup], card: &Card) -> (Vec<ListItem<'a>>, Option<usize>) {
    let selected_id = card.draft.segment.as_ref().map(|s| s.segment_id.as_str());
    let mut items = Vec::new();
    let mut selected_row = None;
    for group in groups {
        items.push(ListItem::new(Line::from(Span::styled(
            group.display_name.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ))));
        for segment in &group.values {
            if selected_row.is_none() && selected_id == Some(segment.segment_id.as_str()) {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(format!("  {}", segment.display_name)));
        }
    }
    (items, selected_row)
}

fn render_view(f: &mut Frame, area: Rect, card: &Card, focused: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let title = format!(
        "{}, {}",
        card.metric.as_ref().map(|m| m.display_name.as_str()).unwrap_or(""),
        card.segment.as_ref().map(|s| s.display_name.as_str()).unwrap_or("")
    );
    let title_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(Paragraph::new(title).style(title_style), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(rows[1]);

    let change = card.summary.percentage_change;
    let delta_color = if is_non_negative(change) {
        CUSTOM_GREEN
    } else {
        CUSTOM_RED
    };
    let figures = Paragraph::new(vec![
        Line::from(Span::styled(
            format_number(card.summary.total_value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_percentage_change(change),
            Style::default().fg(delta_color),
        )),
    ]);
    let figures_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(2)])
        .split(columns[0])[1];
    f.render_widget(figures, figures_area);

    render_chart(f, columns[1], card);
}

fn render_chart(f: &mut Frame, area: Rect, card: &Card) {
    let data: Vec<(f64, f64)> = card
        .series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    if data.is_empty() {
        return;
    }

    let (mut low, mut high) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    if low == high {
        low -= 1.0;
        high += 1.0;
    }

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(CUSTOM_GREEN))
        .data(&data);
    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, (data.len() - 1).max(1) as f64]))
        .y_axis(Axis::default().bounds([low, high]));
    f.render_widget(chart, area);
}

fn render_insert_markers(f: &mut Frame, cell: Cell, highlighted: bool) {
    let style = if highlighted {
        Style::default().fg(CUSTOM_GREEN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    for marker in [cell.insert_before_marker(), cell.insert_after_marker()] {
        f.render_widget(
            Paragraph::new("+").style(style),
            Rect::new(marker.x, marker.y, 1, 1),
        );
    }
}

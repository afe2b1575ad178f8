//! Keyboard and mouse handling for the dashboard.

use super::layout::{Hit, dashboard_areas, grid_cells, hit_test};
use super::state::DashboardState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

/// Apply a key press to the focused card.
pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> InputOutcome {
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return InputOutcome::Quit;
    }

    let focus = state.focus;
    let editing = state.focused_card().is_some_and(|c| c.edit_mode);
    match key.code {
        KeyCode::Tab => state.move_focus(1),
        KeyCode::BackTab => state.move_focus(-1),
        _ if editing => match key.code {
            KeyCode::Left | KeyCode::Right => state.toggle_picker(),
            KeyCode::Up => state.step_picker(-1),
            KeyCode::Down => state.step_picker(1),
            KeyCode::Enter => state.save_card(focus),
            KeyCode::Esc => state.cancel_card(focus),
            _ => {}
        },
        KeyCode::Right => state.move_focus(1),
        KeyCode::Left => state.move_focus(-1),
        KeyCode::Up => state.move_focus_row(-1),
        KeyCode::Down => state.move_focus_row(1),
        KeyCode::Enter | KeyCode::Char('e') => state.edit_card(focus),
        KeyCode::Char('b') => state.insert_card(focus),
        KeyCode::Char('a') => state.insert_card(focus + 1),
        _ => {}
    }
    InputOutcome::Continue
}

/// Apply a mouse event. `area` is the full terminal area the dashboard is drawn in.
pub fn handle_mouse(state: &mut DashboardState, mouse: MouseEvent, area: Rect) {
    let grid = dashboard_areas(area).grid;
    let cells = grid_cells(grid, state.visible_card_count(), state.focus);
    let at = Position::new(mouse.column, mouse.row);
    let hit = hit_test(&cells, at, |index| {
        state.cards.get(index).is_some_and(|c| !c.edit_mode)
    });

    match mouse.kind {
        MouseEventKind::Moved => {
            state.hover = hit.map(|h| match h {
                Hit::Card(i) | Hit::InsertBefore(i) | Hit::InsertAfter(i) => i,
            });
        }
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(Hit::InsertBefore(index)) => state.insert_card(index),
            Some(Hit::InsertAfter(index)) => state.insert_card(index + 1),
            Some(Hit::Card(index)) => {
                state.focus = index;
                state.edit_card(index);
            }
            None => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::{Event, EventType, Payload};
    use crate::logging::LogLevel;
    use crate::model::fixtures::{groups, metrics};
    use crate::ui::app::UIConfig;
    use std::time::Instant;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_state() -> DashboardState {
        let mut state =
            DashboardState::new(Environment::Local, Instant::now(), UIConfig::new(false));
        state.add_event(
            Event::catalog_with_level("m".to_string(), EventType::Success, LogLevel::Info)
                .with_payload(Payload::Metrics(metrics())),
        );
        state.add_event(
            Event::catalog_with_level("s".to_string(), EventType::Success, LogLevel::Info)
                .with_payload(Payload::SegmentGroups(groups())),
        );
        state.update();
        state
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = loaded_state();
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), InputOutcome::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c), InputOutcome::Quit);
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('c'))), InputOutcome::Continue);
    }

    #[test]
    fn edit_form_keys_drive_pickers_and_save() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Down));
        assert_eq!(state.initial_card.draft.metric, Some(metrics()[1].clone()));

        handle_key(&mut state, press(KeyCode::Right));
        handle_key(&mut state, press(KeyCode::Down));
        assert_eq!(
            state.initial_card.draft.segment,
            Some(groups()[0].values[1].clone())
        );

        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(state.cards.len(), 1);
        let card = state.cards.get(0).unwrap();
        assert!(!card.edit_mode);
        assert_eq!(card.metric, Some(metrics()[1].clone()));
    }

    #[test]
    fn escape_does_not_remove_initial_card() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Esc));
        assert!(state.cards.is_empty());
        assert!(state.initial_card.edit_mode);
    }

    #[test]
    fn view_mode_keys_insert_and_edit() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Enter));

        handle_key(&mut state, press(KeyCode::Char('a')));
        assert_eq!(state.cards.len(), 2);
        assert_eq!(state.focus, 1);
        assert!(state.cards.get(1).unwrap().edit_mode);

        handle_key(&mut state, press(KeyCode::Esc));
        assert_eq!(state.cards.len(), 1);
        assert_eq!(state.focus, 0);

        handle_key(&mut state, press(KeyCode::Char('b')));
        assert_eq!(state.cards.len(), 2);
        assert!(state.cards.get(0).unwrap().edit_mode);
        assert!(!state.cards.get(1).unwrap().edit_mode);

        handle_key(&mut state, press(KeyCode::Tab));
        handle_key(&mut state, press(KeyCode::Char('e')));
        assert!(state.cards.get(1).unwrap().edit_mode);
    }

    #[test]
    fn clicking_markers_inserts_and_clicking_card_edits() {
        let mut state = loaded_state();
        handle_key(&mut state, press(KeyCode::Enter));
        let area = Rect::new(0, 0, 120, 40);
        let cell = grid_cells(dashboard_areas(area).grid, 1, 0)[0];

        let marker = cell.insert_after_marker();
        handle_mouse(&mut state, click(marker.x, marker.y), area);
        assert_eq!(state.cards.len(), 2);
        assert!(state.cards.get(1).unwrap().edit_mode);

        // The grid now has two columns; the first card is still in view mode.
        let cell = grid_cells(dashboard_areas(area).grid, 2, 0)[0];
        handle_mouse(&mut state, click(cell.area.x + 4, cell.area.y + 1), area);
        assert_eq!(state.focus, 0);
        assert!(state.cards.get(0).unwrap().edit_mode);
    }

    #[test]
    fn hover_tracks_card_under_pointer() {
        let mut state = loaded_state();
        let area = Rect::new(0, 0, 120, 40);
        let cell = grid_cells(dashboard_areas(area).grid, 1, 0)[0];
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: cell.area.x + 2,
            row: cell.area.y + 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, moved, area);
        assert_eq!(state.hover, Some(0));

        let outside = MouseEvent {
            column: 0,
            row: 0,
            ..moved
        };
        handle_mouse(&mut state, outside, area);
        assert_eq!(state.hover, None);
    }
}

//! Dashboard footer component
//!
//! Renders key hints for the focused card

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render key hints matching the focused card's mode.
pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let editing = state.focused_card().is_some_and(|c| c.edit_mode);
    let footer_text = if editing && state.is_initial_card(state.focus) {
        "[←/→] Field | [↑/↓] Choose | [Enter] Save | [Q] Quit"
    } else if editing {
        "[←/→] Field | [↑/↓] Choose | [Enter] Save | [Esc] Cancel | [Tab] Next | [Q] Quit"
    } else {
        "[Arrows/Tab] Move | [E] Edit | [B] Add before | [A] Add after | [Q] Quit"
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

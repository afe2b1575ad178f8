//! Dashboard main renderer

use super::components::{card, footer, header, logs};
use super::layout::{dashboard_areas, grid_cells};
use super::state::DashboardState;
use super::utils::BACKGROUND;
use ratatui::Frame;
use ratatui::prelude::Style;
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), f.area());
    }

    let areas = dashboard_areas(f.area());
    header::render_header(f, areas.header, state);
    for cell in grid_cells(areas.grid, state.visible_card_count(), state.focus) {
        card::render_card(f, cell, state);
    }
    logs::render_logs_panel(f, areas.logs, state);
    footer::render_footer(f, areas.footer, state);
}

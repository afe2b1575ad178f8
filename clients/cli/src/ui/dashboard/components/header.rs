//! Dashboard header component
//!
//! Renders the title and the data source summary

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title line and a status line naming the API and catalog sizes.
pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let version = env!("CARGO_PKG_VERSION");
    let title = Line::from(Span::styled(
        format!("KPI DASHBOARD v{}", version),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    let catalog_status = if state.catalogs_loaded() {
        Span::styled(
            format!(
                "{} metrics, {} segment groups",
                state.metrics.len(),
                state.segment_groups.len()
            ),
            Style::default().fg(Color::Green),
        )
    } else {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        Span::styled(
            format!("loading catalogs {}", SPINNER[state.tick % SPINNER.len()]),
            Style::default().fg(Color::LightYellow),
        )
    };
    let uptime = state.start_time.elapsed().as_secs();
    let status = Line::from(vec![
        Span::styled(
            format!("{} {} ", state.environment, state.environment.api_url()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("| "),
        catalog_status,
        Span::styled(
            format!(" | {} cards | up {}m {:02}s", state.cards.len(), uptime / 60, uptime % 60),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(vec![title, status])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(header, area);
}

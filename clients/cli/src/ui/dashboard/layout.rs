//! Dashboard geometry shared by the renderer and mouse hit testing.

use crate::consts::cli_consts::{MAX_GRID_COLUMNS, MIN_CARD_HEIGHT};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::widgets::Borders;

/// Top-level regions of the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub grid: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

pub fn dashboard_areas(area: Rect) -> DashboardAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(area);
    DashboardAreas {
        header: chunks[0],
        grid: chunks[1],
        logs: chunks[2],
        footer: chunks[3],
    }
}

/// 1 column for 0-1 cards, 2 for exactly 2, 3 otherwise.
pub fn grid_columns(count: usize) -> usize {
    match count {
        0 | 1 => 1,
        2 => 2,
        _ => MAX_GRID_COLUMNS,
    }
}

/// Divider edges of the cell at `index`: a left divider for every cell not
/// starting a row of three, a top divider from the second row of three on.
pub fn cell_borders(index: usize) -> Borders {
    let mut borders = Borders::NONE;
    if index > 0 && index % MAX_GRID_COLUMNS != 0 {
        borders |= Borders::LEFT;
    }
    if index >= MAX_GRID_COLUMNS {
        borders |= Borders::TOP;
    }
    borders
}

/// A card's screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub area: Rect,
}

impl Cell {
    pub fn insert_before_marker(&self) -> Position {
        Position::new(self.area.x, self.middle_row())
    }

    pub fn insert_after_marker(&self) -> Position {
        Position::new(self.area.right().saturating_sub(1), self.middle_row())
    }

    fn middle_row(&self) -> u16 {
        self.area.y + self.area.height / 2
    }
}

/// Lay out `count` cards in the grid, scrolled so the row holding `focus`
/// is visible. Cards on rows that do not fit are omitted.
pub fn grid_cells(grid: Rect, count: usize, focus: usize) -> Vec<Cell> {
    if count == 0 || grid.height == 0 {
        return Vec::new();
    }
    let columns = grid_columns(count);
    let rows = count.div_ceil(columns);
    let visible_rows = ((grid.height / MIN_CARD_HEIGHT) as usize).clamp(1, rows);
    let focus_row = focus.min(count - 1) / columns;
    let first_row = focus_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, visible_rows as u32); visible_rows])
        .split(grid);

    let mut cells = Vec::new();
    for (offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + offset;
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for (column, area) in column_areas.iter().enumerate() {
            let index = row * columns + column;
            if index < count {
                cells.push(Cell { index, area: *area });
            }
        }
    }
    cells
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Card(usize),
    InsertBefore(usize),
    InsertAfter(usize),
}

/// Resolve a click. Insert markers only exist on cards for which
/// `has_markers(index)` holds (view-mode cards).
pub fn hit_test(cells: &[Cell], at: Position, has_markers: impl Fn(usize) -> bool) -> Option<Hit> {
    let cell = cells.iter().find(|c| c.area.contains(at))?;
    if has_markers(cell.index) {
        let near_marker = |marker: Position| marker.x == at.x && marker.y.abs_diff(at.y) <= 1;
        if near_marker(cell.insert_before_marker()) {
            return Some(Hit::InsertBefore(cell.index));
        }
        if near_marker(cell.insert_after_marker()) {
            return Some(Hit::InsertAfter(cell.index));
        }
    }
    Some(Hit::Card(cell.index))
}

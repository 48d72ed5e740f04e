//! Host information table: one labeled row per field.

use fetchtop_engine::Snapshot;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

pub fn draw_info(f: &mut ratatui::Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let rows = snapshot.rows().into_iter().map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::from(value),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title("Host"));
    f.render_widget(table, area);
}

//! Top header with the user@host identity line.

use fetchtop_engine::Snapshot;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let title = format!("fetchtop — {}  (press 'q' to quit)", snapshot.title());
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}

//! UI module root: overall layout and the per-panel drawing functions.

pub mod header;
pub mod info;
pub mod meters;

use fetchtop_engine::{MeterValues, Snapshot};
use ratatui::layout::{Constraint, Direction, Layout};

pub fn draw(f: &mut ratatui::Frame<'_>, snapshot: &Snapshot, meters: MeterValues) {
    // Root rows: header, host info, live meters
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    header::draw_header(f, rows[0], snapshot);
    info::draw_info(f, rows[1], snapshot);
    meters::draw_meters(f, rows[2], meters);
}

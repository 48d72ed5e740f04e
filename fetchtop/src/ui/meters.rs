//! Live CPU and memory gauges fed by the eased meter values.

use fetchtop_engine::smooth::displayed;
use fetchtop_engine::{MeterValues, MetricKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

pub fn draw_meters(f: &mut ratatui::Frame<'_>, area: Rect, meters: MeterValues) {
    let kinds = MetricKind::ALL;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, kinds.len() as u32); kinds.len()])
        .split(area);

    for (kind, column) in kinds.into_iter().zip(columns.iter()) {
        let (title, color) = match kind {
            MetricKind::Cpu => ("CPU", Color::Green),
            MetricKind::Memory => ("Memory", Color::Magenta),
        };
        let pct = displayed(meters.get(kind));
        let g = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(color))
            .percent(pct)
            .label(format!("{pct}%"));
        f.render_widget(g, *column);
    }
}

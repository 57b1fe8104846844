use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Fill(1),
        ])
        .split(inner);

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            "Expense Tracker",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Record what you spend and see where it goes.",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start",
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "2 add an expense | 3 view analysis | ? help",
            theme::dim_style(),
        )),
    ])
    .centered();

    f.render_widget(text, rows[1]);
}

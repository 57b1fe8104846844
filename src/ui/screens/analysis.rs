use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Chart and breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one on the Add Expense tab or with :add",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(titled_block(" Expenses by Category "));
        f.render_widget(msg, chunks[1]);
        return;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_category_chart(f, body[0], app);
    render_breakdown(f, body[1], app);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let balance_color = if app.total_balance < Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    };
    render_card(
        f,
        cards[0],
        "Total Balance",
        format_amount(app.total_balance),
        balance_color,
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        app.expense_count.to_string(),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[2],
        "Categories",
        app.category_totals.len().to_string(),
        theme::YELLOW,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    // Bars can't go below zero; credits show up in the breakdown table
    let bars: Vec<Bar> = app
        .category_totals
        .ranked()
        .into_iter()
        .enumerate()
        .take(12)
        .map(|(i, (name, total))| {
            let val = total.max(Decimal::ZERO).round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .text_value(format_amount(total))
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::chart_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::chart_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(" Expenses by Category "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Category", "Total", "Share"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .category_totals
        .shares()
        .into_iter()
        .enumerate()
        .map(|(i, share)| {
            let amount_style = if share.total < Decimal::ZERO {
                theme::credit_style()
            } else {
                theme::expense_style()
            };
            Row::new(vec![
                Cell::from(Span::styled(
                    truncate(&share.category, 18),
                    Style::default().fg(theme::chart_color(i)),
                )),
                Cell::from(Span::styled(format_amount(share.total), amount_style)),
                Cell::from(format!("{:.1}%", share.percent)),
            ])
            .style(if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            })
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(7),
    ];
    let total = app
        .category_totals
        .total()
        .map_or_else(|| "out of range".to_string(), format_amount);
    let title = format!(" Breakdown (total {total}) ");
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(&title));

    f.render_widget(table, area);
}

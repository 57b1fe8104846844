use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::analysis::COLUMNS;
use crate::ui::app::{App, InputMode};
use crate::ui::form::FormField;
use crate::ui::theme;
use crate::ui::util::{format_cell_amount, truncate};

const LABEL_WIDTH: u16 = 12;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let form_height = FormField::all().len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(5)])
        .split(area);

    render_form(f, chunks[0], app);
    render_table(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let border = if editing { theme::ACCENT } else { theme::OVERLAY };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(" New Expense ", theme::title_style()));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = FormField::all()
        .iter()
        .map(|&field| {
            let focused = editing && field == app.form.focus();
            let marker = if field.is_required() { "*" } else { " " };
            let label_style = if focused {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            let label = format!(
                "{:<width$}",
                format!("{}{marker}", field.label()),
                width = LABEL_WIDTH as usize
            );
            Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(app.form.value(field).to_string(), theme::normal_style()),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "* required. Memo is optional and is saved after the title.",
        theme::dim_style(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);

    if editing {
        let focus = app.form.focus();
        let row = FormField::all()
            .iter()
            .position(|&field| field == focus)
            .unwrap_or(0) as u16;
        let col = LABEL_WIDTH + app.form.value(focus).chars().count() as u16;
        f.set_cursor_position((inner.x + col, inner.y + row));
    }
}

fn column_title(name: &str) -> String {
    if name == "id" {
        return "ID".to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    // Borders plus the header row
    app.visible_rows = area.height.saturating_sub(3).max(1) as usize;

    let title = Span::styled(
        format!(" Expenses ({}) ", app.expenses.len()),
        theme::title_style(),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(title);

    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press i to fill in the form or use :add 12.50 Food lunch",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        COLUMNS
            .iter()
            .map(|c| Cell::from(column_title(c)).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.cursor.scroll)
        .take(app.visible_rows)
        .map(|(i, expense)| {
            let amount_style = match expense.amount {
                Some(a) if a < Decimal::ZERO => theme::credit_style(),
                Some(_) => theme::expense_style(),
                None => theme::dim_style(),
            };
            let style = if i == app.cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(expense.id.to_string()),
                Cell::from(Span::styled(format_cell_amount(expense.amount), amount_style)),
                Cell::from(truncate(&expense.category, 18)),
                Cell::from(expense.date.clone()),
                Cell::from(truncate(expense.description_or_empty(), 60)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(20),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::column_title;

    #[test]
    fn test_column_titles() {
        assert_eq!(column_title("id"), "ID");
        assert_eq!(column_title("amount"), "Amount");
        assert_eq!(column_title("description"), "Description");
    }
}

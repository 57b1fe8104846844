use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Store;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;

/// Run the interactive UI until the user quits. `startup_error` is shown on
/// the status bar when the store could not be prepared.
pub(crate) fn as_tui(store: &Store, startup_error: Option<String>) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(store);
    if let Some(msg) = startup_error {
        app.set_status(msg);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(db = %store.path().display(), "interface started");
    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => tracing::info!("interface closed"),
        Err(e) => {
            tracing::error!("interface failed: {e:?}");
            eprintln!("Error: {e:?}");
        }
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, store)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        app.running = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Editing => {
            handle_editing_input(key, app, store);
            Ok(())
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('1') => switch_screen(app, store, Screen::Welcome),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Record),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Analysis),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Enter if app.screen == Screen::Welcome => {
            switch_screen(app, store, Screen::Record);
        }
        KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('e')
            if app.screen == Screen::Record =>
        {
            app.input_mode = InputMode::Editing;
            app.set_status("");
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor.down(app.expenses.len(), app.visible_rows);
        }
        KeyCode::Char('k') | KeyCode::Up => app.cursor.up(),
        KeyCode::Char('g') => app.cursor.top(),
        KeyCode::Char('G') => app.cursor.bottom(app.expenses.len(), app.visible_rows),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.cursor.down(app.expenses.len(), app.visible_rows);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.cursor.up();
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, store: &Store) {
    match key.code {
        KeyCode::Enter => {
            app.submit_form(store);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Backspace => app.form.pop(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push(c);
        }
        _ => {}
    }
}

fn switch_screen(app: &mut App, store: &Store, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Welcome => {}
        Screen::Record => app.refresh_expenses(store),
        Screen::Analysis => app.refresh_analysis(store),
    }
    app.set_status(format!("{screen}"));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("expenses.db"));
        store.ensure_ready().unwrap();
        (dir, store)
    }

    fn press(app: &mut App, store: &Store, code: KeyCode) {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, store).unwrap();
    }

    fn type_str(app: &mut App, store: &Store, s: &str) {
        for c in s.chars() {
            press(app, store, KeyCode::Char(c));
        }
    }

    // ── Navigation ───────────────────────────────────────────

    #[test]
    fn test_enter_on_welcome_opens_record() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Record);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_number_keys_and_tab_cycle() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Char('3'));
        assert_eq!(app.screen, Screen::Analysis);
        press(&mut app, &store, KeyCode::Tab);
        assert_eq!(app.screen, Screen::Welcome);
        press(&mut app, &store, KeyCode::BackTab);
        assert_eq!(app.screen, Screen::Analysis);
        press(&mut app, &store, KeyCode::Char('2'));
        assert_eq!(app.screen, Screen::Record);
    }

    #[test]
    fn test_ctrl_q_quits_from_any_mode() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        app.input_mode = InputMode::Editing;
        handle_key(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            &mut app,
            &store,
        )
        .unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, &store, KeyCode::Char('3'));
        assert!(!app.show_help);
        assert_eq!(app.screen, Screen::Welcome);
    }

    // ── Command mode ─────────────────────────────────────────

    #[test]
    fn test_command_mode_runs_command() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Char(':'));
        assert_eq!(app.input_mode, InputMode::Command);
        type_str(&mut app, &store, "add 4.20 Coffee");
        press(&mut app, &store, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(app.status_message, "Expense added successfully");
    }

    #[test]
    fn test_backspace_on_empty_command_leaves_mode() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Char(':'));
        type_str(&mut app, &store, "q");
        press(&mut app, &store, KeyCode::Backspace);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.running);
    }

    // ── Form editing ─────────────────────────────────────────

    #[test]
    fn test_form_entry_saves_expense() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        press(&mut app, &store, KeyCode::Char('2'));
        press(&mut app, &store, KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::Editing);

        type_str(&mut app, &store, "Lunch");
        press(&mut app, &store, KeyCode::Tab);
        type_str(&mut app, &store, "12.50");
        press(&mut app, &store, KeyCode::Down);
        type_str(&mut app, &store, "Food");
        press(&mut app, &store, KeyCode::Enter);

        assert_eq!(app.status_message, "Expense added successfully");
        let all = store.query_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, Some(dec!(12.50)));
        assert_eq!(all[0].description.as_deref(), Some("Lunch"));
        assert_eq!(app.expenses.len(), 1);
    }

    #[test]
    fn test_typing_q_while_editing_does_not_quit() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        app.screen = Screen::Record;
        app.input_mode = InputMode::Editing;
        type_str(&mut app, &store, "q1:?");
        assert!(app.running);
        assert!(!app.show_help);
        assert_eq!(app.screen, Screen::Record);
        assert_eq!(app.form.value(crate::ui::form::FormField::Title), "q1:?");
    }

    #[test]
    fn test_esc_leaves_form_and_keeps_input() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        app.screen = Screen::Record;
        app.input_mode = InputMode::Editing;
        type_str(&mut app, &store, "Taxi");
        press(&mut app, &store, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status_message, "Edit cancelled");
        assert_eq!(app.form.value(crate::ui::form::FormField::Title), "Taxi");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_incomplete_form_reports_missing_fields() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        app.screen = Screen::Record;
        app.input_mode = InputMode::Editing;
        type_str(&mut app, &store, "Taxi");
        press(&mut app, &store, KeyCode::Enter);

        assert_eq!(
            app.status_message,
            "Please fill in all required fields (Title, price, category)."
        );
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    // ── Scrolling ────────────────────────────────────────────

    #[test]
    fn test_cursor_moves_over_expenses() {
        let (_dir, store) = temp_store();
        let mut app = App::new();
        for i in 1..=3 {
            press(&mut app, &store, KeyCode::Char(':'));
            type_str(&mut app, &store, &format!("add {i} Misc"));
            press(&mut app, &store, KeyCode::Enter);
        }
        press(&mut app, &store, KeyCode::Char('2'));
        press(&mut app, &store, KeyCode::Char('G'));
        assert_eq!(app.cursor.index, 2);
        press(&mut app, &store, KeyCode::Char('k'));
        assert_eq!(app.cursor.index, 1);
        press(&mut app, &store, KeyCode::Char('g'));
        assert_eq!(app.cursor.index, 0);
    }
}

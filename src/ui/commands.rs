use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use crate::db::Store;
use crate::models::{now_timestamp, parse_amount, NewExpense};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("w", "Go to Welcome", cmd_welcome, r);
    register_command!("welcome", "Go to Welcome", cmd_welcome, r);
    register_command!("r", "Go to Add Expense", cmd_record, r);
    register_command!("record", "Go to Add Expense", cmd_record, r);
    register_command!("a", "Go to View Analysis", cmd_analysis, r);
    register_command!("analysis", "Go to View Analysis", cmd_analysis, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 12.50 Food lunch with Sam)",
        cmd_add,
        r
    );
    register_command!("edit", "Edit the expense form", cmd_edit, r);
    register_command!("refresh", "Reload expenses from disk", cmd_refresh, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let (cmd_name, args) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let args = args.trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> &'static str {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .copied()
        .unwrap_or("help")
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_welcome(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Welcome;
    Ok(())
}

fn cmd_record(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Record;
    app.refresh_expenses(store);
    Ok(())
}

fn cmd_analysis(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Analysis;
    app.refresh_analysis(store);
    Ok(())
}

fn cmd_edit(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    cmd_record("", app, store)?;
    app.input_mode = InputMode::Editing;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.refresh_all(store);
    app.set_status(format!("Loaded {} expenses", app.expense_count));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add <amount> <category> [description...]`, dated now.
fn cmd_add(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <amount> <category> [description]";

    let (amount_str, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let rest = rest.trim_start();
    let (category, description) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if amount_str.is_empty() || category.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }
    let Some(amount) = parse_amount(amount_str) else {
        app.set_status(format!("Invalid amount: {amount_str}. {USAGE}"));
        return Ok(());
    };

    let mut expense = NewExpense::new(amount, category.to_string(), now_timestamp());
    let description = description.trim();
    if !description.is_empty() {
        expense = expense.with_description(description);
    }
    app.add_expense(store, &expense);
    Ok(())
}

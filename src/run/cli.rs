use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::analysis::Analyzer;
use crate::db::Store;
use crate::models::{is_valid_timestamp, now_timestamp, parse_amount, NewExpense, DATE_FORMAT};
use crate::ui::util::{format_amount, format_cell_amount, truncate};

/// Run a one-shot command. `args[0]` is the program name, `args[1]` the
/// command.
pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(args, store, &mut out)
}

fn run_command(args: &[String], store: &Store, out: &mut impl Write) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "add" => cli_add(rest, store, out),
        "list" | "ls" => cli_list(rest, store, out),
        "summary" | "s" => cli_summary(store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "expense-tracker {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(out, "expense-tracker - record expenses and see where the money goes")?;
    writeln!(out)?;
    writeln!(out, "Usage: expense-tracker [--db PATH] [--log PATH] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                          Launch interactive TUI")?;
    writeln!(out, "  add <amount> <category> [desc]  Record one expense")?;
    writeln!(out, "    --date \"YYYY-MM-DD HH:MM:SS\"  When it happened (default: now)")?;
    writeln!(out, "  list                            Print all expenses, newest first")?;
    writeln!(out, "    --limit <N>                   Only the newest N")?;
    writeln!(out, "  summary, s                      Total balance and category totals")?;
    writeln!(out, "  --help, -h                      Show this help")?;
    writeln!(out, "  --version, -V                   Show version")?;
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "  --db <path>                     Database file (default: data/expenses.db)")?;
    writeln!(out, "  --log <path>                    Log file (default: app.log)")?;
    Ok(())
}

/// Split `--name value` pairs out of `args`, returning the value and the
/// remaining positional arguments.
fn take_flag<'a>(args: &'a [String], name: &str) -> Result<(Option<&'a str>, Vec<&'a str>)> {
    let mut value = None;
    let mut positional = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == name {
            let v = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("{name} requires a value"))?;
            value = Some(v.as_str());
        } else {
            positional.push(arg.as_str());
        }
    }
    Ok((value, positional))
}

fn cli_add(args: &[String], store: &Store, out: &mut impl Write) -> Result<()> {
    const USAGE: &str = "Usage: expense-tracker add <amount> <category> [description] [--date \"YYYY-MM-DD HH:MM:SS\"]";

    let (date, positional) = take_flag(args, "--date")?;
    let [amount, category, description @ ..] = positional.as_slice() else {
        anyhow::bail!(USAGE);
    };
    let amount = parse_amount(amount).with_context(|| format!("Invalid amount: {amount}"))?;

    let date = match date {
        Some(d) if is_valid_timestamp(d) => d.to_string(),
        Some(d) => anyhow::bail!("Invalid date: {d} (expected {DATE_FORMAT})"),
        None => now_timestamp(),
    };

    let mut expense = NewExpense::new(amount, category.to_string(), date);
    let description = description.join(" ");
    if !description.trim().is_empty() {
        expense = expense.with_description(description.trim());
    }

    let id = store.insert(&expense)?;
    writeln!(
        out,
        "Added expense #{id}: {} {} on {}",
        format_amount(expense.amount),
        expense.category,
        expense.date
    )?;
    // The expense is already stored, so a failed total is reported, not returned
    match Analyzer::new(store).category_totals() {
        Ok(totals) => {
            if let Some(total) = totals.get(&expense.category) {
                writeln!(out, "{} total: {}", expense.category, format_amount(total))?;
            }
        }
        Err(e) => writeln!(out, "{} total unavailable: {e}", expense.category)?,
    }
    Ok(())
}

fn cli_list(args: &[String], store: &Store, out: &mut impl Write) -> Result<()> {
    let (limit, _) = take_flag(args, "--limit")?;
    let limit = match limit {
        Some(n) => n
            .parse::<usize>()
            .with_context(|| format!("Invalid limit: {n}"))?,
        None => usize::MAX,
    };

    let table = Analyzer::new(store).tabulate()?;
    if table.is_empty() {
        writeln!(out, "No expenses recorded yet.")?;
        return Ok(());
    }

    let [id, amount, category, date, description] = table.columns() else {
        anyhow::bail!("unexpected expense columns");
    };
    writeln!(
        out,
        "{id:>5}  {amount:>12}  {category:<16}  {date:<19}  {description}"
    )?;
    writeln!(out, "{}", "─".repeat(80))?;
    for row in table.rows().iter().take(limit) {
        writeln!(
            out,
            "{:>5}  {:>12}  {:<16}  {:<19}  {}",
            row.id,
            format_cell_amount(row.amount),
            truncate(&row.category, 16),
            row.date,
            row.description_or_empty(),
        )?;
    }
    let shown = table.len().min(limit);
    writeln!(out, "{}", "─".repeat(80))?;
    writeln!(out, "{shown} of {} expenses", table.len())?;
    Ok(())
}

fn cli_summary(store: &Store, out: &mut impl Write) -> Result<()> {
    let analyzer = Analyzer::new(store);
    let balance = analyzer.total_balance()?;
    let totals = analyzer.category_totals()?;

    writeln!(out, "Expense summary")?;
    writeln!(out, "{}", "─".repeat(44))?;
    writeln!(out, "  Total balance: {}", format_amount(balance))?;

    if totals.is_empty() {
        writeln!(out)?;
        writeln!(out, "No expenses recorded yet.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "By category:")?;
    for share in totals.shares() {
        writeln!(
            out,
            "  {:<20} {:>12} {:>6.1}%",
            truncate(&share.category, 20),
            format_amount(share.total),
            share.percent
        )?;
    }
    Ok(())
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

    fn run(store: &Store, args: &[&str]) -> Result<String> {
        let mut full = vec!["expense-tracker".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        let mut out = Vec::new();
        run_command(&full, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // ── add ──────────────────────────────────────────────────

    #[test]
    fn test_add_with_date_and_description() {
        let (_dir, store) = temp_store();
        let out = run(
            &store,
            &["add", "12.5", "Food", "lunch", "with", "Sam", "--date", "2025-03-01 12:30:00"],
        )
        .unwrap();
        assert_eq!(
            out,
            "Added expense #1: 12.50 Food on 2025-03-01 12:30:00\nFood total: 12.50\n"
        );

        let all = store.query_all().unwrap();
        assert_eq!(all[0].amount, Some(dec!(12.5)));
        assert_eq!(all[0].date, "2025-03-01 12:30:00");
        assert_eq!(all[0].description.as_deref(), Some("lunch with Sam"));
    }

    #[test]
    fn test_add_defaults_to_now_without_description() {
        let (_dir, store) = temp_store();
        run(&store, &["add", "3", "Coffee"]).unwrap();
        let out = run(&store, &["add", "1.5", "Coffee"]).unwrap();
        assert!(out.ends_with("Coffee total: 4.50\n"));
        let all = store.query_all().unwrap();
        assert!(is_valid_timestamp(&all[0].date));
        assert!(all.iter().all(|e| e.description.is_none()));
    }

    #[test]
    fn test_add_rejects_bad_arguments() {
        let (_dir, store) = temp_store();
        assert!(run(&store, &["add", "3"]).is_err());
        assert!(run(&store, &["add", "three", "Coffee"]).is_err());
        assert!(run(&store, &["add", "3", "Coffee", "--date", "yesterday"]).is_err());
        assert!(run(&store, &["add", "3", "Coffee", "--date"]).is_err());
        assert_eq!(store.count().unwrap(), 0);
    }

    // ── list ─────────────────────────────────────────────────

    #[test]
    fn test_list_newest_first_with_limit() {
        let (_dir, store) = temp_store();
        run(&store, &["add", "1", "A", "--date", "2025-01-01 00:00:00"]).unwrap();
        run(&store, &["add", "2", "B", "--date", "2025-03-01 00:00:00"]).unwrap();
        run(&store, &["add", "3", "C", "--date", "2025-02-01 00:00:00"]).unwrap();

        let out = run(&store, &["list"]).unwrap();
        let b = out.find("2025-03-01").unwrap();
        let c = out.find("2025-02-01").unwrap();
        let a = out.find("2025-01-01").unwrap();
        assert!(b < c && c < a);
        assert!(out.contains("3 of 3 expenses"));

        let out = run(&store, &["list", "--limit", "1"]).unwrap();
        assert!(out.contains("2025-03-01"));
        assert!(!out.contains("2025-01-01"));
        assert!(out.contains("1 of 3 expenses"));
    }

    #[test]
    fn test_list_empty_and_bad_limit() {
        let (_dir, store) = temp_store();
        assert_eq!(run(&store, &["list"]).unwrap(), "No expenses recorded yet.\n");
        assert!(run(&store, &["list", "--limit", "ten"]).is_err());
    }

    // ── summary ──────────────────────────────────────────────

    #[test]
    fn test_summary_totals() {
        let (_dir, store) = temp_store();
        run(&store, &["add", "10", "Food"]).unwrap();
        run(&store, &["add", "20", "Food"]).unwrap();
        run(&store, &["add", "10", "Transport"]).unwrap();

        let out = run(&store, &["s"]).unwrap();
        assert!(out.contains("Total balance: 40.00"));
        let food = out.lines().find(|l| l.contains("Food")).unwrap();
        assert!(food.contains("30.00"));
        assert!(food.contains("75.0%"));
        let transport = out.lines().find(|l| l.contains("Transport")).unwrap();
        assert!(transport.contains("25.0%"));
    }

    #[test]
    fn test_summary_empty() {
        let (_dir, store) = temp_store();
        let out = run(&store, &["summary"]).unwrap();
        assert!(out.contains("Total balance: 0.00"));
        assert!(out.contains("No expenses recorded yet."));
    }

    #[test]
    fn test_overflowing_totals_are_reported() {
        let (_dir, store) = temp_store();
        let huge = "70000000000000000000000000000";
        run(&store, &["add", huge, "Food"]).unwrap();
        let out = run(&store, &["add", huge, "Food"]).unwrap();
        assert!(out.contains("Food total unavailable: total for Food is too large to compute"));
        assert_eq!(store.count().unwrap(), 2);

        let err = run(&store, &["summary"]).unwrap_err();
        assert!(err.to_string().contains("too large to compute"));
    }

    // ── misc ─────────────────────────────────────────────────

    #[test]
    fn test_help_version_and_unknown() {
        let (_dir, store) = temp_store();
        assert!(run(&store, &["--help"]).unwrap().contains("Usage: expense-tracker"));
        assert!(run(&store, &["-V"])
            .unwrap()
            .starts_with("expense-tracker "));
        assert!(run(&store, &["frobnicate"]).is_err());
    }
}

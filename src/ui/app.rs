use rust_decimal::Decimal;

use crate::analysis::{Analyzer, CategoryTotals};
use crate::db::Store;
use crate::models::{now_timestamp, ExpenseRecord, NewExpense};
use crate::ui::form::ExpenseForm;
use crate::ui::util::ListCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Welcome,
    Record,
    Analysis,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Welcome, Self::Record, Self::Analysis]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "Welcome"),
            Self::Record => write!(f, "Add Expense"),
            Self::Analysis => write!(f, "View Analysis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Record screen
    pub(crate) form: ExpenseForm,
    pub(crate) expenses: Vec<ExpenseRecord>,
    pub(crate) cursor: ListCursor,
    pub(crate) expense_count: i64,

    // Analysis screen
    pub(crate) total_balance: Decimal,
    pub(crate) category_totals: CategoryTotals,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Welcome,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            form: ExpenseForm::default(),
            expenses: Vec::new(),
            cursor: ListCursor::default(),
            expense_count: 0,

            total_balance: Decimal::ZERO,
            category_totals: CategoryTotals::default(),

            visible_rows: 15,
        }
    }

    /// Reload the expense table. A storage error leaves the previous rows in
    /// place and is reported on the status bar.
    pub(crate) fn refresh_expenses(&mut self, store: &Store) {
        match Analyzer::new(store).tabulate() {
            Ok(table) => {
                self.expenses = table.into_rows();
                self.expense_count = self.expenses.len() as i64;
                self.cursor.clamp(self.expenses.len());
            }
            Err(e) => self.set_status(format!("Could not load expenses: {e}")),
        }
    }

    pub(crate) fn refresh_analysis(&mut self, store: &Store) {
        let analyzer = Analyzer::new(store);
        match (analyzer.total_balance(), analyzer.category_totals()) {
            (Ok(balance), Ok(totals)) => {
                self.total_balance = balance;
                self.category_totals = totals;
            }
            (Err(e), _) | (_, Err(e)) => {
                self.total_balance = Decimal::ZERO;
                self.category_totals = CategoryTotals::default();
                self.set_status(format!("Could not analyze expenses: {e}"));
            }
        }
        match store.count() {
            Ok(count) => self.expense_count = count,
            Err(e) => self.set_status(format!("Could not count expenses: {e}")),
        }
    }

    pub(crate) fn refresh_all(&mut self, store: &Store) {
        self.refresh_expenses(store);
        self.refresh_analysis(store);
    }

    /// Validate the form, stamp it with the current time and store it.
    pub(crate) fn submit_form(&mut self, store: &Store) -> bool {
        self.submit_form_at(store, now_timestamp())
    }

    pub(crate) fn submit_form_at(&mut self, store: &Store, date: String) -> bool {
        match self.form.to_expense(date) {
            Ok(expense) => {
                let added = self.add_expense(store, &expense);
                if added {
                    self.form.clear();
                }
                added
            }
            Err(e) => {
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Insert `expense` and refresh every view. Returns whether the write
    /// succeeded; either way the outcome is on the status bar.
    pub(crate) fn add_expense(&mut self, store: &Store, expense: &NewExpense) -> bool {
        match store.insert(expense) {
            Ok(_) => {
                self.refresh_all(store);
                self.set_status("Expense added successfully");
                true
            }
            Err(_) => {
                self.set_status("Failed to add expense. Please try again.");
                false
            }
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

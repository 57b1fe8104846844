pub(crate) const TABLE: &str = "expenses";

pub(crate) const CREATE_EXPENSES: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    amount      REAL NOT NULL,
    category    TEXT NOT NULL,
    date        TEXT NOT NULL,
    description TEXT
);
"#;

pub(crate) const INSERT_EXPENSE: &str =
    "INSERT INTO expenses (amount, category, date, description) VALUES (?1, ?2, ?3, ?4)";

/// Newest first. `id` breaks ties between identical timestamps.
pub(crate) const SELECT_ALL_EXPENSES: &str =
    "SELECT id, amount, category, date, description FROM expenses ORDER BY date DESC, id DESC";

pub(crate) const COUNT_EXPENSES: &str = "SELECT COUNT(*) FROM expenses";

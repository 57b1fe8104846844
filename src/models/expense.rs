use rust_decimal::Decimal;

/// Timestamp layout for `date`. Zero-padded, so lexicographic order is
/// chronological order.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the `expenses` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: i64,
    /// `None` when the stored value could not be read as a number.
    pub amount: Option<Decimal>,
    pub category: String,
    pub date: String,
    pub description: Option<String>,
}

impl ExpenseRecord {
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Payload for a new row. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(amount: Decimal, category: String, date: String) -> Self {
        Self {
            amount,
            category,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Current local time formatted with [`DATE_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// Returns true if `s` is a valid `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn is_valid_timestamp(s: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(s, DATE_FORMAT).is_ok()
}

/// Parse user or stored text as an amount. Accepts plain decimals
/// ("12.50", "-3") and scientific notation ("1e3").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

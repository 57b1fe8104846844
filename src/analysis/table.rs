use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::AnalysisError;
use crate::models::ExpenseRecord;

/// Column labels of the tabulated view, in order.
pub(crate) const COLUMNS: [&str; 5] = ["id", "amount", "category", "date", "description"];

/// All expense rows, in the order the store returned them (newest first).
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseTable {
    rows: Vec<ExpenseRecord>,
}

impl ExpenseTable {
    pub(crate) fn new(rows: Vec<ExpenseRecord>) -> Self {
        Self { rows }
    }

    pub(crate) fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub(crate) fn rows(&self) -> &[ExpenseRecord] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<ExpenseRecord> {
        self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `amount` column; `None` marks a value that was not numeric.
    pub(crate) fn amounts(&self) -> impl Iterator<Item = Option<Decimal>> + '_ {
        self.rows.iter().map(|r| r.amount)
    }

    /// Number of rows whose amount could not be coerced.
    pub(crate) fn missing_amounts(&self) -> usize {
        self.amounts().filter(Option::is_none).count()
    }

    /// Sum of every numeric amount. Missing amounts are skipped.
    pub(crate) fn sum_amount(&self) -> Result<Decimal, AnalysisError> {
        self.amounts()
            .flatten()
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .ok_or_else(|| AnalysisError::Overflow("all expenses".into()))
    }

    /// Group rows by category and sum each group's numeric amounts.
    ///
    /// A category is listed even if none of its amounts are numeric; its
    /// total is then zero.
    pub(crate) fn totals_by_category(&self) -> Result<CategoryTotals, AnalysisError> {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in &self.rows {
            let entry = totals.entry(row.category.clone()).or_default();
            if let Some(amount) = row.amount {
                *entry = entry
                    .checked_add(amount)
                    .ok_or_else(|| AnalysisError::Overflow(row.category.clone()))?;
            }
        }
        Ok(CategoryTotals(totals))
    }
}

/// Category label to summed amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryTotals(BTreeMap<String, Decimal>);

/// One slice of the per-category chart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    /// Share of the absolute grand total, 0–100.
    pub(crate) percent: f64,
}

impl CategoryTotals {
    pub(crate) fn get(&self, category: &str) -> Option<Decimal> {
        self.0.get(category).copied()
    }

    /// Alphabetical by category.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all categories; `None` if it does not fit in a `Decimal`.
    pub(crate) fn total(&self) -> Option<Decimal> {
        self.0
            .values()
            .copied()
            .try_fold(Decimal::ZERO, Decimal::checked_add)
    }

    /// Largest total first; equal totals keep alphabetical order.
    pub(crate) fn ranked(&self) -> Vec<(&str, Decimal)> {
        let mut ranked: Vec<(&str, Decimal)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Ranked categories with their percentage of the absolute total.
    /// Signs are ignored so refunds still get a visible slice. Computed in
    /// `f64`, which cannot overflow for any set of `Decimal` totals.
    pub(crate) fn shares(&self) -> Vec<CategoryShare> {
        let magnitude = |v: Decimal| v.abs().to_f64().unwrap_or(0.0);
        let grand: f64 = self.0.values().copied().map(magnitude).sum();
        self.ranked()
            .into_iter()
            .map(|(category, total)| {
                let percent = if grand > 0.0 {
                    magnitude(total) * 100.0 / grand
                } else {
                    0.0
                };
                CategoryShare {
                    category: category.to_string(),
                    total,
                    percent,
                }
            })
            .collect()
    }
}

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_plain_amounts() {
    assert_eq!(parse_amount("25"), Some(dec!(25)));
    assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
    assert_eq!(parse_amount("-4.25"), Some(dec!(-4.25)));
}

#[test]
fn test_parse_amount_trims_whitespace() {
    assert_eq!(parse_amount("  7.5 "), Some(dec!(7.5)));
}

#[test]
fn test_parse_scientific_amount() {
    assert_eq!(parse_amount("1e3"), Some(dec!(1000)));
}

#[test]
fn test_parse_amount_rejects_garbage() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("12,50"), None);
}

// ── Timestamps ────────────────────────────────────────────────

#[test]
fn test_valid_timestamp() {
    assert!(is_valid_timestamp("2025-01-01 12:00:00"));
    assert!(is_valid_timestamp("2024-02-29 23:59:59"));
}

#[test]
fn test_invalid_timestamps() {
    assert!(!is_valid_timestamp("2025-01-01"));
    assert!(!is_valid_timestamp("2023-02-29 12:00:00"));
    assert!(!is_valid_timestamp("yesterday"));
}

#[test]
fn test_now_timestamp_is_valid() {
    let now = now_timestamp();
    assert!(is_valid_timestamp(&now));
    assert_eq!(now.len(), 19);
}

// ── NewExpense ────────────────────────────────────────────────

#[test]
fn test_new_expense_builder() {
    let expense = NewExpense::new(dec!(9.99), "Food".into(), "2025-01-01 08:00:00".into())
        .with_description("breakfast");
    assert_eq!(expense.description.as_deref(), Some("breakfast"));
    assert_eq!(expense.amount, dec!(9.99));
}

#[test]
fn test_description_or_empty() {
    let record = ExpenseRecord {
        id: 1,
        amount: Some(dec!(1)),
        category: "Misc".into(),
        date: "2025-01-01 00:00:00".into(),
        description: None,
    };
    assert_eq!(record.description_or_empty(), "");
}

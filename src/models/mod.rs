mod expense;

pub use expense::{
    is_valid_timestamp, now_timestamp, parse_amount, ExpenseRecord, NewExpense, DATE_FORMAT,
};

#[cfg(test)]
mod tests;

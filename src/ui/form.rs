use crate::models::{parse_amount, NewExpense};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Title,
    Price,
    Category,
    Memo,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Title, Self::Price, Self::Category, Self::Memo]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Category => "Category",
            Self::Memo => "Memo",
        }
    }

    pub(crate) fn is_required(&self) -> bool {
        !matches!(self, Self::Memo)
    }

    fn next(self) -> Self {
        match self {
            Self::Title => Self::Price,
            Self::Price => Self::Category,
            Self::Category => Self::Memo,
            Self::Memo => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Memo,
            Self::Price => Self::Title,
            Self::Category => Self::Price,
            Self::Memo => Self::Category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum FormError {
    #[error("Please fill in all required fields (Title, price, category).")]
    MissingRequired,
    #[error("Price must be a valid number.")]
    InvalidPrice,
}

/// The "Expense Record" entry form.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseForm {
    title: String,
    price: String,
    category: String,
    memo: String,
    focus: FormField,
}

impl ExpenseForm {
    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Price => &self.price,
            FormField::Category => &self.category,
            FormField::Memo => &self.memo,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Price => &mut self.price,
            FormField::Category => &mut self.category,
            FormField::Memo => &mut self.memo,
        }
    }

    pub(crate) fn focus(&self) -> FormField {
        self.focus
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub(crate) fn push(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
    }

    pub(crate) fn pop(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the form and build the record to insert.
    ///
    /// The stored description is `"<title> | <memo>"`, or just the title
    /// when there is no memo.
    pub(crate) fn to_expense(&self, date: String) -> Result<NewExpense, FormError> {
        let title = self.title.trim();
        let price = self.price.trim();
        let category = self.category.trim();
        let memo = self.memo.trim();

        if title.is_empty() || price.is_empty() || category.is_empty() {
            return Err(FormError::MissingRequired);
        }
        let amount = parse_amount(price).ok_or(FormError::InvalidPrice)?;

        let description = if memo.is_empty() {
            title.to_string()
        } else {
            format!("{title} | {memo}")
        };

        Ok(NewExpense::new(amount, category.to_string(), date).with_description(description))
    }
}

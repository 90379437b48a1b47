use chrono::Local;
use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key of an expense.
pub type ExpenseId = i64;

/// Format used for every stored and filtered date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted expense. Records are immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

/// An expense that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl NewExpense {
    /// Create an expense dated today in the local time zone.
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            date: today(),
            category: category.into(),
            subcategory: None,
            note: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Inclusive date bounds. Comparison is lexicographic on `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Blank bounds are treated as open.
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start: non_blank(start),
            end: non_blank(end),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

/// Default number of rows returned by a listing.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Filter for listing expenses. All set fields must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub range: DateRange,
    pub limit: u32,
}

impl ExpenseFilter {
    /// A blank category matches every expense.
    pub fn new(category: Option<String>, range: DateRange, limit: u32) -> Self {
        Self {
            category: non_blank(category),
            range,
            limit,
        }
    }
}

impl Default for ExpenseFilter {
    fn default() -> Self {
        Self {
            category: None,
            range: DateRange::all(),
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Drop optional text arguments that are empty or whitespace only.
///
/// Clients commonly send `""` for an optional string they did not fill in.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Today's date in the server's local time zone.
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_expense_defaults_to_today() {
        let expense = NewExpense::new(12.5, "Food");
        assert!(NaiveDate::parse_from_str(&expense.date, DATE_FORMAT).is_ok());
        assert_eq!(expense.subcategory, None);
        assert_eq!(expense.note, None);
    }

    #[test]
    fn test_builder_keeps_empty_subcategory_distinct() {
        let expense = NewExpense::new(1.0, "Food").with_subcategory("");
        assert_eq!(expense.subcategory, Some(String::new()));
    }

    #[test]
    fn test_default_filter() {
        let filter = ExpenseFilter::default();
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.category, None);
        assert_eq!(filter.range, DateRange::all());
    }

    #[test]
    fn test_blank_date_bounds_are_open() {
        let range = DateRange::new(Some(String::new()), Some("  ".to_string()));
        assert_eq!(range, DateRange::all());

        let range = DateRange::new(Some("2024-01-01".to_string()), Some(String::new()));
        assert_eq!(range.start.as_deref(), Some("2024-01-01"));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_blank_category_filter_matches_everything() {
        let filter = ExpenseFilter::new(Some(String::new()), DateRange::all(), 5);
        assert_eq!(filter.category, None);
        assert_eq!(filter.limit, 5);

        let filter = ExpenseFilter::new(Some("Food".to_string()), DateRange::all(), 5);
        assert_eq!(filter.category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" ".to_string())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
    }
}

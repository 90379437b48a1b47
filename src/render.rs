//! Plain-text presentation of operation results.
//!
//! Every surface (MCP tools, MCP resources, CLI) prints exactly these strings,
//! so callers see the same output whichever way they reach the service.

use crate::application::{AppError, LifetimeSummary, SpendingSummary};
use crate::domain::{format_amount, CategoryHierarchy, ExpenseRecord};

pub const NO_EXPENSES: &str = "No expenses found matching the criteria.";
pub const NO_SUMMARY_DATA: &str = "No data recorded for the selected period.";
pub const NO_CATEGORIES: &str = "No categories configured.";

const NOT_AVAILABLE: &str = "N/A";

/// Confirmation for a freshly added expense.
pub fn added_expense(expense: &ExpenseRecord) -> String {
    format!(
        "Successfully added expense ID {}: {} ({}) - {} on {}",
        expense.id,
        expense.category,
        expense.subcategory.as_deref().unwrap_or(NOT_AVAILABLE),
        format_amount(expense.amount),
        expense.date
    )
}

/// Error text for a rejected or failed add.
pub fn add_expense_error(err: &AppError) -> String {
    match err {
        AppError::InvalidAmount(_) => format!("Error: {err}"),
        other => format!("Error: Failed to save expense to database: {}", other.cause()),
    }
}

/// Fixed-width table of expenses, or the "no results" message.
pub fn expense_table(expenses: &[ExpenseRecord]) -> String {
    if expenses.is_empty() {
        return NO_EXPENSES.to_string();
    }

    let mut lines = Vec::with_capacity(expenses.len() + 2);
    lines.push(format!(
        "{:<4} | {:<10} | {:<12} | {:<12} | {:<8} | {}",
        "ID", "Date", "Category", "Subcategory", "Amount", "Note"
    ));
    lines.push("-".repeat(80));

    for expense in expenses {
        lines.push(format!(
            "{:<4} | {:<10} | {:<12} | {:<12} | ${:<7.2} | {}",
            expense.id,
            expense.date,
            expense.category,
            expense.subcategory.as_deref().unwrap_or(NOT_AVAILABLE),
            expense.amount,
            expense.note.as_deref().unwrap_or("")
        ));
    }

    lines.join("\n")
}

/// Category/subcategory spending report, or the "no data" message.
pub fn spending_summary(summary: &SpendingSummary) -> String {
    if summary.is_empty() {
        return NO_SUMMARY_DATA.to_string();
    }

    let mut lines = vec![
        format!(
            "Expense Summary Report ({} to {})",
            summary.range.start.as_deref().unwrap_or("Beginning"),
            summary.range.end.as_deref().unwrap_or("Now")
        ),
        format!("TOTAL SPEND: {}", format_amount(summary.total)),
        "-".repeat(40),
    ];

    for category in &summary.categories {
        lines.push(format!(
            "\n[{}] - Total: {} ({} entries)",
            category.category.to_uppercase(),
            format_amount(category.total),
            category.count
        ));
        for sub in &category.subcategories {
            lines.push(format!("  └─ {}: {}", sub.name, format_amount(sub.total)));
        }
    }

    lines.join("\n")
}

pub fn summary_error(err: &AppError) -> String {
    format!("Error gathering summary: {}", err.cause())
}

/// Alphabetical outline of the category hierarchy.
pub fn category_outline(hierarchy: Option<&CategoryHierarchy>) -> String {
    let Some(hierarchy) = hierarchy.filter(|h| !h.is_empty()) else {
        return NO_CATEGORIES.to_string();
    };

    let mut lines = vec![
        "Full Expense Categories Hierarchy:".to_string(),
        "-".repeat(35),
    ];

    for (category, subcategories) in hierarchy.sorted() {
        lines.push(format!("\n{}", category.to_uppercase()));
        if subcategories.is_empty() {
            lines.push("  (No subcategories)".to_string());
        }
        for sub in subcategories {
            lines.push(format!("  └─ {sub}"));
        }
    }

    lines.join("\n")
}

pub fn lifetime_summary(summary: &LifetimeSummary) -> String {
    format!(
        "Database: {}\nTotal lifetime spend tracked: {}",
        summary.location,
        format_amount(summary.total)
    )
}

/// Generic error text used by the list and resource reads.
pub fn error(err: &AppError) -> String {
    format!("Error: {}", err.cause())
}

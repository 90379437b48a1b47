// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use spendlog::application::ExpenseService;
use spendlog::domain::{ExpenseRecord, NewExpense};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database.
/// The category hierarchy file path is inside the temp dir but not created.
pub async fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = ExpenseService::init(
        temp_dir.path().join("test.db"),
        temp_dir.path().join("categories.json"),
    )
    .await?;
    Ok((service, temp_dir))
}

/// Record an expense with a fixed date.
pub async fn add_on(
    service: &ExpenseService,
    date: &str,
    amount: f64,
    category: &str,
    subcategory: Option<&str>,
) -> Result<ExpenseRecord> {
    let mut expense = NewExpense::new(amount, category).with_date(date);
    if let Some(sub) = subcategory {
        expense = expense.with_subcategory(sub);
    }
    Ok(service.add_expense(expense).await?)
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use crate::application::SpendingGroup;
use crate::domain::{DateRange, ExpenseFilter, ExpenseId, ExpenseRecord, NewExpense};

use super::MIGRATION_001_EXPENSES;

/// Handle to the file-backed expense store.
///
/// Holds only the connection target; every operation opens its own
/// connection and closes it when done.
#[derive(Debug, Clone)]
pub struct Repository {
    options: SqliteConnectOptions,
    location: PathBuf,
}

impl Repository {
    /// Create a handle for the database file at `path`.
    /// The file is created on first connection if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let location = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&location)
            .create_if_missing(true);
        Self { options, location }
    }

    /// Where the database file lives.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Create the expenses table if it is missing. Safe to call repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query(MIGRATION_001_EXPENSES)
            .execute(&mut conn)
            .await
            .context("Failed to run migration 001")?;
        Self::close(conn).await
    }

    /// Initialize the store at `path` (create parent directories + migrate).
    pub async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self::new(path);
        if let Some(parent) = repo.location.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
        repo.migrate().await?;
        Ok(repo)
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .with_context(|| format!("Failed to open database {}", self.location.display()))
    }

    async fn close(conn: SqliteConnection) -> Result<()> {
        conn.close()
            .await
            .context("Failed to close database connection")
    }

    // ========================
    // Writes
    // ========================

    /// Insert a new expense and return the id the store assigned to it.
    pub async fn insert_expense(&self, expense: &NewExpense) -> Result<ExpenseId> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (amount, date, category, subcategory, note)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.date)
        .bind(&expense.category)
        .bind(&expense.subcategory)
        .bind(&expense.note)
        .execute(&mut conn)
        .await
        .context("Failed to save expense")?;

        let id = result.last_insert_rowid();
        Self::close(conn).await?;
        Ok(id)
    }

    // ========================
    // Reads
    // ========================

    /// List expenses matching the filter, newest date first and, within a
    /// date, most recently added first.
    pub async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<ExpenseRecord>> {
        let mut query = String::from(
            "SELECT id, amount, date, category, subcategory, note FROM expenses WHERE 1=1",
        );

        if filter.category.is_some() {
            query.push_str(" AND category = ?");
        }
        push_range_clause(&mut query, &filter.range);
        query.push_str(" ORDER BY date DESC, id DESC LIMIT ?");

        let mut sql_query = sqlx::query(&query);
        if let Some(category) = &filter.category {
            sql_query = sql_query.bind(category);
        }
        if let Some(start) = &filter.range.start {
            sql_query = sql_query.bind(start);
        }
        if let Some(end) = &filter.range.end {
            sql_query = sql_query.bind(end);
        }
        sql_query = sql_query.bind(i64::from(filter.limit));

        let mut conn = self.connect().await?;
        let rows = sql_query
            .fetch_all(&mut conn)
            .await
            .context("Failed to list expenses")?;
        Self::close(conn).await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Every expense in insertion order.
    pub async fn list_all_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            "SELECT id, amount, date, category, subcategory, note FROM expenses ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        .context("Failed to list all expenses")?;
        Self::close(conn).await?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Number of stored expenses.
    pub async fn count_expenses(&self) -> Result<i64> {
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query("SELECT COUNT(*) as count FROM expenses")
            .fetch_one(&mut conn)
            .await
            .context("Failed to count expenses")?
            .try_get("count")?;
        Self::close(conn).await?;
        Ok(count)
    }

    // ========================
    // Aggregates
    // ========================

    /// Sum of all amounts within the range (0 when nothing matches).
    pub async fn total_spent(&self, range: &DateRange) -> Result<f64> {
        let mut query =
            String::from("SELECT COALESCE(SUM(amount), 0.0) as total FROM expenses WHERE 1=1");
        push_range_clause(&mut query, range);

        let mut sql_query = sqlx::query(&query);
        if let Some(start) = &range.start {
            sql_query = sql_query.bind(start);
        }
        if let Some(end) = &range.end {
            sql_query = sql_query.bind(end);
        }

        let mut conn = self.connect().await?;
        let total: f64 = sql_query
            .fetch_one(&mut conn)
            .await
            .context("Failed to sum expenses")?
            .try_get("total")?;
        Self::close(conn).await?;
        Ok(total)
    }

    /// Sum and count per (category, subcategory) within the range, ordered by
    /// category and then by the group's sum, largest first.
    pub async fn spending_groups(&self, range: &DateRange) -> Result<Vec<SpendingGroup>> {
        let mut query = String::from(
            "SELECT category, subcategory, SUM(amount) as total, COUNT(*) as count FROM expenses WHERE 1=1",
        );
        push_range_clause(&mut query, range);
        query.push_str(" GROUP BY category, subcategory ORDER BY category, total DESC");

        let mut sql_query = sqlx::query(&query);
        if let Some(start) = &range.start {
            sql_query = sql_query.bind(start);
        }
        if let Some(end) = &range.end {
            sql_query = sql_query.bind(end);
        }

        let mut conn = self.connect().await?;
        let rows = sql_query
            .fetch_all(&mut conn)
            .await
            .context("Failed to group expenses")?;
        Self::close(conn).await?;

        rows.iter()
            .map(|row| -> Result<SpendingGroup> {
                Ok(SpendingGroup {
                    category: row.try_get("category")?,
                    subcategory: row.try_get("subcategory")?,
                    total: row.try_get("total")?,
                    count: row.try_get("count")?,
                })
            })
            .collect()
    }

    fn row_to_expense(row: &SqliteRow) -> Result<ExpenseRecord> {
        Ok(ExpenseRecord {
            id: row.try_get("id").context("Invalid expense id")?,
            amount: row.try_get("amount").context("Invalid expense amount")?,
            date: row.try_get("date").context("Invalid expense date")?,
            category: row.try_get("category")?,
            subcategory: row.try_get("subcategory")?,
            note: row.try_get("note")?,
        })
    }
}

/// Append the inclusive date bounds that are set, in start-then-end order.
fn push_range_clause(query: &mut String, range: &DateRange) {
    if range.start.is_some() {
        query.push_str(" AND date >= ?");
    }
    if range.end.is_some() {
        query.push_str(" AND date <= ?");
    }
}

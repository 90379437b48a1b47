use std::path::{Path, PathBuf};

use crate::domain::{
    is_valid_amount, CategoryHierarchy, DateRange, ExpenseFilter, ExpenseRecord, NewExpense,
};
use crate::storage::Repository;

use super::{group_by_category, AppError, LifetimeSummary, SpendingSummary};

/// Application service providing the expense operations.
/// This is the interface shared by the MCP server and the CLI.
pub struct ExpenseService {
    repo: Repository,
    categories_file: PathBuf,
}

impl ExpenseService {
    /// Create a new expense service with the given repository and category
    /// hierarchy file.
    pub fn new(repo: Repository, categories_file: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            categories_file: categories_file.into(),
        }
    }

    /// Initialize the store at the given path and build a service over it.
    pub async fn init(
        database_path: impl Into<PathBuf>,
        categories_file: impl Into<PathBuf>,
    ) -> Result<Self, AppError> {
        let repo = Repository::init(database_path).await?;
        Ok(Self::new(repo, categories_file))
    }

    /// Location of the backing database file.
    pub fn database_location(&self) -> &Path {
        self.repo.location()
    }

    /// Location of the category hierarchy file.
    pub fn categories_file(&self) -> &Path {
        &self.categories_file
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense.
    pub async fn add_expense(&self, expense: NewExpense) -> Result<ExpenseRecord, AppError> {
        if !is_valid_amount(expense.amount) {
            tracing::warn!(amount = expense.amount, "rejected expense with non-positive amount");
            return Err(AppError::InvalidAmount(expense.amount));
        }

        let id = self.repo.insert_expense(&expense).await.inspect_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to save expense");
        })?;

        tracing::info!(
            id,
            amount = expense.amount,
            category = %expense.category,
            "added expense"
        );

        Ok(ExpenseRecord {
            id,
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
            subcategory: expense.subcategory,
            note: expense.note,
        })
    }

    /// List expenses matching the filter, newest first.
    pub async fn list_expenses(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<Vec<ExpenseRecord>, AppError> {
        tracing::debug!(?filter, "listing expenses");
        let expenses = self.repo.list_expenses(filter).await.inspect_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to list expenses");
        })?;
        Ok(expenses)
    }

    /// List every expense in insertion order.
    pub async fn list_all_expenses(&self) -> Result<Vec<ExpenseRecord>, AppError> {
        Ok(self.repo.list_all_expenses().await?)
    }

    /// Number of recorded expenses.
    pub async fn count_expenses(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_expenses().await?)
    }

    // ========================
    // Reports
    // ========================

    /// Total and per category/subcategory spending within the range.
    pub async fn get_summary(&self, range: DateRange) -> Result<SpendingSummary, AppError> {
        tracing::debug!(?range, "building spending summary");

        let groups = self.repo.spending_groups(&range).await.inspect_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to group expenses");
        })?;
        if groups.is_empty() {
            return Ok(SpendingSummary {
                range,
                total: 0.0,
                categories: Vec::new(),
            });
        }

        let total = self.repo.total_spent(&range).await.inspect_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to sum expenses");
        })?;

        Ok(SpendingSummary {
            range,
            total,
            categories: group_by_category(groups),
        })
    }

    /// All-time spending and where it is stored.
    pub async fn lifetime_summary(&self) -> Result<LifetimeSummary, AppError> {
        let total = self.repo.total_spent(&DateRange::all()).await?;
        Ok(LifetimeSummary {
            location: self.repo.location().display().to_string(),
            total,
        })
    }

    // ========================
    // Category hierarchy
    // ========================

    /// Load the configured category hierarchy.
    /// Returns `None` when the hierarchy file does not exist.
    pub async fn categories(&self) -> Result<Option<CategoryHierarchy>, AppError> {
        let path = &self.categories_file;
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no category hierarchy file");
                return Ok(None);
            }
            Err(source) => {
                return Err(AppError::CategoriesUnreadable {
                    path: path.clone(),
                    source,
                });
            }
        };

        let hierarchy =
            CategoryHierarchy::from_json(&contents).map_err(|err| AppError::InvalidCategories {
                path: path.clone(),
                message: err.to_string(),
            })?;
        Ok(Some(hierarchy))
    }
}

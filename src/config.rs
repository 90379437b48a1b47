use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DATABASE_ENV: &str = "SPENDLOG_DB_PATH";

/// Environment variable overriding the category hierarchy file.
pub const CATEGORIES_ENV: &str = "SPENDLOG_CATEGORIES_FILE";

/// Default category hierarchy file, relative to the working directory.
pub const DEFAULT_CATEGORIES_FILE: &str = "data/categories.json";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file.
    pub database: PathBuf,
    /// JSON file mapping categories to subcategories.
    pub categories_file: PathBuf,
}

impl Config {
    /// Build a config from optional overrides, falling back to defaults.
    pub fn resolve(database: Option<PathBuf>, categories_file: Option<PathBuf>) -> Self {
        Self {
            database: database.unwrap_or_else(default_database_path),
            categories_file: categories_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATEGORIES_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// `{temp dir}/expense_tracker/expenses.db`, writable even on hosts where the
/// working directory is read-only.
pub fn default_database_path() -> PathBuf {
    std::env::temp_dir()
        .join("expense_tracker")
        .join("expenses.db")
}

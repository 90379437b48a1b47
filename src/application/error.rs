use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Amount must be a positive number.")]
    InvalidAmount(f64),

    #[error("Invalid category hierarchy in {}: {message}", .path.display())]
    InvalidCategories { path: PathBuf, message: String },

    #[error("Failed to read category hierarchy {}: {source}", .path.display())]
    CategoriesUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0:#}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// The underlying cause without the variant prefix, for error texts that
    /// add their own context.
    pub fn cause(&self) -> String {
        match self {
            AppError::Database(err) => format!("{err:#}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_message() {
        let err = AppError::InvalidAmount(-3.0);
        assert_eq!(err.to_string(), "Amount must be a positive number.");
        assert_eq!(err.cause(), "Amount must be a positive number.");
    }

    #[test]
    fn test_database_cause_includes_context_chain() {
        let err = AppError::from(
            anyhow::anyhow!("disk I/O error").context("Failed to save expense"),
        );
        assert_eq!(err.cause(), "Failed to save expense: disk I/O error");
        assert_eq!(
            err.to_string(),
            "Database error: Failed to save expense: disk I/O error"
        );
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::ExpenseService;
use crate::domain::ExpenseRecord;

/// Database snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<ExpenseRecord>,
}

/// Exporter for dumping every recorded expense
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export expenses to CSV format, in insertion order.
    /// Absent subcategories and notes are written as empty fields.
    pub async fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_all_expenses().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "category", "subcategory", "amount", "note"])?;

        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.clone(),
                expense.category.clone(),
                expense.subcategory.clone().unwrap_or_default(),
                format!("{:.2}", expense.amount),
                expense.note.clone().unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(expenses.len())
    }

    /// Export every expense as a JSON snapshot. Absent fields stay `null`.
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<ExpenseSnapshot> {
        let expenses = self.service.list_all_expenses().await?;

        let snapshot = ExpenseSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            expenses,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

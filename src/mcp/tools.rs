use std::sync::Arc;

use pmcp::{SimpleTool, ToolHandler};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ExpenseService;
use crate::domain::{DEFAULT_LIST_LIMIT, DateRange, ExpenseFilter, NewExpense, non_blank};
use crate::render;

#[derive(Debug, Deserialize)]
struct AddExpenseArgs {
    amount: f64,
    category: String,
    subcategory: Option<String>,
    note: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListExpensesArgs {
    category: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Deserialize)]
struct SummaryArgs {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// A tool result carrying one text block. Errors are flagged, not raised.
pub(crate) fn text_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> Result<T, Value> {
    // Clients may send `null` instead of `{}` for a call without arguments.
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|err| {
        tracing::warn!(tool, error = %err, "rejected tool arguments");
        text_result(format!("Error: invalid arguments for {tool}: {err}"), true)
    })
}

pub(crate) async fn add_expense(service: &ExpenseService, args: Value) -> Value {
    let args: AddExpenseArgs = match parse_args("add_expense", args) {
        Ok(args) => args,
        Err(result) => return result,
    };

    let mut expense = NewExpense::new(args.amount, args.category);
    if let Some(date) = non_blank(args.date) {
        expense = expense.with_date(date);
    }
    expense.subcategory = args.subcategory;
    expense.note = args.note;

    match service.add_expense(expense).await {
        Ok(record) => text_result(render::added_expense(&record), false),
        Err(err) => text_result(render::add_expense_error(&err), true),
    }
}

pub(crate) async fn list_expenses(service: &ExpenseService, args: Value) -> Value {
    let args: ListExpensesArgs = match parse_args("list_expenses", args) {
        Ok(args) => args,
        Err(result) => return result,
    };

    let filter = ExpenseFilter::new(
        args.category,
        DateRange::new(args.start_date, args.end_date),
        args.limit,
    );

    match service.list_expenses(&filter).await {
        Ok(expenses) => text_result(render::expense_table(&expenses), false),
        Err(err) => text_result(render::error(&err), true),
    }
}

pub(crate) async fn get_summary(service: &ExpenseService, args: Value) -> Value {
    let args: SummaryArgs = match parse_args("get_summary", args) {
        Ok(args) => args,
        Err(result) => return result,
    };

    match service
        .get_summary(DateRange::new(args.start_date, args.end_date))
        .await
    {
        Ok(summary) => text_result(render::spending_summary(&summary), false),
        Err(err) => text_result(render::summary_error(&err), true),
    }
}

/// Create the add_expense tool.
pub(super) fn add_expense_tool(service: Arc<ExpenseService>) -> impl ToolHandler {
    SimpleTool::new("add_expense", move |args: Value, _extra| {
        let service = service.clone();
        Box::pin(async move {
            tracing::debug!("add_expense called");
            Ok(add_expense(&service, args).await)
        })
    })
    .with_description(
        "Add a new expense. Amount must be positive. \
         The date defaults to today (YYYY-MM-DD) when omitted.",
    )
    .with_schema(add_expense_schema())
}

/// Create the list_expenses tool.
pub(super) fn list_expenses_tool(service: Arc<ExpenseService>) -> impl ToolHandler {
    SimpleTool::new("list_expenses", move |args: Value, _extra| {
        let service = service.clone();
        Box::pin(async move {
            tracing::debug!("list_expenses called");
            Ok(list_expenses(&service, args).await)
        })
    })
    .with_description(
        "List recent expenses, newest first, optionally filtered by exact category \
         and an inclusive date range.",
    )
    .with_schema(list_expenses_schema())
}

/// Create the get_summary tool.
pub(super) fn get_summary_tool(service: Arc<ExpenseService>) -> impl ToolHandler {
    SimpleTool::new("get_summary", move |args: Value, _extra| {
        let service = service.clone();
        Box::pin(async move {
            tracing::debug!("get_summary called");
            Ok(get_summary(&service, args).await)
        })
    })
    .with_description(
        "Summarize spending grouped by category and subcategory over an optional \
         inclusive date range.",
    )
    .with_schema(summary_schema())
}

fn add_expense_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "amount": {
                "type": "number",
                "description": "Cost of the expense (must be positive)"
            },
            "category": {
                "type": "string",
                "description": "Main category (e.g., Food, Transport)"
            },
            "subcategory": {
                "type": "string",
                "description": "Optional specific category (e.g., Grocery, Uber)"
            },
            "note": {
                "type": "string",
                "description": "Optional description or note"
            },
            "date": {
                "type": "string",
                "description": "Optional date in YYYY-MM-DD format (defaults to today)"
            }
        },
        "required": ["amount", "category"]
    })
}

fn list_expenses_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "description": "Only list expenses in exactly this category"
            },
            "start_date": {
                "type": "string",
                "description": "Earliest date to include (YYYY-MM-DD)"
            },
            "end_date": {
                "type": "string",
                "description": "Latest date to include (YYYY-MM-DD)"
            },
            "limit": {
                "type": "integer",
                "minimum": 0,
                "default": DEFAULT_LIST_LIMIT,
                "description": "Maximum number of records to return"
            }
        }
    })
}

fn summary_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "start_date": {
                "type": "string",
                "description": "Start date for the summary (YYYY-MM-DD)"
            },
            "end_date": {
                "type": "string",
                "description": "End date for the summary (YYYY-MM-DD)"
            }
        }
    })
}

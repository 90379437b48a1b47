use super::*;
use pmcp::ToolHandler;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

async fn test_service(dir: &tempfile::TempDir) -> Arc<ExpenseService> {
    let service = ExpenseService::init(
        dir.path().join("expenses.db"),
        dir.path().join("categories.json"),
    )
    .await
    .expect("init service");
    Arc::new(service)
}

fn extra() -> pmcp::RequestHandlerExtra {
    pmcp::RequestHandlerExtra::new("test".into(), CancellationToken::new())
}

fn result_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().expect("text content")
}

fn is_error(result: &Value) -> bool {
    result["isError"].as_bool().expect("isError flag")
}

#[tokio::test]
async fn test_add_expense_tool_reports_new_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let tool = tools::add_expense_tool(service.clone());
    let result = tool
        .handle(
            json!({
                "amount": 12.5,
                "category": "Food",
                "subcategory": "Grocery",
                "date": "2024-01-15"
            }),
            extra(),
        )
        .await
        .expect("tool call ok");

    assert!(!is_error(&result));
    assert_eq!(
        result_text(&result),
        "Successfully added expense ID 1: Food (Grocery) - $12.50 on 2024-01-15"
    );
    assert_eq!(service.count_expenses().await.expect("count"), 1);
}

#[tokio::test]
async fn test_add_expense_tool_rejects_non_positive_amount() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let tool = tools::add_expense_tool(service.clone());
    for amount in [0.0, -4.0] {
        let result = tool
            .handle(json!({ "amount": amount, "category": "Food" }), extra())
            .await
            .expect("validation failures are results, not faults");
        assert!(is_error(&result));
        assert_eq!(result_text(&result), "Error: Amount must be a positive number.");
    }

    assert_eq!(service.count_expenses().await.expect("count"), 0);
}

#[tokio::test]
async fn test_add_expense_tool_reports_missing_arguments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let result = tools::add_expense(&service, json!({ "category": "Food" })).await;

    assert!(is_error(&result));
    assert!(result_text(&result).starts_with("Error: invalid arguments for add_expense"));
    assert_eq!(service.count_expenses().await.expect("count"), 0);
}

#[tokio::test]
async fn test_list_expenses_tool_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let empty = tools::list_expenses(&service, Value::Null).await;
    assert!(!is_error(&empty));
    assert_eq!(result_text(&empty), crate::render::NO_EXPENSES);

    for i in 0..25 {
        tools::add_expense(
            &service,
            json!({ "amount": 1.0 + f64::from(i), "category": "Misc", "date": "2024-03-01" }),
        )
        .await;
    }

    let tool = tools::list_expenses_tool(service.clone());
    let result = tool.handle(json!({}), extra()).await.expect("tool call ok");
    // Header + separator + default limit of 20 rows.
    assert_eq!(result_text(&result).lines().count(), 22);

    let limited = tools::list_expenses(&service, json!({ "limit": 3 })).await;
    let lines: Vec<&str> = result_text(&limited).lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[2].starts_with("25 "));
}

#[tokio::test]
async fn test_list_expenses_tool_rejects_negative_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let result = tools::list_expenses(&service, json!({ "limit": -1 })).await;
    assert!(is_error(&result));
}

#[tokio::test]
async fn test_get_summary_tool() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let empty = tools::get_summary(&service, json!({})).await;
    assert_eq!(result_text(&empty), crate::render::NO_SUMMARY_DATA);

    tools::add_expense(&service, json!({ "amount": 10, "category": "Food", "subcategory": "Grocery" })).await;
    tools::add_expense(&service, json!({ "amount": 30, "category": "Food", "subcategory": "Restaurant" })).await;
    tools::add_expense(&service, json!({ "amount": 5, "category": "Transport" })).await;

    let tool = tools::get_summary_tool(service.clone());
    let result = tool.handle(json!({}), extra()).await.expect("tool call ok");
    let text = result_text(&result);

    assert!(!is_error(&result));
    assert!(text.starts_with("Expense Summary Report (Beginning to Now)"));
    assert!(text.contains("TOTAL SPEND: $45.00"));
    assert!(text.contains("[FOOD] - Total: $40.00 (2 entries)"));
    assert!(text.contains("[TRANSPORT] - Total: $5.00 (1 entries)"));
}

#[tokio::test]
async fn test_add_expense_tool_blank_date_means_today() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let result =
        tools::add_expense(&service, json!({ "amount": 5.0, "category": "Food", "date": "" })).await;
    assert!(!is_error(&result));

    let today = crate::domain::today();
    assert!(result_text(&result).ends_with(&format!("on {today}")));

    let stored = service.list_all_expenses().await.expect("list");
    assert_eq!(stored[0].date, today);
}

#[tokio::test]
async fn test_list_expenses_tool_ignores_blank_filters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    tools::add_expense(&service, json!({ "amount": 10, "category": "Food", "date": "2024-01-01" })).await;
    tools::add_expense(&service, json!({ "amount": 4, "category": "Transport", "date": "2024-02-01" })).await;

    let result = tools::list_expenses(
        &service,
        json!({ "category": "", "start_date": "", "end_date": "" }),
    )
    .await;
    assert!(!is_error(&result));
    // Header + separator + both rows.
    assert_eq!(result_text(&result).lines().count(), 4);
}

#[tokio::test]
async fn test_get_summary_tool_blank_dates_cover_everything() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    tools::add_expense(&service, json!({ "amount": 10, "category": "Food", "date": "2024-01-01" })).await;

    let result =
        tools::get_summary(&service, json!({ "start_date": "", "end_date": " " })).await;
    let text = result_text(&result);
    assert!(text.starts_with("Expense Summary Report (Beginning to Now)"));
    assert!(text.contains("TOTAL SPEND: $10.00"));
}

#[tokio::test]
async fn test_categories_resource() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let missing = resources::read_resource(&service, CATEGORIES_URI).await;
    assert_eq!(missing.as_deref(), Some(crate::render::NO_CATEGORIES));

    std::fs::write(
        dir.path().join("categories.json"),
        r#"{"Food": ["Restaurant", "Grocery"], "Gifts": []}"#,
    )
    .expect("write categories");

    let text = resources::read_resource(&service, CATEGORIES_URI)
        .await
        .expect("known resource");
    assert!(text.starts_with("Full Expense Categories Hierarchy:"));
    let grocery = text.find("Grocery").expect("grocery listed");
    let restaurant = text.find("Restaurant").expect("restaurant listed");
    assert!(grocery < restaurant);
    assert!(text.contains("GIFTS\n  (No subcategories)"));
}

#[tokio::test]
async fn test_categories_resource_reports_malformed_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;
    std::fs::write(dir.path().join("categories.json"), "not json").expect("write categories");

    let text = resources::read_resource(&service, CATEGORIES_URI)
        .await
        .expect("known resource");
    assert!(text.starts_with("Error: Invalid category hierarchy"));
}

#[tokio::test]
async fn test_summary_resource() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    let text = resources::read_resource(&service, SUMMARY_URI)
        .await
        .expect("known resource");
    assert!(text.starts_with(&format!("Database: {}", dir.path().join("expenses.db").display())));
    assert!(text.ends_with("Total lifetime spend tracked: $0.00"));

    tools::add_expense(&service, json!({ "amount": 19.99, "category": "Books" })).await;
    tools::add_expense(&service, json!({ "amount": 0.01, "category": "Books" })).await;

    let text = resources::read_resource(&service, SUMMARY_URI)
        .await
        .expect("known resource");
    assert!(text.ends_with("Total lifetime spend tracked: $20.00"));
}

#[tokio::test]
async fn test_unknown_resource() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = test_service(&dir).await;

    assert!(resources::read_resource(&service, "expenses://nope").await.is_none());
}

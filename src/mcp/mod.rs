//! MCP server exposing the expense tools and resources over stdio.
//!
//! Tools: `add_expense`, `list_expenses`, `get_summary`.
//! Resources: `expenses://categories`, `expenses://summary`.
//! Every result is plain text; failures are flagged results, never protocol
//! errors, so a client always gets something it can show the user.

mod resources;
mod tools;
mod transport;

pub use resources::{CATEGORIES_URI, SUMMARY_URI};

use std::sync::Arc;

use pmcp::{Server, ServerCapabilities};

use crate::application::ExpenseService;

pub const SERVER_NAME: &str = "spendlog";

/// Run the MCP server over stdio. Returns when the client closes stdin.
pub async fn run_server(service: ExpenseService) -> pmcp::Result<()> {
    let service = Arc::new(service);
    tracing::info!(
        database = %service.database_location().display(),
        categories = %service.categories_file().display(),
        "starting MCP server"
    );

    let server = Server::builder()
        .name(SERVER_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .capabilities(ServerCapabilities::default())
        .tool("add_expense", tools::add_expense_tool(service.clone()))
        .tool("list_expenses", tools::list_expenses_tool(service.clone()))
        .tool("get_summary", tools::get_summary_tool(service.clone()))
        .resources(resources::ExpenseResources::new(service))
        .build()?;

    tracing::info!("serving on stdio (line-delimited)");
    server.run(transport::LineDelimitedStdioTransport::new()).await
}

#[cfg(test)]
mod tests;

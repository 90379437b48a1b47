use std::sync::Arc;

use async_trait::async_trait;
use pmcp::types::{Content, ListResourcesResult, ReadResourceResult, ResourceInfo};
use pmcp::{RequestHandlerExtra, ResourceHandler};

use crate::application::ExpenseService;
use crate::render;

pub const CATEGORIES_URI: &str = "expenses://categories";
pub const SUMMARY_URI: &str = "expenses://summary";

/// Render the text of a read-only resource, or `None` for an unknown URI.
///
/// Failures are reported inside the text, like tool errors.
pub(crate) async fn read_resource(service: &ExpenseService, uri: &str) -> Option<String> {
    let text = match uri {
        CATEGORIES_URI => match service.categories().await {
            Ok(hierarchy) => render::category_outline(hierarchy.as_ref()),
            Err(err) => {
                tracing::error!(error = %err, "failed to load category hierarchy");
                render::error(&err)
            }
        },
        SUMMARY_URI => match service.lifetime_summary().await {
            Ok(summary) => render::lifetime_summary(&summary),
            Err(err) => {
                tracing::error!(error = %err, "failed to compute lifetime summary");
                render::error(&err)
            }
        },
        _ => return None,
    };
    Some(text)
}

/// Serves the category hierarchy and the lifetime spending total.
pub(super) struct ExpenseResources {
    service: Arc<ExpenseService>,
}

impl ExpenseResources {
    pub(super) fn new(service: Arc<ExpenseService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ResourceHandler for ExpenseResources {
    async fn read(
        &self,
        uri: &str,
        _extra: RequestHandlerExtra,
    ) -> pmcp::Result<ReadResourceResult> {
        tracing::debug!(uri, "resource read");
        let text = read_resource(&self.service, uri)
            .await
            .ok_or_else(|| pmcp::Error::Validation(format!("unknown resource: {uri}")))?;

        Ok(ReadResourceResult {
            contents: vec![Content::Resource {
                uri: uri.to_string(),
                text: Some(text),
                mime_type: Some("text/plain".to_string()),
            }],
        })
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> pmcp::Result<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                ResourceInfo {
                    uri: CATEGORIES_URI.to_string(),
                    name: "categories".to_string(),
                    description: Some(
                        "All available expense categories and their subcategories.".to_string(),
                    ),
                    mime_type: Some("text/plain".to_string()),
                },
                ResourceInfo {
                    uri: SUMMARY_URI.to_string(),
                    name: "summary".to_string(),
                    description: Some("Total spend tracked across all expenses.".to_string()),
                    mime_type: Some("text/plain".to_string()),
                },
            ],
            next_cursor: None,
        })
    }
}

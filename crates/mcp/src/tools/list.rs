// Listing tool for browsing the documentation corpus

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_enum, json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use docscout_core::{DocumentSource, EntityKind};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to list documents of one kind, optionally within a category
pub struct ListDocumentsTool {
    source: Arc<dyn DocumentSource>,
}

impl ListDocumentsTool {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, Deserialize)]
struct ListDocumentsArgs {
    kind: String,
    #[serde(default)]
    category: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ListDocumentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_documents".to_string(),
            description: "List documented resources or data sources with their category and summary".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "kind": json_schema_enum(&["resource", "datasource"], "Which kind of documentation to list"),
                    "category": json_schema_string("Only list documents in this category (case-insensitive)")
                }),
                vec!["kind"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListDocumentsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for list_documents")?;

        let Some(kind) = EntityKind::parse(&args.kind) else {
            return Ok(CallToolResult::error(format!("Invalid kind: {}", args.kind)));
        };

        let mut documents = self
            .source
            .load(kind)
            .await
            .with_context(|| format!("Failed to load {} documentation", kind))?;

        if let Some(category) = args.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            documents.retain(|d| d.category.eq_ignore_ascii_case(category));
        }

        if documents.is_empty() {
            return Ok(CallToolResult::text(format!(
                "No {} documents found.",
                kind.display_name()
            )));
        }

        let mut output = format!(
            "Found {} {} document(s):\n",
            documents.len(),
            kind.display_name()
        );
        for doc in &documents {
            output.push_str(&format!("\n- {} [{}]", doc.identifier, doc.category));
            if !doc.short_description.is_empty() {
                output.push_str(&format!(": {}", doc.short_description));
            }
        }

        Ok(CallToolResult::text(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscout_core::MarkdownDocStore;
    use tempfile::TempDir;

    fn tool() -> (TempDir, ListDocumentsTool) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("r")).unwrap();
        std::fs::write(
            dir.path().join("r/s3_bucket.html.markdown"),
            "---\nsubcategory: S3\ndescription: Provides a S3 bucket resource.\n---\n# Resource: aws_s3_bucket\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("r/vpc.html.markdown"),
            "---\nsubcategory: VPC\n---\n# Resource: aws_vpc\n",
        )
        .unwrap();
        let source = Arc::new(MarkdownDocStore::new(dir.path(), ".html.markdown"));
        (dir, ListDocumentsTool::new(source))
    }

    #[tokio::test]
    async fn test_list_all() {
        let (_dir, tool) = tool();
        let result = tool
            .execute(serde_json::json!({"kind": "resource"}))
            .await
            .unwrap();
        assert_eq!(
            result.joined_text(),
            "Found 2 resource document(s):\n\n- aws_s3_bucket [S3]: Provides a S3 bucket resource.\n- aws_vpc [VPC]"
        );
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let (_dir, tool) = tool();
        let result = tool
            .execute(serde_json::json!({"kind": "resource", "category": "vpc"}))
            .await
            .unwrap();
        assert!(result.joined_text().contains("aws_vpc"));
        assert!(!result.joined_text().contains("aws_s3_bucket"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_dir, tool) = tool();
        let result = tool
            .execute(serde_json::json!({"kind": "datasource"}))
            .await
            .unwrap();
        assert_eq!(result.joined_text(), "No data source documents found.");
    }
}

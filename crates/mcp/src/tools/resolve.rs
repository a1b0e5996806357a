// Name resolution tools: fuzzy lookup of resource and data source docs

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use docscout_core::ingest::filename_locator;
use docscout_core::{DocumentSource, EntityKind, Resolution, ResolvedMatch, Resolver, ResolverConfig};
use serde::Deserialize;
use std::sync::Arc;

/// Resolves a free-text name to one document of a single entity kind and
/// returns its full text.
///
/// An exact `filename` skips fuzzy matching entirely.
pub struct ResolveDocTool {
    kind: EntityKind,
    source: Arc<dyn DocumentSource>,
    resolver: Resolver,
    extension: String,
}

impl ResolveDocTool {
    pub fn new(kind: EntityKind, source: Arc<dyn DocumentSource>, config: &ResolverConfig) -> Self {
        Self {
            kind,
            source,
            resolver: Resolver::new(config),
            extension: config.doc_extension.clone(),
        }
    }

    pub fn tool_name(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Resource => "resolve_resource",
            EntityKind::DataSource => "resolve_datasource",
        }
    }

    async fn fetch_exact(&self, filename: &str) -> Result<CallToolResult> {
        if filename.contains('/') || filename.contains('\\') {
            return Ok(CallToolResult::error(format!(
                "filename must not contain path separators: {}",
                filename
            )));
        }

        let locator = filename_locator(self.kind, filename, &self.extension);
        match self.source.fetch(&locator).await {
            Ok(text) => Ok(CallToolResult::text(format!(
                "# {} ({})\n\nSource: {}\n\n{}",
                filename,
                self.kind.display_name(),
                locator,
                text
            ))),
            Err(e) if e.is_user_error() => Ok(CallToolResult::error(format!(
                "No {} documentation file named '{}' ({})",
                self.kind.display_name(),
                filename,
                e
            ))),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", locator)),
        }
    }

    fn no_match(&self, query: &str, closest_distance: Option<usize>) -> String {
        let mut text = format!(
            "No {} matching \"{}\" was found.",
            self.kind.display_name(),
            query
        );
        if let Some(distance) = closest_distance {
            text.push_str(&format!(
                " The closest name was {} edits away (at most {} allowed).",
                distance,
                self.resolver.threshold()
            ));
        }
        text.push_str(" Try another spelling or pass the exact filename.");
        text
    }

    fn format_match(&self, query: &str, found: &ResolvedMatch<'_>, text: &str) -> String {
        format!(
            "# {} ({})\n\nMatched \"{}\" on {} \"{}\" (edit distance {}).\nSource: {}\n\n{}",
            found.identifier(),
            self.kind.display_name(),
            query,
            found.field,
            found.matched_value,
            found.distance,
            found.locator(),
            text
        )
    }
}

#[derive(Debug, Deserialize)]
struct ResolveArgs {
    name: String,
    #[serde(default)]
    filename: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ResolveDocTool {
    fn schema(&self) -> ToolSchema {
        let kind = self.kind.display_name();
        ToolSchema {
            name: Self::tool_name(self.kind).to_string(),
            description: format!(
                "Find the {kind} whose documentation best matches a name (typos and partial names are tolerated) and return its full documentation. Pass `filename` to fetch a known {kind} document directly."
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string(&format!("Name of the {} to look up, e.g. \"s3 bucket\"", kind)),
                    "filename": json_schema_string("Exact documentation file name; bypasses fuzzy matching")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ResolveArgs = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", Self::tool_name(self.kind)))?;

        if let Some(filename) = args.filename.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            return self.fetch_exact(filename).await;
        }

        let query = match self.resolver.check_query(&args.name) {
            Ok(query) => query,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        let corpus = self
            .source
            .load(self.kind)
            .await
            .with_context(|| format!("Failed to load {} documentation", self.kind))?;

        match self.resolver.resolve(query, &corpus) {
            Resolution::Found(found) => {
                let text = self
                    .source
                    .fetch(found.locator())
                    .await
                    .with_context(|| format!("Failed to read {}", found.locator()))?;
                Ok(CallToolResult::text(self.format_match(query, &found, &text)))
            }
            Resolution::NoCandidates => Ok(CallToolResult::text(self.no_match(query, None))),
            Resolution::NotFound { closest_distance } => Ok(CallToolResult::text(
                self.no_match(query, Some(closest_distance)),
            )),
        }
    }
}

// MCP tool trait, registry and argument validation

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments that already passed schema validation
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Why a set of tool arguments was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required argument '{0}'")]
    MissingRequired(String),

    #[error("argument '{name}' must be of type {expected}")]
    WrongType { name: String, expected: String },

    #[error("argument '{name}' must be one of: {allowed}")]
    NotAllowed { name: String, allowed: String },
}

/// Failure to dispatch a tool call
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: ArgumentError,
    },
}

/// Tool registry for managing available tools, listed in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.index.get(&name) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate arguments against the tool's input schema, then execute it
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<Result<CallToolResult>, ToolCallError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;

        // Clients may omit arguments entirely for tools without required ones
        let arguments = if arguments.is_null() {
            serde_json::json!({})
        } else {
            arguments
        };

        validate_arguments(&tool.schema().input_schema, &arguments).map_err(|source| {
            ToolCallError::InvalidArguments {
                tool: name.to_string(),
                source,
            }
        })?;

        tracing::debug!(tool = %name, "Executing tool");
        Ok(tool.execute(arguments).await)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check `arguments` against an object schema built with the helpers below.
///
/// Covers `required`, per-property `type` and `enum`; properties not in the
/// schema are accepted untouched.
pub fn validate_arguments(
    schema: &serde_json::Value,
    arguments: &serde_json::Value,
) -> std::result::Result<(), ArgumentError> {
    let args = arguments.as_object().ok_or(ArgumentError::NotAnObject)?;

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for name in required.iter().filter_map(|n| n.as_str()) {
            if args.get(name).is_none_or(|v| v.is_null()) {
                return Err(ArgumentError::MissingRequired(name.to_string()));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Ok(());
    };

    for (name, value) in args {
        let Some(property) = properties.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if let Some(expected) = property.get("type").and_then(|t| t.as_str()) {
            let matches = match expected {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.is_i64() || value.is_u64(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };
            if !matches {
                return Err(ArgumentError::WrongType {
                    name: name.clone(),
                    expected: expected.to_string(),
                });
            }
        }

        if let Some(allowed) = property.get("enum").and_then(|e| e.as_array()) {
            if !allowed.contains(value) {
                let allowed = allowed
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ArgumentError::NotAllowed {
                    name: name.clone(),
                    allowed,
                });
            }
        }
    }

    Ok(())
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

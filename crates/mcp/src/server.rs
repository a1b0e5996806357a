// MCP server: newline-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListResourcesResult, ListToolsResult, ReadResourceParams,
    ReadResourceResult, ResourcesCapability, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::resources::ResourceCatalog;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

pub struct McpServer {
    registry: ToolRegistry,
    resources: ResourceCatalog,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, resources: ResourceCatalog) -> Self {
        Self {
            registry,
            resources,
            info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Serve requests on stdin/stdout until stdin closes
    pub async fn start(&self) -> Result<()> {
        tracing::info!("MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one request per line from `reader`, writing responses to `writer`
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = line.context("Failed to read request line")?;
            if let Some(response) = self.handle_line(&line).await {
                let json = serde_json::to_string(&response).context("Failed to encode response")?;
                sink.send(json).await.context("Failed to write response")?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message; `None` means nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.trim().is_empty() {
            return None;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(_) => return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        Some(self.handle_request(request).await)
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(serde_json::Value::Null);
        let params = request.params.unwrap_or(serde_json::Value::Null);
        tracing::debug!(method = %request.method, "Request received");

        match request.method.as_str() {
            "initialize" => {
                let protocol_version = serde_json::from_value::<InitializeParams>(params)
                    .map(|p| p.protocol_version)
                    .unwrap_or_else(|_| PROTOCOL_VERSION.to_string());
                respond(
                    id,
                    &InitializeResult {
                        protocol_version,
                        capabilities: ServerCapabilities {
                            tools: Some(ToolsCapability {
                                list_changed: false,
                            }),
                            resources: Some(ResourcesCapability {
                                subscribe: false,
                                list_changed: false,
                            }),
                        },
                        server_info: self.info.clone(),
                    },
                )
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => respond(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => {
                let params: CallToolParams = match serde_json::from_value(params) {
                    Ok(params) => params,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                        )
                    }
                };
                match self.registry.call(&params.name, params.arguments).await {
                    Ok(Ok(result)) => respond(id, &result),
                    Ok(Err(e)) => {
                        tracing::warn!(tool = %params.name, "Tool failed: {:#}", e);
                        respond(id, &CallToolResult::error(format!("{:#}", e)))
                    }
                    Err(e) => JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
                }
            }
            "resources/list" => match self.resources.list().await {
                Ok(resources) => respond(id, &ListResourcesResult { resources }),
                Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
            },
            "resources/read" => {
                let params: ReadResourceParams = match serde_json::from_value(params) {
                    Ok(params) => params,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(format!("Invalid resources/read params: {}", e)),
                        )
                    }
                };
                match self.resources.read(&params.uri).await {
                    Ok(contents) => respond(
                        id,
                        &ReadResourceResult {
                            contents: vec![contents],
                        },
                    ),
                    Err(e) if e.is_user_error() => {
                        JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
                    }
                    Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
                }
            }
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        }
    }
}

fn respond(id: serde_json::Value, result: &impl Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

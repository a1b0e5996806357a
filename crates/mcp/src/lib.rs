// MCP (Model Context Protocol) server exposing documentation lookup tools
// and resources to agent clients

pub mod config;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::McpServer;

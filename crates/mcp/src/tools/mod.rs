pub mod list;
pub mod resolve;
mod registry;

pub use list::ListDocumentsTool;
pub use registry::{
    json_schema_enum, json_schema_object, json_schema_string, validate_arguments, ArgumentError,
    Tool, ToolCallError, ToolRegistry,
};
pub use resolve::ResolveDocTool;

use docscout_core::{DocumentSource, EntityKind, ResolverConfig};
use std::sync::Arc;

/// Registry with every documentation tool registered against one source
pub fn default_registry(source: Arc<dyn DocumentSource>, config: &ResolverConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for kind in EntityKind::ALL {
        registry.register(Arc::new(ResolveDocTool::new(kind, source.clone(), config)));
    }
    registry.register(Arc::new(ListDocumentsTool::new(source)));
    registry
}

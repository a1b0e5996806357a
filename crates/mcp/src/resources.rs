// MCP resources: every document is addressable as docs://<kind>/<identifier>

use crate::protocol::{ResourceContents, ResourceDescriptor};
use docscout_core::{DocError, DocResult, DocumentSource, EntityKind};
use std::sync::Arc;

pub const RESOURCE_URI_SCHEME: &str = "docs://";
pub const DOC_MIME_TYPE: &str = "text/markdown";

pub fn resource_uri(kind: EntityKind, identifier: &str) -> String {
    format!("{}{}/{}", RESOURCE_URI_SCHEME, kind.as_str(), identifier)
}

/// Split a resource URI into its kind and identifier
pub fn parse_resource_uri(uri: &str) -> DocResult<(EntityKind, &str)> {
    let invalid = || DocError::InvalidInput(format!("Unsupported resource URI: {}", uri));

    let rest = uri.strip_prefix(RESOURCE_URI_SCHEME).ok_or_else(invalid)?;
    let (kind, identifier) = rest.split_once('/').ok_or_else(invalid)?;
    let kind = match kind {
        "resource" => EntityKind::Resource,
        "datasource" => EntityKind::DataSource,
        _ => return Err(invalid()),
    };
    if identifier.is_empty() {
        return Err(invalid());
    }
    Ok((kind, identifier))
}

/// Exposes the documentation corpus through `resources/list` and `resources/read`
pub struct ResourceCatalog {
    source: Arc<dyn DocumentSource>,
}

impl ResourceCatalog {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    pub async fn list(&self) -> DocResult<Vec<ResourceDescriptor>> {
        let mut resources = Vec::new();
        for kind in EntityKind::ALL {
            for doc in self.source.load(kind).await? {
                let description = if doc.short_description.is_empty() {
                    None
                } else {
                    Some(doc.short_description.clone())
                };
                resources.push(ResourceDescriptor {
                    uri: resource_uri(kind, &doc.identifier),
                    name: doc.identifier,
                    description,
                    mime_type: DOC_MIME_TYPE.to_string(),
                });
            }
        }
        Ok(resources)
    }

    /// Read a document by exact identifier; no fuzzy matching here
    pub async fn read(&self, uri: &str) -> DocResult<ResourceContents> {
        let (kind, identifier) = parse_resource_uri(uri)?;
        let documents = self.source.load(kind).await?;
        let doc = documents
            .iter()
            .find(|d| d.identifier == identifier)
            .ok_or_else(|| DocError::DocumentNotFound(uri.to_string()))?;

        let text = self.source.fetch(&doc.locator).await?;
        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: DOC_MIME_TYPE.to_string(),
            text,
        })
    }
}

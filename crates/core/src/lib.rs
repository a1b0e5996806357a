// Core types and functionality for docscout: document model, fuzzy name
// resolution, and on-disk documentation ingestion

pub mod config;
pub mod error;
pub mod ingest;
pub mod resolve;
pub mod types;

pub use config::ResolverConfig;
pub use error::{DocError, DocResult};
pub use ingest::{DocumentSource, MarkdownDocStore};
pub use resolve::{Resolution, ResolvedMatch, Resolver};
pub use types::*;

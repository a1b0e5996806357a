// Resolver configuration: threshold, vendor prefixes, corpus extension and
// candidate field order

use crate::error::{DocError, DocResult};
use crate::types::CandidateField;
use serde::{Deserialize, Serialize};

/// Default maximum edit distance for an accepted match
pub const DEFAULT_THRESHOLD: usize = 3;

/// Default file extension of documentation files in the corpus
pub const DEFAULT_DOC_EXTENSION: &str = ".html.markdown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    #[serde(default = "default_vendor_prefixes")]
    pub vendor_prefixes: Vec<String>,

    #[serde(default = "default_doc_extension")]
    pub doc_extension: String,

    #[serde(default = "default_field_order")]
    pub field_order: Vec<CandidateField>,
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}

fn default_vendor_prefixes() -> Vec<String> {
    vec!["aws".to_string(), "amazon".to_string()]
}

fn default_doc_extension() -> String {
    DEFAULT_DOC_EXTENSION.to_string()
}

fn default_field_order() -> Vec<CandidateField> {
    CandidateField::DEFAULT_ORDER.to_vec()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            vendor_prefixes: default_vendor_prefixes(),
            doc_extension: default_doc_extension(),
            field_order: default_field_order(),
        }
    }
}

impl ResolverConfig {
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the field order names every field exactly once
    pub fn validate(&self) -> DocResult<()> {
        for field in CandidateField::DEFAULT_ORDER {
            let count = self.field_order.iter().filter(|f| **f == field).count();
            if count != 1 {
                return Err(DocError::Config(format!(
                    "field_order must list '{}' exactly once (found {})",
                    field, count
                )));
            }
        }

        if self
            .vendor_prefixes
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(DocError::Config(
                "vendor_prefixes must be non-empty alphanumeric words".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.threshold, 3);
        assert_eq!(config.vendor_prefixes, vec!["aws", "amazon"]);
        assert_eq!(config.doc_extension, ".html.markdown");
        assert_eq!(config.field_order, CandidateField::DEFAULT_ORDER.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ResolverConfig = toml::from_str("threshold = 5").unwrap();
        assert_eq!(config.threshold, 5);
        assert_eq!(config.doc_extension, DEFAULT_DOC_EXTENSION);
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let mut config = ResolverConfig::default();
        config.field_order.push(CandidateField::Title);
        assert!(matches!(config.validate(), Err(DocError::Config(_))));

        let mut config = ResolverConfig::default();
        config.field_order.retain(|f| *f != CandidateField::Heading);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = ResolverConfig::default();
        config.vendor_prefixes.push("aws-".to_string());
        assert!(config.validate().is_err());
    }
}

use serde::{Deserialize, Serialize};

/// Category placeholder for documents whose front matter has no category
pub const MISSING_PLACEHOLDER: &str = "(missing)";

/// Category placeholder for documents whose front matter could not be parsed
pub const MALFORMED_PLACEHOLDER: &str = "(malformed)";

/// Returns true for the sentinel values ingestion writes in place of real text
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value == MISSING_PLACEHOLDER || value == MALFORMED_PLACEHOLDER
}

/// Kind of documented entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Resource,
    #[serde(rename = "datasource")]
    DataSource,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Resource, EntityKind::DataSource];

    /// Sub-directory of the docs root holding this kind's documents
    pub fn dir_name(&self) -> &'static str {
        match self {
            EntityKind::Resource => "r",
            EntityKind::DataSource => "d",
        }
    }

    /// Stable lowercase name used in tool arguments and resource URIs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Resource => "resource",
            EntityKind::DataSource => "datasource",
        }
    }

    /// Human-readable name for formatted output
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Resource => "resource",
            EntityKind::DataSource => "data source",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resource" | "resources" | "r" => Some(EntityKind::Resource),
            "datasource" | "datasources" | "data_source" | "data source" | "d" => {
                Some(EntityKind::DataSource)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One documentation entry in a corpus
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Canonical name, taken from the title heading or the file name
    pub identifier: String,
    /// Free-text classification, or one of the placeholder sentinels
    pub category: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub argument_names: Vec<String>,
    /// Opaque key handed back to the document source to fetch the full text
    pub locator: String,
}

impl Document {
    pub fn new(identifier: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            locator: locator.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }

    pub fn with_long_description(mut self, description: impl Into<String>) -> Self {
        self.long_description = description.into();
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.headings.push(heading.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>) -> Self {
        self.argument_names.push(name.into());
        self
    }
}

/// Semantic field a candidate string was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateField {
    Category,
    Identifier,
    Title,
    ShortDescription,
    LongDescription,
    Heading,
    ArgumentName,
}

impl CandidateField {
    /// Default emission order; also decides which field is reported on a tie
    pub const DEFAULT_ORDER: [CandidateField; 7] = [
        CandidateField::Category,
        CandidateField::Identifier,
        CandidateField::Title,
        CandidateField::ShortDescription,
        CandidateField::LongDescription,
        CandidateField::Heading,
        CandidateField::ArgumentName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateField::Category => "category",
            CandidateField::Identifier => "identifier",
            CandidateField::Title => "title",
            CandidateField::ShortDescription => "shortDescription",
            CandidateField::LongDescription => "longDescription",
            CandidateField::Heading => "heading",
            CandidateField::ArgumentName => "argumentName",
        }
    }
}

impl std::fmt::Display for CandidateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized string extracted from one field of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub field: CandidateField,
    pub value: String,
}

impl Candidate {
    pub fn new(field: CandidateField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("(missing)"));
        assert!(is_placeholder(" (malformed) "));
        assert!(!is_placeholder("missing"));
        assert!(!is_placeholder("S3 (Simple Storage)"));
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!(EntityKind::parse("Resource"), Some(EntityKind::Resource));
        assert_eq!(EntityKind::parse("data_source"), Some(EntityKind::DataSource));
        assert_eq!(EntityKind::parse("datasource"), Some(EntityKind::DataSource));
        assert_eq!(EntityKind::parse("module"), None);
    }

    #[test]
    fn test_candidate_field_serde_names() {
        let json = serde_json::to_string(&CandidateField::ArgumentName).unwrap();
        assert_eq!(json, "\"argumentName\"");
        let field: CandidateField = serde_json::from_str("\"shortDescription\"").unwrap();
        assert_eq!(field, CandidateField::ShortDescription);
        assert_eq!(CandidateField::LongDescription.as_str(), "longDescription");
    }

    #[test]
    fn test_entity_kind_serde_names() {
        let json = serde_json::to_string(&EntityKind::DataSource).unwrap();
        assert_eq!(json, "\"datasource\"");
        assert_eq!(EntityKind::DataSource.to_string(), "datasource");
    }
}

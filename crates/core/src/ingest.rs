// Documentation ingestion: turns markdown files with YAML front matter into
// corpus documents and serves their full text back by locator

use crate::error::{DocError, DocResult};
use crate::types::{Document, EntityKind, MALFORMED_PLACEHOLDER, MISSING_PLACEHOLDER};
use regex::Regex;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").expect("heading regex is valid")
});

static ARGUMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[*-]\s+`([^`]+)`").expect("argument regex is valid"));

const ARGUMENT_SECTION: &str = "argument reference";

/// Source of corpus documents and their content
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load every document of the given kind, in a stable order
    async fn load(&self, kind: EntityKind) -> DocResult<Vec<Document>>;

    /// Fetch the full text of the document at `locator`
    async fn fetch(&self, locator: &str) -> DocResult<String>;
}

/// Locator for a document addressed directly by file name.
///
/// The extension is appended when the file name does not already carry it.
pub fn filename_locator(kind: EntityKind, filename: &str, extension: &str) -> String {
    let filename = filename.trim();
    if extension.is_empty() || filename.ends_with(extension) {
        format!("{}/{}", kind.dir_name(), filename)
    } else {
        format!("{}/{}{}", kind.dir_name(), filename, extension)
    }
}

/// Filesystem document store laid out as `<root>/r/*` and `<root>/d/*`
#[derive(Debug, Clone)]
pub struct MarkdownDocStore {
    root: PathBuf,
    extension: String,
}

impl MarkdownDocStore {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    fn list_files(&self, kind: EntityKind) -> DocResult<Vec<PathBuf>> {
        let dir = self.root.join(kind.dir_name());
        if !dir.is_dir() {
            tracing::warn!("Document directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches_extension = entry
                .file_name()
                .to_string_lossy()
                .ends_with(self.extension.as_str());
            if matches_extension {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Resolve a locator to a path inside the root, rejecting escapes
    fn locator_path(&self, locator: &str) -> DocResult<PathBuf> {
        let relative = Path::new(locator);
        let is_plain = !locator.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(DocError::InvalidLocator(locator.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait::async_trait]
impl DocumentSource for MarkdownDocStore {
    async fn load(&self, kind: EntityKind) -> DocResult<Vec<Document>> {
        let files = self.list_files(kind)?;
        let mut documents = Vec::with_capacity(files.len());

        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), e);
                    continue;
                }
            };

            let locator = format!("{}/{}", kind.dir_name(), file_name);
            let stem = file_name
                .strip_suffix(self.extension.as_str())
                .unwrap_or(file_name.as_str());
            documents.push(parse_document(&content, &locator, stem));
        }

        tracing::info!("Loaded {} {} documents", documents.len(), kind);
        Ok(documents)
    }

    async fn fetch(&self, locator: &str) -> DocResult<String> {
        let path = self.locator_path(locator)?;
        if !path.is_file() {
            return Err(DocError::DocumentNotFound(locator.to_string()));
        }
        Ok(tokio::fs::read_to_string(&path).await?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    page_title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

enum FrontMatterState {
    Absent,
    Parsed(FrontMatter),
    Malformed,
}

/// Split leading `---` delimited front matter from the body
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return (Some(&rest[..offset]), body);
        }
        offset += line.len();
    }

    // Unterminated front matter: treat the whole file as body
    (None, content)
}

fn parse_front_matter(raw: Option<&str>) -> FrontMatterState {
    let Some(raw) = raw else {
        return FrontMatterState::Absent;
    };
    if raw.trim().is_empty() {
        return FrontMatterState::Parsed(FrontMatter::default());
    }
    match serde_yaml::from_str::<FrontMatter>(raw) {
        Ok(front_matter) => FrontMatterState::Parsed(front_matter),
        Err(e) => {
            tracing::warn!("Malformed front matter: {}", e);
            FrontMatterState::Malformed
        }
    }
}

fn clean(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parse one markdown document.
///
/// `file_stem` is the file name without its extension, used as the
/// identifier when the body has no title heading.
pub fn parse_document(content: &str, locator: &str, file_stem: &str) -> Document {
    let (raw_front_matter, body) = split_front_matter(content);

    let (category, title, short_description) = match parse_front_matter(raw_front_matter) {
        FrontMatterState::Absent => (MISSING_PLACEHOLDER.to_string(), String::new(), String::new()),
        FrontMatterState::Malformed => {
            (MALFORMED_PLACEHOLDER.to_string(), String::new(), String::new())
        }
        FrontMatterState::Parsed(fm) => {
            let category = match clean(fm.subcategory) {
                c if c.is_empty() => MISSING_PLACEHOLDER.to_string(),
                c => c,
            };
            (category, clean(fm.page_title), clean(fm.description))
        }
    };

    let mut title_heading: Option<String> = None;
    let mut headings = Vec::new();
    let mut argument_names: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut long_description: Option<String> = None;
    let mut in_fence = false;
    let mut in_arguments = false;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(trimmed) {
            let level = caps[1].len();
            let text = caps[2].trim().to_string();

            if title_heading.is_some() && long_description.is_none() && !paragraph.is_empty() {
                long_description = Some(paragraph.join(" "));
            }
            paragraph.clear();

            if level == 1 {
                if title_heading.is_none() {
                    title_heading = Some(text);
                }
                in_arguments = false;
                continue;
            }

            if level == 2 {
                in_arguments = text.eq_ignore_ascii_case(ARGUMENT_SECTION);
            }
            headings.push(text);
            continue;
        }

        if in_arguments {
            if let Some(caps) = ARGUMENT_RE.captures(line) {
                let name = caps[1].trim().to_string();
                if !name.is_empty() && !argument_names.contains(&name) {
                    argument_names.push(name);
                }
            }
        }

        if title_heading.is_some() && long_description.is_none() && headings.is_empty() {
            if trimmed.is_empty() {
                if !paragraph.is_empty() {
                    long_description = Some(paragraph.join(" "));
                    paragraph.clear();
                }
            } else {
                paragraph.push(trimmed);
            }
        }
    }

    if title_heading.is_some() && long_description.is_none() && !paragraph.is_empty() {
        long_description = Some(paragraph.join(" "));
    }

    let identifier = title_heading
        .as_deref()
        .map(identifier_from_heading)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| file_stem.to_string());

    Document {
        identifier,
        category,
        title,
        short_description,
        long_description: long_description.unwrap_or_default(),
        headings,
        argument_names,
        locator: locator.to_string(),
    }
}

/// `Resource: aws_s3_bucket` -> `aws_s3_bucket`
fn identifier_from_heading(heading: &str) -> String {
    let name = match heading.split_once(':') {
        Some((_, rest)) => rest,
        None => heading,
    };
    name.trim().trim_matches('`').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BUCKET_DOC: &str = r#"---
subcategory: "S3 (Simple Storage)"
layout: "aws"
page_title: "AWS: aws_s3_bucket"
description: |-
  Provides a S3 bucket resource.
---

# Resource: aws_s3_bucket

Provides a S3 bucket resource.
Buckets hold objects.

-> This functionality is for managing S3 in an AWS Partition.

## Example Usage

```terraform
# Private bucket
resource "aws_s3_bucket" "b" {
  bucket = "my-tf-test-bucket"
}
```

## Argument Reference

This resource supports the following arguments:

* `bucket` - (Optional, Forces new resource) Name of the bucket.
* `force_destroy` - (Optional, Default:`false`) Boolean.

### Versioning

* `enabled` - (Optional) Enable versioning.

## Attribute Reference

* `arn` - ARN of the bucket.
"#;

    #[test]
    fn test_parse_full_document() {
        let doc = parse_document(BUCKET_DOC, "r/s3_bucket.html.markdown", "s3_bucket");
        assert_eq!(doc.identifier, "aws_s3_bucket");
        assert_eq!(doc.category, "S3 (Simple Storage)");
        assert_eq!(doc.title, "AWS: aws_s3_bucket");
        assert_eq!(doc.short_description, "Provides a S3 bucket resource.");
        assert_eq!(
            doc.long_description,
            "Provides a S3 bucket resource. Buckets hold objects."
        );
        assert_eq!(
            doc.headings,
            vec!["Example Usage", "Argument Reference", "Versioning", "Attribute Reference"]
        );
        assert_eq!(doc.argument_names, vec!["bucket", "force_destroy", "enabled"]);
        assert_eq!(doc.locator, "r/s3_bucket.html.markdown");
    }

    #[test]
    fn test_missing_front_matter() {
        let doc = parse_document("Plain text only.\n", "d/thing.html.markdown", "thing");
        assert_eq!(doc.category, MISSING_PLACEHOLDER);
        assert_eq!(doc.identifier, "thing");
        assert!(doc.title.is_empty());
        assert!(doc.long_description.is_empty());
    }

    #[test]
    fn test_missing_subcategory() {
        let content = "---\npage_title: \"AWS: aws_vpc\"\n---\n# Resource: aws_vpc\n";
        let doc = parse_document(content, "r/vpc.html.markdown", "vpc");
        assert_eq!(doc.category, MISSING_PLACEHOLDER);
        assert_eq!(doc.title, "AWS: aws_vpc");
        assert_eq!(doc.identifier, "aws_vpc");
    }

    #[test]
    fn test_malformed_front_matter() {
        let content = "---\nsubcategory: [unclosed\n---\n# Data Source: aws_ami\n";
        let doc = parse_document(content, "d/ami.html.markdown", "ami");
        assert_eq!(doc.category, MALFORMED_PLACEHOLDER);
        assert_eq!(doc.identifier, "aws_ami");
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let content = "---\nsubcategory: x\n# Resource: aws_thing\n";
        let doc = parse_document(content, "r/thing.html.markdown", "thing");
        assert_eq!(doc.category, MISSING_PLACEHOLDER);
        assert_eq!(doc.identifier, "aws_thing");
    }

    #[test]
    fn test_identifier_from_heading() {
        assert_eq!(identifier_from_heading("Resource: aws_s3_bucket"), "aws_s3_bucket");
        assert_eq!(identifier_from_heading("Data Source: `aws_ami`"), "aws_ami");
        assert_eq!(identifier_from_heading("aws_iam_role"), "aws_iam_role");
    }

    #[test]
    fn test_filename_locator() {
        assert_eq!(
            filename_locator(EntityKind::Resource, "s3_bucket", ".html.markdown"),
            "r/s3_bucket.html.markdown"
        );
        assert_eq!(
            filename_locator(EntityKind::DataSource, "ami.html.markdown", ".html.markdown"),
            "d/ami.html.markdown"
        );
    }

    fn write_corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("r")).unwrap();
        std::fs::create_dir_all(dir.path().join("d")).unwrap();
        std::fs::write(dir.path().join("r/s3_bucket.html.markdown"), BUCKET_DOC).unwrap();
        std::fs::write(
            dir.path().join("r/instance.html.markdown"),
            "---\nsubcategory: EC2\n---\n# Resource: aws_instance\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("r/notes.txt"), "ignored").unwrap();
        std::fs::write(
            dir.path().join("d/ami.html.markdown"),
            "---\nsubcategory: EC2\n---\n# Data Source: aws_ami\n",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_sorted_and_filtered() {
        let dir = write_corpus();
        let store = MarkdownDocStore::new(dir.path(), ".html.markdown");

        let resources = store.load(EntityKind::Resource).await.unwrap();
        let ids: Vec<&str> = resources.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["aws_instance", "aws_s3_bucket"]);
        assert_eq!(resources[0].locator, "r/instance.html.markdown");

        let data_sources = store.load(EntityKind::DataSource).await.unwrap();
        assert_eq!(data_sources.len(), 1);
        assert_eq!(data_sources[0].identifier, "aws_ami");
    }

    #[tokio::test]
    async fn test_load_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = MarkdownDocStore::new(dir.path(), ".html.markdown");
        assert!(store.load(EntityKind::DataSource).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch() {
        let dir = write_corpus();
        let store = MarkdownDocStore::new(dir.path(), ".html.markdown");

        let text = store.fetch("r/s3_bucket.html.markdown").await.unwrap();
        assert!(text.contains("# Resource: aws_s3_bucket"));

        assert!(matches!(
            store.fetch("r/nope.html.markdown").await,
            Err(DocError::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.fetch("../secret").await,
            Err(DocError::InvalidLocator(_))
        ));
        assert!(matches!(
            store.fetch("/etc/passwd").await,
            Err(DocError::InvalidLocator(_))
        ));
        assert!(matches!(store.fetch("").await, Err(DocError::InvalidLocator(_))));
    }
}

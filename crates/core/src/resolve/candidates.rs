// Expands a document into ordered, normalized match candidates

use super::normalize::Normalizer;
use crate::config::ResolverConfig;
use crate::types::{is_placeholder, Candidate, CandidateField, Document};

/// Builds the candidate list for one document.
///
/// Candidates come out in the configured field order; `heading` and
/// `argumentName` contribute one candidate per entry. Empty values and
/// placeholder sentinels never become candidates.
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    normalizer: Normalizer,
    doc_extension: String,
    field_order: Vec<CandidateField>,
}

impl CandidateBuilder {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            normalizer: Normalizer::from_config(config),
            doc_extension: config.doc_extension.clone(),
            field_order: config.field_order.clone(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn build(&self, document: &Document) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for field in &self.field_order {
            match field {
                CandidateField::Category => self.push(&mut candidates, *field, &document.category),
                CandidateField::Identifier => {
                    let stem = self.identifier_stem(&document.identifier);
                    self.push(&mut candidates, *field, stem);
                    // The heading name and the file name can disagree
                    if let Some(file_stem) = self.file_stem(&document.locator) {
                        if self.normalizer.normalize(file_stem) != self.normalizer.normalize(stem) {
                            self.push(&mut candidates, *field, file_stem);
                        }
                    }
                }
                CandidateField::Title => self.push(&mut candidates, *field, &document.title),
                CandidateField::ShortDescription => {
                    self.push(&mut candidates, *field, &document.short_description)
                }
                CandidateField::LongDescription => {
                    self.push(&mut candidates, *field, &document.long_description)
                }
                CandidateField::Heading => {
                    for heading in &document.headings {
                        self.push(&mut candidates, *field, heading);
                    }
                }
                CandidateField::ArgumentName => {
                    for name in &document.argument_names {
                        self.push(&mut candidates, *field, name);
                    }
                }
            }
        }

        candidates
    }

    fn identifier_stem<'a>(&self, identifier: &'a str) -> &'a str {
        if self.doc_extension.is_empty() {
            return identifier;
        }
        identifier
            .strip_suffix(self.doc_extension.as_str())
            .unwrap_or(identifier)
    }

    /// File name of `locator` without the corpus extension, if it carries one
    fn file_stem<'a>(&self, locator: &'a str) -> Option<&'a str> {
        if self.doc_extension.is_empty() {
            return None;
        }
        let file_name = locator.rsplit(['/', '\\']).next()?;
        file_name.strip_suffix(self.doc_extension.as_str())
    }

    fn push(&self, candidates: &mut Vec<Candidate>, field: CandidateField, raw: &str) {
        if raw.trim().is_empty() || is_placeholder(raw) {
            return;
        }
        let value = self.normalizer.normalize(raw);
        if value.is_empty() {
            return;
        }
        candidates.push(Candidate::new(field, value));
    }
}

impl Default for CandidateBuilder {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

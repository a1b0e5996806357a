// Cross-document resolution: the single best candidate over a whole corpus

use super::candidates::CandidateBuilder;
use super::matcher::find_best_match;
use crate::config::ResolverConfig;
use crate::error::{validate_query, DocError, DocResult};
use crate::types::{Candidate, CandidateField, Document};

/// The document that won resolution and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch<'d> {
    pub document: &'d Document,
    pub document_index: usize,
    pub field: CandidateField,
    pub matched_value: String,
    pub distance: usize,
}

impl<'d> ResolvedMatch<'d> {
    pub fn identifier(&self) -> &'d str {
        &self.document.identifier
    }

    pub fn locator(&self) -> &'d str {
        &self.document.locator
    }
}

/// Outcome of a resolution call. Neither miss variant is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'d> {
    Found(ResolvedMatch<'d>),
    /// The corpus produced no eligible candidates at all
    NoCandidates,
    /// The nearest candidate was further than the threshold
    NotFound { closest_distance: usize },
}

impl<'d> Resolution<'d> {
    pub fn found(self) -> Option<ResolvedMatch<'d>> {
        match self {
            Resolution::Found(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Resolves free-text names to documents.
///
/// Holds no per-call state; the corpus is passed in on every call.
#[derive(Debug, Clone)]
pub struct Resolver {
    builder: CandidateBuilder,
    threshold: usize,
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            builder: CandidateBuilder::new(config),
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Trim `query` and reject it when normalization leaves nothing to compare
    pub fn check_query<'q>(&self, query: &'q str) -> DocResult<&'q str> {
        let query = validate_query(query)?;
        if self.builder.normalizer().normalize(query).is_empty() {
            return Err(DocError::InvalidInput(format!(
                "name '{}' has no letters or digits to match on",
                query
            )));
        }
        Ok(query)
    }

    /// Resolve using the configured candidate builder
    pub fn resolve<'d>(&self, query: &str, corpus: &'d [Document]) -> Resolution<'d> {
        self.resolve_with(query, corpus, |doc| self.builder.build(doc))
    }

    /// Resolve with a caller-supplied field extraction.
    ///
    /// Documents are scanned in corpus order and candidates in the order
    /// `extract` returns them; the first candidate reaching the global
    /// minimum distance wins.
    pub fn resolve_with<'d, F>(
        &self,
        query: &str,
        corpus: &'d [Document],
        extract: F,
    ) -> Resolution<'d>
    where
        F: Fn(&Document) -> Vec<Candidate>,
    {
        let normalized_query = self.builder.normalizer().normalize(query);
        let mut best: Option<(usize, Candidate, usize)> = None;

        for (document_index, document) in corpus.iter().enumerate() {
            let candidates = extract(document);
            let values: Vec<&str> = candidates.iter().map(|c| c.value.as_str()).collect();

            let Some(hit) = find_best_match(&normalized_query, &values, usize::MAX) else {
                continue;
            };

            if best.as_ref().is_none_or(|(_, _, d)| hit.distance < *d) {
                best = Some((document_index, candidates[hit.index].clone(), hit.distance));
            }
        }

        let Some((document_index, candidate, distance)) = best else {
            tracing::debug!(query = %query, "No candidates in corpus of {} documents", corpus.len());
            return Resolution::NoCandidates;
        };

        if distance > self.threshold {
            tracing::debug!(
                query = %query,
                closest_distance = distance,
                threshold = self.threshold,
                "No match within threshold"
            );
            return Resolution::NotFound {
                closest_distance: distance,
            };
        }

        let document = &corpus[document_index];
        tracing::debug!(
            query = %query,
            identifier = %document.identifier,
            field = %candidate.field,
            distance,
            "Resolved name"
        );

        Resolution::Found(ResolvedMatch {
            document,
            document_index,
            field: candidate.field,
            matched_value: candidate.value,
            distance,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("s3_bucket", "r/s3_bucket.html.markdown").with_heading("Versioning"),
            Document::new("ec2_instance", "r/instance.html.markdown")
                .with_argument("vpc_security_group_ids"),
        ]
    }

    #[test]
    fn test_typo_resolves_to_identifier() {
        let corpus = corpus();
        let found = Resolver::default().resolve("s3 buket", &corpus).found().unwrap();
        assert_eq!(found.identifier(), "s3_bucket");
        assert_eq!(found.locator(), "r/s3_bucket.html.markdown");
        assert_eq!(found.document_index, 0);
        assert_eq!(found.field, CandidateField::Identifier);
        assert_eq!(found.matched_value, "s3bucket");
        assert_eq!(found.distance, 1);
    }

    #[test]
    fn test_argument_name_match() {
        let corpus = corpus();
        let found = Resolver::default()
            .resolve("vpc_security_group_ids", &corpus)
            .found()
            .unwrap();
        assert_eq!(found.identifier(), "ec2_instance");
        assert_eq!(found.field, CandidateField::ArgumentName);
        assert_eq!(found.distance, 0);
    }

    #[test]
    fn test_gibberish_not_found() {
        let corpus = corpus();
        let resolution = Resolver::default().resolve("qqqzzzxxx", &corpus);
        assert!(matches!(resolution, Resolution::NotFound { closest_distance } if closest_distance > 3));
    }

    #[test]
    fn test_placeholder_category_never_matches() {
        let corpus = vec![Document::new("kinesis_stream", "r/kinesis_stream.html.markdown")
            .with_category("(missing)")];
        let resolution = Resolver::default().resolve("missing", &corpus);
        assert!(!resolution.is_found());
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(Resolver::default().resolve("s3", &[]), Resolution::NoCandidates);
    }

    #[test]
    fn test_all_placeholder_corpus_has_no_candidates() {
        let corpus = vec![Document::new("", "r/x.html.markdown").with_category("(malformed)")];
        assert_eq!(Resolver::default().resolve("x", &corpus), Resolution::NoCandidates);
    }

    #[test]
    fn test_earliest_document_wins_tie() {
        let corpus = vec![
            Document::new("alpha", "r/a").with_heading("Logging"),
            Document::new("logging", "r/b"),
        ];
        let found = Resolver::default().resolve("logging", &corpus).found().unwrap();
        assert_eq!(found.document_index, 0);
        assert_eq!(found.field, CandidateField::Heading);
    }

    #[test]
    fn test_field_order_breaks_tie_within_document() {
        let corpus = vec![Document::new("tags", "r/a")
            .with_title("Tags")
            .with_argument("tags")];
        let found = Resolver::default().resolve("tags", &corpus).found().unwrap();
        assert_eq!(found.field, CandidateField::Identifier);
    }

    #[test]
    fn test_global_minimum_beats_earlier_document() {
        let corpus = vec![
            Document::new("s3_buckets", "r/a"),
            Document::new("s3_bucket", "r/b"),
        ];
        let found = Resolver::default().resolve("s3_bucket", &corpus).found().unwrap();
        assert_eq!(found.document_index, 1);
        assert_eq!(found.distance, 0);
    }

    #[test]
    fn test_check_query_rejects_names_that_normalize_away() {
        let resolver = Resolver::default();
        assert_eq!(resolver.check_query("  s3 bucket ").unwrap(), "s3 bucket");
        for query in ["???", "---", "aws-", "amazon_", "   "] {
            assert!(
                matches!(resolver.check_query(query), Err(DocError::InvalidInput(_))),
                "{query:?} should be rejected"
            );
        }
        // A bare vendor name with no separator is still a real word
        assert_eq!(resolver.check_query("aws").unwrap(), "aws");
    }

    #[test]
    fn test_custom_threshold() {
        let corpus = corpus();
        let strict = Resolver::new(&ResolverConfig::default().with_threshold(0));
        assert!(!strict.resolve("s3 buket", &corpus).is_found());
        assert!(strict.resolve("s3 bucket", &corpus).is_found());
    }

    #[test]
    fn test_resolve_with_custom_extraction() {
        let corpus = corpus();
        let resolver = Resolver::default();
        let only_headings = |doc: &Document| -> Vec<Candidate> {
            doc.headings
                .iter()
                .map(|h| Candidate::new(CandidateField::Heading, h.to_lowercase()))
                .collect()
        };
        let found = resolver
            .resolve_with("versioning", &corpus, only_headings)
            .found()
            .unwrap();
        assert_eq!(found.identifier(), "s3_bucket");
        assert_eq!(found.field, CandidateField::Heading);

        let resolution = resolver.resolve_with("ec2 instance", &corpus, only_headings);
        assert!(!resolution.is_found());
    }
}

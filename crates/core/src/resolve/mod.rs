// Fuzzy name resolution over a multi-field document corpus

pub mod candidates;
pub mod distance;
pub mod matcher;
pub mod normalize;
pub mod resolver;

pub use candidates::CandidateBuilder;
pub use distance::levenshtein;
pub use matcher::{find_best_match, BestMatch};
pub use normalize::{normalize, Normalizer};
pub use resolver::{Resolution, ResolvedMatch, Resolver};

// Label canonicalization for fuzzy comparison

use crate::config::ResolverConfig;

/// Canonicalizes labels into lowercase alphanumeric tokens.
///
/// A single leading vendor word (e.g. `aws_`, `Amazon `) is dropped when it
/// is followed by a separator. The output never contains separators, so
/// normalizing twice gives the same result as normalizing once.
#[derive(Debug, Clone)]
pub struct Normalizer {
    vendor_prefixes: Vec<String>,
}

impl Normalizer {
    pub fn new<I, S>(vendor_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vendor_prefixes: vendor_prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(&config.vendor_prefixes)
    }

    pub fn normalize(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        let stripped = self.strip_vendor_prefix(&lowered);

        stripped
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }

    fn strip_vendor_prefix<'a>(&self, lowered: &'a str) -> &'a str {
        for prefix in &self.vendor_prefixes {
            if let Some(rest) = lowered.strip_prefix(prefix.as_str()) {
                let mut chars = rest.chars();
                if let Some(sep) = chars.next() {
                    if !sep.is_alphanumeric() {
                        return chars.as_str();
                    }
                }
            }
        }
        lowered
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// Normalize with the default vendor prefix set
pub fn normalize(input: &str) -> String {
    Normalizer::default().normalize(input)
}

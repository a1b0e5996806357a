// Nearest-candidate selection with a distance threshold

use super::distance::levenshtein;

/// Winning candidate from [`find_best_match`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch<'a> {
    pub matched_value: &'a str,
    pub index: usize,
    pub distance: usize,
}

/// Returns the candidate nearest to `target`, or `None` when `candidates`
/// is empty or the nearest one is further than `threshold`.
///
/// Ties go to the lowest index. `target` is compared as given; callers
/// normalize both sides beforehand.
pub fn find_best_match<'a, S>(
    target: &str,
    candidates: &'a [S],
    threshold: usize,
) -> Option<BestMatch<'a>>
where
    S: AsRef<str>,
{
    let mut best: Option<BestMatch<'a>> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let distance = levenshtein(target, candidate);
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(BestMatch {
                matched_value: candidate,
                index,
                distance,
            });
        }
    }

    best.filter(|b| b.distance <= threshold)
}

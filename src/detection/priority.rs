//! Ranking of facet results.
//!
//! A magic match outranks everything without one, then member matches, then
//! pattern matches. Results with the same three booleans are tied and keep
//! their registration order.

use std::cmp::Ordering;

/// Which facets of one definition matched.
///
/// Facets a definition does not declare are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FacetMatch {
    pub magic: bool,
    pub members: bool,
    pub pattern: bool,
}

impl FacetMatch {
    /// Nothing matched.
    pub const NONE: FacetMatch = FacetMatch {
        magic: false,
        members: false,
        pattern: false,
    };

    pub fn any(&self) -> bool {
        self.magic || self.members || self.pattern
    }

    /// Priority comparison; `Less` means `self` ranks higher.
    pub fn rank_cmp(&self, other: &FacetMatch) -> Ordering {
        other
            .magic
            .cmp(&self.magic)
            .then_with(|| other.members.cmp(&self.members))
            .then_with(|| other.pattern.cmp(&self.pattern))
    }
}

/// Keep the results tied at the best rank, in their original order.
///
/// Results that matched nothing are dropped first; an empty input or one with
/// no matches at all gives an empty output.
pub fn select_best<T>(results: Vec<(FacetMatch, T)>) -> Vec<T> {
    let mut matched: Vec<(FacetMatch, T)> =
        results.into_iter().filter(|(facets, _)| facets.any()).collect();

    // stable sort keeps registration order among ties
    matched.sort_by(|(a, _), (b, _)| a.rank_cmp(b));

    let Some(best) = matched.first().map(|(facets, _)| *facets) else {
        return Vec::new();
    };

    matched
        .into_iter()
        .take_while(|(facets, _)| facets.rank_cmp(&best) == Ordering::Equal)
        .map(|(_, item)| item)
        .collect()
}

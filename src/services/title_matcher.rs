use strsim::normalized_levenshtein;

use crate::models::normalize_title;

/// Minimum similarity ratio for a fuzzy title match
pub const DEFAULT_CUTOFF: f64 = 0.4;

/// How many ranked candidates are considered per query
pub const MAX_CANDIDATES: usize = 5;

/// A known title that approximately matches a query
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    /// Row of the matched game in the dataset
    pub index: usize,
    /// Normalized title that matched
    pub title: String,
    /// Similarity ratio in [0, 1]
    pub score: f64,
}

/// Approximate title lookup over the normalized dataset titles
///
/// Titles are compared with a character-level edit-distance ratio. Candidates
/// below the cutoff are discarded; equal ratios keep dataset row order.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    titles: Vec<String>,
    cutoff: f64,
}

impl TitleMatcher {
    pub fn new(titles: Vec<String>, cutoff: f64) -> Self {
        Self {
            titles,
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Up to [`MAX_CANDIDATES`] titles at or above the cutoff, best first
    pub fn close_matches(&self, query: &str) -> Vec<TitleMatch> {
        let query = normalize_title(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<(usize, f64)> = self
            .titles
            .iter()
            .enumerate()
            .map(|(index, title)| (index, normalized_levenshtein(&query, title)))
            .filter(|(_, score)| *score >= self.cutoff)
            .collect();

        // stable: ties stay in row order
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(MAX_CANDIDATES);

        candidates
            .into_iter()
            .map(|(index, score)| TitleMatch {
                index,
                title: self.titles[index].clone(),
                score,
            })
            .collect()
    }

    /// The single best match for a query, if any clears the cutoff
    pub fn best_match(&self, query: &str) -> Option<TitleMatch> {
        let best = self.close_matches(query).into_iter().next();
        match &best {
            Some(m) => tracing::debug!(query, matched = %m.title, score = m.score, "Title matched"),
            None => tracing::debug!(query, cutoff = self.cutoff, "No title match"),
        }
        best
    }
}

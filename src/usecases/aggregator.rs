//! Aggregation of fetched and classified comments into summary artifacts.
//!
//! Pure computation: no I/O, no rendering. The presentation layer consumes the result as-is.

use crate::domain::terms::{is_noise, tokenize};
use crate::domain::{
    AggregationResult, Comment, LabeledComment, SentimentLabel, TermGroup, TermWeight,
};
use crate::shared::config::{DEFAULT_MAX_TERMS, DEFAULT_TOP_LIKED_CAP};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    top_liked_cap: usize,
    max_terms: usize,
}

impl Aggregator {
    pub fn new(top_liked_cap: usize, max_terms: usize) -> Self {
        Self {
            top_liked_cap,
            max_terms,
        }
    }

    /// Build the full result. `comments` feeds the top-liked ranking, `labeled` everything else.
    pub fn aggregate(&self, labeled: &[LabeledComment], comments: &[Comment]) -> AggregationResult {
        let label_counts = label_counts(labeled);

        let mut term_frequency_by_label = BTreeMap::new();
        term_frequency_by_label.insert(
            TermGroup::All,
            term_frequencies(labeled.iter().map(|l| l.comment.text.as_str()), self.max_terms),
        );
        for label in label_counts.keys() {
            let members = labeled
                .iter()
                .filter(|l| &l.label == label)
                .map(|l| l.comment.text.as_str());
            term_frequency_by_label.insert(
                TermGroup::Label(label.clone()),
                term_frequencies(members, self.max_terms),
            );
        }

        AggregationResult {
            top_liked: top_liked(comments, self.top_liked_cap),
            label_counts,
            term_frequency_by_label,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_LIKED_CAP, DEFAULT_MAX_TERMS)
    }
}

/// Most-liked comments, descending. Stable: ties keep fetch order.
pub fn top_liked(comments: &[Comment], cap: usize) -> Vec<Comment> {
    let mut ranked = comments.to_vec();
    ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    ranked.truncate(cap);
    ranked
}

/// Tally by label. Positive and negative are always present, other labels when seen.
pub fn label_counts(labeled: &[LabeledComment]) -> BTreeMap<SentimentLabel, usize> {
    let mut counts: BTreeMap<SentimentLabel, usize> =
        SentimentLabel::BASELINE.into_iter().map(|l| (l, 0)).collect();
    for l in labeled {
        *counts.entry(l.label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Frequency-ranked terms over `texts`, at most `max_terms`.
///
/// Case-insensitive, punctuation stripped, stop words and bare numbers removed.
/// Ordered by count descending, then alphabetically. Empty input gives an empty list.
pub fn term_frequencies<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    max_terms: usize,
) -> Vec<TermWeight> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenize(text).filter(|t| !is_noise(t)) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_terms);

    let max = ranked.first().map(|(_, c)| *c).unwrap_or(0);
    ranked
        .into_iter()
        .map(|(term, count)| TermWeight {
            term,
            count,
            weight: count as f64 / max as f64,
        })
        .collect()
}

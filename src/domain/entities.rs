//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP or model types here; adapters map into these.

use crate::domain::VideoRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A top-level comment as returned by the listing endpoint. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub like_count: u64,
}

impl Comment {
    pub fn new(text: impl Into<String>, like_count: u64) -> Self {
        Self {
            text: text.into(),
            like_count,
        }
    }
}

/// One page of the remote comment listing.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    /// Continuation cursor. `None` when the source is exhausted.
    pub next_page_token: Option<String>,
}

/// Aggregate engagement for a video. Dislikes are not reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub like_count: u64,
}

/// Classifier output category.
///
/// Known names are parsed case-insensitively; anything else is kept verbatim
/// under `Other` so it is still counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl SentimentLabel {
    /// Labels that always appear in aggregation output, even with zero members.
    pub const BASELINE: [SentimentLabel; 2] = [SentimentLabel::Positive, SentimentLabel::Negative];

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Other(s) => s,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SentimentLabel {
    fn from(s: String) -> Self {
        SentimentLabel::parse(&s)
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        label.as_str().to_string()
    }
}

/// Comment paired with the label the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub label: SentimentLabel,
}

/// Key of a term-frequency list: every comment, or the members of one label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum TermGroup {
    All,
    Label(SentimentLabel),
}

impl fmt::Display for TermGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermGroup::All => f.write_str("all"),
            TermGroup::Label(label) => label.fmt(f),
        }
    }
}

impl From<TermGroup> for String {
    fn from(group: TermGroup) -> Self {
        group.to_string()
    }
}

/// A term with its raw count and its weight relative to the most frequent term of the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub count: usize,
    /// `count / max_count` within the group, in (0, 1].
    pub weight: f64,
}

/// Derived summary artifacts. Computed fresh per analysis, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Descending by likes, ties in fetch order.
    pub top_liked: Vec<Comment>,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
    pub term_frequency_by_label: BTreeMap<TermGroup, Vec<TermWeight>>,
}

impl AggregationResult {
    pub fn count_for(&self, label: &SentimentLabel) -> usize {
        self.label_counts.get(label).copied().unwrap_or(0)
    }

    pub fn terms_for(&self, group: &TermGroup) -> &[TermWeight] {
        self.term_frequency_by_label
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Share of comments carrying `label`, in [0, 1]. Zero when nothing was classified.
    pub fn ratio(&self, label: &SentimentLabel) -> f64 {
        let total: usize = self.label_counts.values().sum();
        if total == 0 {
            0.0
        } else {
            self.count_for(label) as f64 / total as f64
        }
    }
}

/// Everything the presentation layer needs for one analyzed video.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub video: VideoRef,
    pub engagement: EngagementStats,
    pub comments: Vec<LabeledComment>,
    pub aggregation: AggregationResult,
    pub analyzed_at: DateTime<Utc>,
}

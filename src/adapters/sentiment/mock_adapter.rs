//! Mock sentiment adapter for testing without model artifacts.
//!
//! Keyword lexicon: more positive hits than negative => positive, fewer => negative,
//! otherwise neutral.

use crate::domain::terms::tokenize;
use crate::domain::{DomainError, SentimentLabel};
use crate::ports::SentimentPort;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "best", "excellent", "good", "great", "helpful", "love", "loved",
    "nice", "perfect", "thanks", "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "boring", "hate", "horrible", "terrible", "useless", "waste", "worst",
    "wrong",
];

/// Mock sentiment model.
///
/// Returns lexicon-based labels without loading artifacts.
/// Simulates inference latency with configurable delay and counts calls.
pub struct MockSentimentAdapter {
    /// Simulated inference delay in milliseconds.
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockSentimentAdapter {
    /// Create a new mock adapter with no delay.
    pub fn new() -> Self {
        Self::with_delay(0)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `predict` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn label_for(text: &str) -> SentimentLabel {
        let (mut pos, mut neg) = (0usize, 0usize);
        for token in tokenize(text) {
            if POSITIVE_WORDS.contains(&token.as_str()) {
                pos += 1;
            } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                neg += 1;
            }
        }
        match pos.cmp(&neg) {
            std::cmp::Ordering::Greater => SentimentLabel::Positive,
            std::cmp::Ordering::Less => SentimentLabel::Negative,
            std::cmp::Ordering::Equal => SentimentLabel::Neutral,
        }
    }
}

impl Default for MockSentimentAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SentimentPort for MockSentimentAdapter {
    async fn predict(&self, texts: &[String]) -> Result<Vec<SentimentLabel>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(count = texts.len(), "[MOCK] Simulating sentiment inference");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        Ok(texts.iter().map(|t| Self::label_for(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter() {
        let adapter = MockSentimentAdapter::with_delay(5);
        let labels = adapter
            .predict(&[
                "Great video, loved it".to_string(),
                "Terrible content, waste of time".to_string(),
                "first".to_string(),
            ])
            .await
            .unwrap();

        assert_eq!(
            labels,
            vec![
                SentimentLabel::Positive,
                SentimentLabel::Negative,
                SentimentLabel::Neutral
            ]
        );
        assert_eq!(adapter.calls(), 1);
    }
}

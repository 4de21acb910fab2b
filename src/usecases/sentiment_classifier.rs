//! Sentiment classification use case. Guards the model boundary.
//!
//! - Never calls the model with zero rows
//! - Enforces the 1:1, order-preserving correspondence between input and labels

use crate::domain::{Comment, DomainError, LabeledComment, SentimentLabel};
use crate::ports::SentimentPort;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SentimentClassifier {
    model: Arc<dyn SentimentPort>,
}

impl SentimentClassifier {
    pub fn new(model: Arc<dyn SentimentPort>) -> Self {
        Self { model }
    }

    /// One label per input text, same order. Empty input yields empty output.
    pub async fn classify(&self, texts: &[String]) -> Result<Vec<SentimentLabel>, DomainError> {
        if texts.is_empty() {
            debug!("no comments to classify, skipping model");
            return Ok(Vec::new());
        }

        let labels = self.model.predict(texts).await?;
        if labels.len() != texts.len() {
            return Err(DomainError::Classifier(format!(
                "model returned {} labels for {} inputs",
                labels.len(),
                texts.len()
            )));
        }

        info!(count = labels.len(), "comments classified");
        Ok(labels)
    }

    /// Classify and attach labels to their comments.
    pub async fn label_comments(
        &self,
        comments: &[Comment],
    ) -> Result<Vec<LabeledComment>, DomainError> {
        let texts: Vec<String> = comments.iter().map(|c| c.text.clone()).collect();
        let labels = self.classify(&texts).await?;
        Ok(comments
            .iter()
            .cloned()
            .zip(labels)
            .map(|(comment, label)| LabeledComment { comment, label })
            .collect())
    }
}

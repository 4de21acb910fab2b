//! Analysis service. Orchestrates the comment sentiment pipeline for one video.
//!
//! Coordinates between the comment source, engagement source, sentiment model and aggregator.

use crate::domain::{AnalysisReport, DomainError, VideoRef};
use crate::ports::{CommentSource, EngagementSource, SentimentPort};
use crate::shared::config::{AppConfig, DEFAULT_COMMENT_LIMIT};
use crate::shared::retry::RetryPolicy;
use crate::usecases::aggregator::Aggregator;
use crate::usecases::comment_fetcher::CommentFetcher;
use crate::usecases::engagement_reader::EngagementReader;
use crate::usecases::sentiment_classifier::SentimentClassifier;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Tunables of one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub comment_limit: usize,
    pub retry: RetryPolicy,
    pub aggregator: Aggregator,
}

impl AnalysisOptions {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            comment_limit: cfg.comment_limit_or_default(),
            retry: RetryPolicy::new(cfg.max_retries_or_default(), cfg.retry_backoff()),
            aggregator: Aggregator::new(cfg.top_liked_cap_or_default(), cfg.max_terms_or_default()),
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            comment_limit: DEFAULT_COMMENT_LIMIT,
            retry: RetryPolicy::default(),
            aggregator: Aggregator::default(),
        }
    }
}

/// Service for comment sentiment analysis.
///
/// Orchestrates the flow:
/// 1. Resolve the URL into a video identifier
/// 2. Fetch comments and engagement concurrently
/// 3. Classify every comment
/// 4. Aggregate into top-liked, label counts and term lists
pub struct AnalysisService {
    fetcher: CommentFetcher,
    reader: EngagementReader,
    classifier: SentimentClassifier,
    aggregator: Aggregator,
    comment_limit: usize,
}

impl AnalysisService {
    /// Create a new analysis service.
    ///
    /// # Arguments
    /// * `comments` - Comment listing implementation (YouTube Data API, fake, ...)
    /// * `engagement` - Statistics lookup implementation
    /// * `model` - Loaded sentiment model
    /// * `options` - Limits, retry policy and aggregation caps
    pub fn new(
        comments: Arc<dyn CommentSource>,
        engagement: Arc<dyn EngagementSource>,
        model: Arc<dyn SentimentPort>,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            fetcher: CommentFetcher::new(comments, options.retry),
            reader: EngagementReader::new(engagement, options.retry),
            classifier: SentimentClassifier::new(model),
            aggregator: options.aggregator,
            comment_limit: options.comment_limit,
        }
    }

    /// Resolve `url` and analyze the video. `DomainError::Parse` for unrecognized URLs.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisReport, DomainError> {
        let video = VideoRef::resolve(url)?;
        self.analyze(video).await
    }

    /// Run the pipeline. Either a complete report or an error, never a partial report.
    pub async fn analyze(&self, video: VideoRef) -> Result<AnalysisReport, DomainError> {
        info!(video_id = %video, limit = self.comment_limit, "analyzing video");

        // Both calls always complete so the reported failure does not depend on which
        // one fails first. A private video is refused by the listing (403) while the
        // statistics lookup reports it missing; NotFound wins.
        let (comments, engagement) = match tokio::join!(
            self.fetcher.fetch_comments(&video, self.comment_limit),
            self.reader.fetch_engagement(&video),
        ) {
            (Ok(comments), Ok(engagement)) => (comments, engagement),
            (Err(e @ DomainError::NotFound(_)), _)
            | (_, Err(e @ DomainError::NotFound(_))) => return Err(e),
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        let labeled = self.classifier.label_comments(&comments).await?;
        let aggregation = self.aggregator.aggregate(&labeled, &comments);

        info!(
            video_id = %video,
            comments = labeled.len(),
            likes = engagement.like_count,
            "analysis complete"
        );

        Ok(AnalysisReport {
            video,
            engagement,
            comments: labeled,
            aggregation,
            analyzed_at: Utc::now(),
        })
    }
}

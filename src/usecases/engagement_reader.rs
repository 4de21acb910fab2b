//! Engagement lookup: one statistics call per video, retried on transient failures.

use crate::domain::{DomainError, EngagementStats, VideoRef};
use crate::ports::EngagementSource;
use crate::shared::retry::RetryPolicy;
use std::sync::Arc;
use tracing::info;

pub struct EngagementReader {
    source: Arc<dyn EngagementSource>,
    retry: RetryPolicy,
}

impl EngagementReader {
    pub fn new(source: Arc<dyn EngagementSource>, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    pub async fn fetch_engagement(&self, video: &VideoRef) -> Result<EngagementStats, DomainError> {
        let stats = self
            .retry
            .run("engagement", || self.source.fetch_engagement(video))
            .await?;
        info!(video_id = %video, likes = stats.like_count, "engagement fetched");
        Ok(stats)
    }
}

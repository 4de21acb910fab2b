//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CommentPage, DomainError, EngagementStats, SentimentLabel, VideoRef};

/// Remote comment listing. One call = one page.
#[async_trait::async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch a single page of top-level comments in plain-text form.
    ///
    /// - `page_token`: `None` for the first page, otherwise the cursor of the previous page
    /// - `max_results`: page size requested (the endpoint caps it at 100)
    ///
    /// Comments disabled on the video yields an empty page, not an error.
    async fn fetch_comment_page(
        &self,
        video: &VideoRef,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentPage, DomainError>;
}

/// Remote statistics lookup.
#[async_trait::async_trait]
pub trait EngagementSource: Send + Sync {
    /// Returns `DomainError::NotFound` when the id does not name a public video.
    async fn fetch_engagement(&self, video: &VideoRef) -> Result<EngagementStats, DomainError>;
}

/// Pre-loaded sentiment model. Pure function of (loaded artifacts, input).
#[async_trait::async_trait]
pub trait SentimentPort: Send + Sync {
    /// Predict one label per input text, in input order.
    async fn predict(&self, texts: &[String]) -> Result<Vec<SentimentLabel>, DomainError>;
}

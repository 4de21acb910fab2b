//! Paginated comment fetch: request pages -> follow cursor -> stop at limit or exhaustion.
//!
//! - Requests `min(remaining, page_size)` per page so the last page is not over-fetched
//! - Each page call goes through the retry policy
//! - A later page that still fails after retries keeps the comments already collected

use crate::domain::{Comment, DomainError, VideoRef};
use crate::ports::CommentSource;
use crate::shared::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-page maximum of the comment-listing endpoint.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Comment fetcher. Drives `CommentSource` page by page.
pub struct CommentFetcher {
    source: Arc<dyn CommentSource>,
    retry: RetryPolicy,
    page_size: u32,
}

impl CommentFetcher {
    pub fn new(source: Arc<dyn CommentSource>, retry: RetryPolicy) -> Self {
        Self {
            source,
            retry,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Override the page size (clamped to 1..=100).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Fetch up to `limit` top-level comments, concatenated in page order.
    ///
    /// Returns an empty vec when the video has no comments or comments are disabled.
    pub async fn fetch_comments(
        &self,
        video: &VideoRef,
        limit: usize,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = Vec::with_capacity(limit.min(1000));
        if limit == 0 {
            return Ok(comments);
        }

        let mut page_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            let remaining = limit - comments.len();
            let max_results = remaining.min(self.page_size as usize) as u32;
            let token = page_token.as_deref();

            let result = self
                .retry
                .run("comment page", || {
                    self.source.fetch_comment_page(video, token, max_results)
                })
                .await;

            let batch = match result {
                Ok(batch) => batch,
                Err(e) if e.is_transient() && page > 1 => {
                    warn!(
                        video_id = %video,
                        page,
                        fetched = comments.len(),
                        error = %e,
                        "page failed after retries, keeping partial results"
                    );
                    break;
                }
                Err(e) => return Err(e),
            };

            let received = batch.comments.len();
            comments.extend(batch.comments.into_iter().take(remaining));
            debug!(
                video_id = %video,
                page,
                received,
                fetched = comments.len(),
                "fetched comment page"
            );

            match batch.next_page_token {
                Some(next) if received > 0 && comments.len() < limit => page_token = Some(next),
                _ => break,
            }
        }

        info!(
            video_id = %video,
            count = comments.len(),
            pages = page,
            "comments fetched"
        );
        Ok(comments)
    }
}

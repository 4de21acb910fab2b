//! Implements CommentSource and EngagementSource against the YouTube Data API v3.
//!
//! One HTTP request per port call; pagination and retry live in the use cases.
//! Every request is bounded by the client timeout.

use crate::adapters::youtube::dto::{CommentThreadListResponse, VideoListResponse};
use crate::adapters::youtube::mapper::{self, ApiFailure};
use crate::domain::{CommentPage, DomainError, EngagementStats, VideoRef};
use crate::ports::{CommentSource, EngagementSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// YouTube Data API adapter. Cheap to share behind `Arc`; reqwest pools connections.
pub struct YouTubeDataApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeDataApi {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://www.googleapis.com/youtube/v3")
    /// * `api_key` - Data API key
    /// * `timeout` - Upper bound for each request, connect included
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body, or return the classified failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        video: &VideoRef,
    ) -> Result<T, ApiFailure> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ApiFailure::Error(transport_error(endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, status = %status, video_id = %video, "YouTube API returned error");
            return Err(mapper::failure_from_response(status.as_u16(), &body, video));
        }

        response.json::<T>().await.map_err(|e| {
            let err = if e.is_timeout() {
                DomainError::Transient(format!("{}: body read timed out", endpoint))
            } else {
                DomainError::Api(format!("{}: failed to parse response: {}", endpoint, e))
            };
            ApiFailure::Error(err)
        })
    }
}

/// Anything failing before a status line (DNS, connect, timeout, reset) is worth a retry.
fn transport_error(endpoint: &str, e: reqwest::Error) -> DomainError {
    if e.is_builder() {
        DomainError::Config(format!("{}: invalid request: {}", endpoint, e))
    } else {
        DomainError::Transient(format!("{}: {}", endpoint, e))
    }
}

#[async_trait]
impl CommentSource for YouTubeDataApi {
    async fn fetch_comment_page(
        &self,
        video: &VideoRef,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentPage, DomainError> {
        let max_results = max_results.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video.as_str()),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        match self
            .get_json::<CommentThreadListResponse>("commentThreads", &query, video)
            .await
        {
            Ok(resp) => {
                let page = mapper::comment_page_from_response(resp);
                debug!(
                    video_id = %video,
                    count = page.comments.len(),
                    has_next = page.next_page_token.is_some(),
                    "comment page received"
                );
                Ok(page)
            }
            Err(ApiFailure::CommentsDisabled) => {
                warn!(video_id = %video, "comments are disabled for this video");
                Ok(CommentPage::default())
            }
            Err(ApiFailure::Error(e)) => Err(e),
        }
    }
}

#[async_trait]
impl EngagementSource for YouTubeDataApi {
    async fn fetch_engagement(&self, video: &VideoRef) -> Result<EngagementStats, DomainError> {
        let query = [("part", "statistics"), ("id", video.as_str())];
        match self
            .get_json::<VideoListResponse>("videos", &query, video)
            .await
        {
            Ok(resp) => mapper::engagement_from_response(resp, video),
            Err(ApiFailure::CommentsDisabled) => {
                Err(DomainError::Api("unexpected commentsDisabled on videos".into()))
            }
            Err(ApiFailure::Error(e)) => Err(e),
        }
    }
}

//! Map Data API wire types and failures to domain types.

use crate::adapters::youtube::dto::{
    CommentThreadListResponse, ErrorEnvelope, VideoListResponse,
};
use crate::domain::{Comment, CommentPage, DomainError, EngagementStats, VideoRef};

/// Error reasons that mean "slow down", not "give up".
const RATE_LIMIT_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Outcome of a non-success response.
#[derive(Debug)]
pub enum ApiFailure {
    /// The owner disabled comments. Treated as an empty listing.
    CommentsDisabled,
    Error(DomainError),
}

/// Map a comment-thread page to the domain page. Requested as `textFormat=plainText`,
/// so `textDisplay` is kept exactly as the author typed it.
pub fn comment_page_from_response(resp: CommentThreadListResponse) -> CommentPage {
    let comments = resp
        .items
        .into_iter()
        .map(|thread| {
            let snippet = thread.snippet.top_level_comment.snippet;
            Comment {
                text: snippet.text_display,
                like_count: snippet.like_count,
            }
        })
        .collect();
    CommentPage {
        comments,
        next_page_token: resp.next_page_token.filter(|t| !t.is_empty()),
    }
}

/// Map a statistics lookup. No items means the video is missing or private.
/// A missing or unparsable like count is 0.
pub fn engagement_from_response(
    resp: VideoListResponse,
    video: &VideoRef,
) -> Result<EngagementStats, DomainError> {
    let item = resp
        .items
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::NotFound(video.to_string()))?;
    let like_count = item
        .statistics
        .and_then(|s| s.like_count)
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(0);
    Ok(EngagementStats { like_count })
}

/// Classify an error response by status and the first reported reason.
pub fn failure_from_response(status: u16, body: &str, video: &VideoRef) -> ApiFailure {
    let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => (
            env.error
                .errors
                .into_iter()
                .next()
                .map(|d| d.reason)
                .unwrap_or_default(),
            env.error.message,
        ),
        Err(_) => (String::new(), body.chars().take(200).collect()),
    };

    if reason == "commentsDisabled" {
        return ApiFailure::CommentsDisabled;
    }
    let err = if status == 404 || reason == "videoNotFound" {
        DomainError::NotFound(video.to_string())
    } else if status == 429
        || status >= 500
        || (status == 403 && RATE_LIMIT_REASONS.contains(&reason.as_str()))
    {
        DomainError::Transient(format!("HTTP {} {}: {}", status, reason, message))
    } else {
        DomainError::Api(format!("HTTP {} {}: {}", status, reason, message))
    };
    ApiFailure::Error(err)
}

//! Video identifier resolution. Turns a user-supplied URL into a canonical `VideoRef`.

use crate::domain::DomainError;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Short-link host: the identifier is the first path segment.
const SHORT_LINK_HOST: &str = "youtu.be";

/// Canonical hosts: the identifier is the `v` query parameter.
const CANONICAL_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com"];

const MAX_ID_LEN: usize = 64;

/// Canonical video identifier. Only produced by [`VideoRef::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoRef(String);

impl VideoRef {
    /// Resolve a short-link or canonical YouTube URL.
    ///
    /// Never panics; every unrecognized shape is `DomainError::Parse`.
    pub fn resolve(url: &str) -> Result<Self, DomainError> {
        let input = url.trim();
        let parsed = Url::parse(input).map_err(|_| DomainError::Parse(input.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::Parse(input.to_string()));
        }
        let host = parsed
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| DomainError::Parse(input.to_string()))?;

        let candidate = if host == SHORT_LINK_HOST {
            parsed
                .path_segments()
                .and_then(|mut segs| segs.next())
                .map(str::to_string)
        } else if CANONICAL_HOSTS.contains(&host.as_str()) {
            parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
        } else {
            None
        };

        match candidate {
            Some(id) if is_valid_id(&id) => Ok(VideoRef(id)),
            _ => Err(DomainError::Parse(input.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> Option<String> {
        VideoRef::resolve(url).ok().map(|v| v.as_str().to_string())
    }

    #[test]
    fn short_link_and_canonical_resolve_to_same_ref() {
        let short = VideoRef::resolve("https://youtu.be/abc123XYZ0").unwrap();
        let canonical =
            VideoRef::resolve("https://www.youtube.com/watch?v=abc123XYZ0&t=10").unwrap();
        assert_eq!(short.as_str(), "abc123XYZ0");
        assert_eq!(short, canonical);
    }

    #[test]
    fn accepts_host_variants_and_surrounding_whitespace() {
        assert_eq!(
            id("  https://youtube.com/watch?v=dQw4w9WgXcQ \n").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(id("http://YOUTU.BE/dQw4w9WgXcQ?si=tracking").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("https://youtu.be/a-b_c/extra").as_deref(), Some("a-b_c"));
    }

    #[test]
    fn foreign_hosts_are_parse_errors() {
        assert!(matches!(
            VideoRef::resolve("https://example.com/abc123XYZ0"),
            Err(DomainError::Parse(_))
        ));
        assert!(id("https://example.com/watch?v=abc123XYZ0").is_none());
        assert!(id("https://notyoutube.com/watch?v=abc123XYZ0").is_none());
    }

    #[test]
    fn missing_component_is_parse_error() {
        assert!(id("https://youtu.be/").is_none());
        assert!(id("https://www.youtube.com/watch").is_none());
        assert!(id("https://www.youtube.com/watch?v=").is_none());
        assert!(id("https://www.youtube.com/watch?list=PL123").is_none());
    }

    #[test]
    fn malformed_input_never_panics() {
        for input in [
            "",
            "   ",
            "not a url",
            "youtu.be/abc",
            "ftp://youtu.be/abc",
            "https://",
            "https://youtu.be/%%%",
            "https://youtu.be/abc def",
        ] {
            assert!(id(input).is_none(), "{input:?} should not resolve");
        }
    }
}

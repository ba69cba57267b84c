use serde::{Deserialize, Serialize};

use super::Location;

/// Post entity - a short geo-tagged message with an attached image.
///
/// Posts carry no identity of their own; the index assigns them an opaque id
/// at ingestion time. Once indexed a post is never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Username of the authenticated author.
    #[serde(rename = "user")]
    pub author: String,
    pub message: String,
    pub location: Location,
    #[serde(rename = "url", default)]
    pub media_url: Option<String>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        author: impl Into<String>,
        message: impl Into<String>,
        location: Location,
        media_url: Option<String>,
    ) -> Self {
        Self {
            author: author.into(),
            message: message.into(),
            location,
            media_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_names() {
        let post = Post::new(
            "abc123",
            "hello",
            Location::new(37.0, -120.0),
            Some("https://media.example/p1".to_string()),
        );

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["user"], "abc123");
        assert_eq!(value["message"], "hello");
        assert_eq!(value["location"]["lat"], 37.0);
        assert_eq!(value["url"], "https://media.example/p1");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{StudioError, StudioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Text,
    Image,
    Video,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "TEXT",
            ContentType::Image => "IMAGE",
            ContentType::Video => "VIDEO",
        }
    }
}

/// A post on the studio feed. Media posts carry a `url`, text posts usually don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContent {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: Option<String>,
}

impl NewContent {
    /// Checks required fields and the size of inline `data:` uploads.
    pub fn validate(&self, max_upload_size_mb: u32) -> StudioResult<()> {
        if self.title.trim().is_empty() {
            return Err(StudioError::Validation("Title is required".to_string()));
        }

        if let Some(url) = &self.url {
            if let Some(size) = inline_payload_size(url) {
                let limit = u64::from(max_upload_size_mb) * 1024 * 1024;
                if size > limit {
                    return Err(StudioError::Validation(format!(
                        "File size exceeds limit of {}MB.",
                        max_upload_size_mb
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn into_item(self, id: Uuid, now: DateTime<Utc>) -> ContentItem {
        let url = match (self.url, self.content_type) {
            (Some(url), _) => Some(url),
            (None, ContentType::Text) => None,
            (None, _) => Some(format!(
                "https://picsum.photos/seed/{}/800/600",
                now.timestamp_millis()
            )),
        };

        ContentItem {
            id,
            content_type: self.content_type,
            title: self.title,
            description: self.description,
            url,
            timestamp: now,
        }
    }
}

/// Decoded byte size of a base64 `data:` URL, `None` for ordinary links.
fn inline_payload_size(url: &str) -> Option<u64> {
    let rest = url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(',')?;
    Some(payload.len() as u64 * 3 / 4)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub description: String,
}

/// Newest posts first.
pub fn sort_feed(items: &mut [ContentItem]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

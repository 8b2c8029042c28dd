use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Time;

/// number of characters of the target message kept in a reply preview
pub const REPLY_PREVIEW_LEN: usize = 100;

/// a chat message as mirrored by the client. the live `message` event carries
/// these fields inline; `history` carries them as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub from: String,
    pub content: String,
    pub timestamp: Time,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<ReplyInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<ReactionGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbedInfo>,
}

/// info about a replied-to message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyInfo {
    pub id: String,
    pub from: String,
    pub content_preview: String,
}

impl ReplyInfo {
    /// build a reply target, truncating the content to the preview length
    pub fn new(id: impl Into<String>, from: impl Into<String>, content: &str) -> Self {
        let content_preview = match content.char_indices().nth(REPLY_PREVIEW_LEN) {
            Some((idx, _)) => content[..idx].to_owned(),
            None => content.to_owned(),
        };
        Self {
            id: id.into(),
            from: from.into(),
            content_preview,
        }
    }
}

/// grouped reactions on a message. the group disappears when the last user
/// removes theirs; `count` always equals the number of user ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionGroup {
    pub emoji: String,
    pub count: usize,
    pub user_ids: Vec<String>,
}

/// metadata for an uploaded file attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
}

/// open graph link preview resolved by the server after send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedInfo {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

/// unread message count for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub channel_name: String,
    pub count: i64,
}

/// a pinned message, denormalized with enough content to render the pins
/// panel without a second fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedMessage {
    pub id: String,
    pub message_id: String,
    pub channel_id: String,
    pub pinned_by: String,
    pub pinned_at: String,
    pub from: String,
    pub content: String,
    pub timestamp: String,
}

/// a personal bookmark, denormalized the same way as pins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub message_id: String,
    pub channel_id: String,
    pub from: String,
    pub content: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
}

/// one full-text search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub from: String,
    pub content: String,
    pub timestamp: Time,
    pub channel_id: String,
    pub channel_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<Time>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_preview_truncates_at_100_chars() {
        let long = "x".repeat(250);
        let reply = ReplyInfo::new("m1", "alice", &long);
        assert_eq!(reply.content_preview.chars().count(), REPLY_PREVIEW_LEN);

        let short = ReplyInfo::new("m2", "bob", "hi");
        assert_eq!(short.content_preview, "hi");
    }

    #[test]
    fn reply_preview_respects_char_boundaries() {
        let cyrillic = "п".repeat(150);
        let reply = ReplyInfo::new("m1", "alice", &cyrillic);
        assert_eq!(reply.content_preview.chars().count(), REPLY_PREVIEW_LEN);
    }

    #[test]
    fn message_omits_empty_collections() {
        let m = Message {
            id: Uuid::new_v4(),
            from: "alice".into(),
            content: "hi".into(),
            timestamp: Time::now_utc(),
            edited_at: None,
            reply_to: None,
            reactions: vec![],
            attachments: vec![],
            embeds: vec![],
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("reactions"));
        assert!(!json.contains("attachments"));
        assert!(!json.contains("edited_at"));
        // and they come back as empty, not as an error
        let back: Message = serde_json::from_str(&json).unwrap();
        assert!(back.reactions.is_empty());
    }
}

use serde::{Deserialize, Serialize};

/// the kind of channel. threads are channels with a parent; forum channels
/// hold only threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    #[default]
    Text,
    Voice,
    PublicThread,
    PrivateThread,
    Forum,
    Announcement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub server_id: String,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub member_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub channel_type: ChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_parent_message_id: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub slowmode_seconds: i32,
    #[serde(default)]
    pub is_nsfw: bool,
    #[serde(default)]
    pub is_announcement: bool,
}

/// a channel grouping header in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub position: i32,
}

/// minimal position info for reorder commands and events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPosition {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub name: String,
    pub channel_type: ChannelType,
    pub parent_message_id: Option<String>,
    pub archived: bool,
    pub auto_archive_minutes: i32,
    pub message_count: i64,
    pub created_at: String,
}

/// a tag posts in a forum channel can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumTag {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub moderated: bool,
    pub position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_type_uses_snake_case_strings() {
        assert_eq!(
            serde_json::to_string(&ChannelType::PublicThread).unwrap(),
            r#""public_thread""#
        );
        let t: ChannelType = serde_json::from_str(r#""announcement""#).unwrap();
        assert_eq!(t, ChannelType::Announcement);
    }

    #[test]
    fn channel_tolerates_minimal_wire_shape() {
        // older servers send only the identity fields
        let json = r##"{"id":"c1","server_id":"s1","name":"#general"}"##;
        let c: Channel = serde_json::from_str(json).unwrap();
        assert_eq!(c.channel_type, ChannelType::Text);
        assert_eq!(c.slowmode_seconds, 0);
        assert!(!c.is_nsfw);
    }
}

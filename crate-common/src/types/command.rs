use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ChannelPosition, PresenceStatus};

/// everything the client can ask of the server. fire-and-forget: there are no
/// request ids, every reply arrives as a broadcast [`super::ServerEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    // session
    ListServers,

    // servers
    CreateServer {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon_url: Option<String>,
    },
    JoinServer { server_id: String },
    LeaveServer { server_id: String },
    DeleteServer { server_id: String },

    // channels
    ListChannels { server_id: String },
    CreateChannel {
        server_id: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        category_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_private: Option<bool>,
    },
    DeleteChannel { server_id: String, channel: String },
    SetTopic {
        server_id: String,
        channel: String,
        topic: String,
    },
    JoinChannel { server_id: String, channel: String },
    PartChannel {
        server_id: String,
        channel: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    ReorderChannels {
        server_id: String,
        channels: Vec<ChannelPosition>,
    },
    SetSlowMode {
        server_id: String,
        channel: String,
        seconds: i32,
    },
    SetNsfw {
        server_id: String,
        channel: String,
        is_nsfw: bool,
    },
    SetAnnouncementChannel {
        server_id: String,
        channel: String,
        is_announcement: bool,
    },

    // messages
    SendMessage {
        server_id: String,
        channel: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attachment_ids: Option<Vec<String>>,
    },
    EditMessage { message_id: Uuid, content: String },
    DeleteMessage { message_id: Uuid },
    BulkDeleteMessages {
        server_id: String,
        channel: String,
        message_ids: Vec<String>,
    },
    /// page backwards; `before` is a message id, limit defaults to 50 and is
    /// capped at 200 server-side
    FetchHistory {
        server_id: String,
        channel: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        before: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
    },

    // reactions & typing
    AddReaction { message_id: Uuid, emoji: String },
    RemoveReaction { message_id: Uuid, emoji: String },
    Typing { server_id: String, channel: String },

    // members
    GetMembers { server_id: String, channel: String },
    UpdateMemberRole {
        server_id: String,
        user_id: String,
        role: String,
    },
    SetServerNickname {
        server_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
    },

    // roles
    ListRoles { server_id: String },
    CreateRole {
        server_id: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        permissions: i64,
    },
    UpdateRole {
        server_id: String,
        role_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        permissions: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<i32>,
    },
    DeleteRole { server_id: String, role_id: String },
    AssignRole {
        server_id: String,
        user_id: String,
        role_id: String,
    },
    RemoveRole {
        server_id: String,
        user_id: String,
        role_id: String,
    },

    // categories
    ListCategories { server_id: String },
    CreateCategory { server_id: String, name: String },
    UpdateCategory {
        server_id: String,
        category_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<i32>,
    },
    DeleteCategory {
        server_id: String,
        category_id: String,
    },

    // presence & profile
    SetPresence {
        status: PresenceStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_status: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        status_emoji: Option<String>,
    },
    GetPresences { server_id: String },
    GetUserProfile { user_id: String },

    // read state
    MarkRead {
        server_id: String,
        channel: String,
        message_id: String,
    },
    GetUnreadCounts { server_id: String },

    // search & notifications
    SearchMessages {
        server_id: String,
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<i64>,
    },
    UpdateNotificationSettings {
        server_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_id: Option<String>,
        level: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suppress_everyone: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        suppress_roles: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        muted: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mute_until: Option<String>,
    },
    GetNotificationSettings { server_id: String },

    // pins & threads
    PinMessage {
        server_id: String,
        channel: String,
        message_id: String,
    },
    UnpinMessage {
        server_id: String,
        channel: String,
        message_id: String,
    },
    GetPinnedMessages { server_id: String, channel: String },
    CreateThread {
        server_id: String,
        parent_channel: String,
        name: String,
        message_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_private: Option<bool>,
    },
    ArchiveThread {
        server_id: String,
        thread_id: String,
        archived: bool,
    },
    ListThreads { server_id: String, channel: String },

    // bookmarks
    AddBookmark {
        message_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    RemoveBookmark { message_id: String },
    ListBookmarks,

    // moderation
    KickMember {
        server_id: String,
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    BanMember {
        server_id: String,
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        delete_message_days: Option<i32>,
    },
    UnbanMember { server_id: String, user_id: String },
    ListBans { server_id: String },
    TimeoutMember {
        server_id: String,
        user_id: String,
        /// None lifts an existing timeout
        #[serde(skip_serializing_if = "Option::is_none")]
        timeout_until: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    GetAuditLog {
        server_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        action_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        before: Option<String>,
    },
    CreateAutomodRule {
        server_id: String,
        name: String,
        rule_type: String,
        config: String,
        action_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        timeout_duration_seconds: Option<i32>,
    },
    UpdateAutomodRule {
        server_id: String,
        rule_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        config: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        action_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        timeout_duration_seconds: Option<i32>,
    },
    DeleteAutomodRule { server_id: String, rule_id: String },
    ListAutomodRules { server_id: String },

    // community
    CreateInvite {
        server_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_uses: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        expires_in_hours: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_id: Option<String>,
    },
    ListInvites { server_id: String },
    DeleteInvite { server_id: String, invite_id: String },
    UseInvite { code: String },
    CreateEvent {
        server_id: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_id: Option<String>,
        start_time: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    ListEvents { server_id: String },
    UpdateEventStatus {
        server_id: String,
        event_id: String,
        status: String,
    },
    DeleteEvent { server_id: String, event_id: String },
    SetRsvp { event_id: String, status: String },
    RemoveRsvp { event_id: String },
    ListRsvps { event_id: String },
    UpdateCommunitySettings {
        server_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_discoverable: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        welcome_message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rules_text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    GetCommunitySettings { server_id: String },
    DiscoverServers {
        #[serde(skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    AcceptRules { server_id: String },
    FollowChannel {
        server_id: String,
        source_channel_id: String,
        target_server_id: String,
        target_channel_id: String,
    },
    UnfollowChannel { follow_id: String },
    ListChannelFollows { channel_id: String },
    CreateTemplate {
        server_id: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    ListTemplates { server_id: String },
    DeleteTemplate {
        server_id: String,
        template_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_are_snake_case() {
        let cmd = ClientCommand::ListServers;
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"{"type":"list_servers"}"#);

        let cmd = ClientCommand::GetPinnedMessages {
            server_id: "s".into(),
            channel: "#c".into(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""type":"get_pinned_messages""#));
    }

    #[test]
    fn send_message_omits_absent_options() {
        let cmd = ClientCommand::SendMessage {
            server_id: "srv1".into(),
            channel: "#general".into(),
            content: "hi".into(),
            reply_to: None,
            attachment_ids: None,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(!json.contains("reply_to"));
        assert!(!json.contains("attachment_ids"));
    }

    #[test]
    fn send_message_carries_reply_and_attachments() {
        let cmd = ClientCommand::SendMessage {
            server_id: "srv1".into(),
            channel: "#general".into(),
            content: "hi".into(),
            reply_to: Some("m9".into()),
            attachment_ids: Some(vec!["a1".into()]),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""reply_to":"m9""#));
        assert!(json.contains(r#""attachment_ids":["a1"]"#));
    }

    #[test]
    fn set_presence_uses_status_strings() {
        let cmd = ClientCommand::SetPresence {
            status: PresenceStatus::Dnd,
            custom_status: Some("busy".into()),
            status_emoji: None,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""status":"dnd""#));
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AttachmentInfo, AuditEntry, AutomodRule, Ban, Bookmark, Category, Channel, ChannelFollow,
    ChannelPosition, CommunitySettings, EmbedInfo, ForumTag, Invite, Member, Message,
    NotificationSetting, Presence, PinnedMessage, ReplyInfo, Role, Rsvp, ScheduledEvent,
    SearchResult, Server, Template, Thread, Time, UnreadCount, UserProfile,
};

/// everything the server can push down the socket. one JSON object per frame,
/// discriminated by `type`.
///
/// unknown discriminators decode to [`ServerEvent::Unknown`] so that newer
/// servers never break older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(clippy::large_enum_variant)]
pub enum ServerEvent {
    /// a message sent to a channel or as a DM
    Message {
        id: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        server_id: Option<String>,
        from: String,
        target: String,
        content: String,
        timestamp: Time,
        #[serde(skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_to: Option<ReplyInfo>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attachments: Option<Vec<AttachmentInfo>>,
    },

    MessageEdit {
        id: Uuid,
        server_id: String,
        channel: String,
        content: String,
        edited_at: Time,
    },

    MessageDelete {
        id: Uuid,
        server_id: String,
        channel: String,
    },

    /// link previews resolved asynchronously after the message was delivered
    MessageEmbed {
        message_id: Uuid,
        server_id: String,
        channel: String,
        embeds: Vec<EmbedInfo>,
    },

    ReactionAdd {
        message_id: Uuid,
        server_id: String,
        channel: String,
        user_id: String,
        nickname: String,
        emoji: String,
    },

    ReactionRemove {
        message_id: Uuid,
        server_id: String,
        channel: String,
        user_id: String,
        nickname: String,
        emoji: String,
    },

    TypingStart {
        server_id: String,
        channel: String,
        nickname: String,
    },

    Join {
        nickname: String,
        server_id: String,
        channel: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
    },

    Part {
        nickname: String,
        server_id: String,
        channel: String,
        reason: Option<String>,
    },

    /// user disconnected entirely, not just from one channel
    Quit {
        nickname: String,
        reason: Option<String>,
    },

    TopicChange {
        server_id: String,
        channel: String,
        set_by: String,
        topic: String,
    },

    NickChange { old_nick: String, new_nick: String },

    /// notice directed at this session only
    ServerNotice { message: String },

    /// full member list, sent on join and on request
    Names {
        server_id: String,
        channel: String,
        members: Vec<Member>,
    },

    /// current topic, sent on join
    Topic {
        server_id: String,
        channel: String,
        topic: String,
    },

    ChannelList {
        server_id: String,
        channels: Vec<Channel>,
    },

    /// history page, newest first; the client reverses before merging
    History {
        server_id: String,
        channel: String,
        messages: Vec<Message>,
        has_more: bool,
    },

    ServerList { servers: Vec<Server> },

    UnreadCounts {
        server_id: String,
        counts: Vec<UnreadCount>,
    },

    RoleList {
        server_id: String,
        roles: Vec<Role>,
    },

    RoleUpdate { server_id: String, role: Role },

    RoleDelete { server_id: String, role_id: String },

    MemberRoleUpdate {
        server_id: String,
        user_id: String,
        role_ids: Vec<String>,
    },

    CategoryList {
        server_id: String,
        categories: Vec<Category>,
    },

    CategoryUpdate {
        server_id: String,
        category: Category,
    },

    CategoryDelete {
        server_id: String,
        category_id: String,
    },

    ChannelReorder {
        server_id: String,
        channels: Vec<ChannelPosition>,
    },

    PresenceUpdate {
        server_id: String,
        presence: Presence,
    },

    /// bulk presence snapshot, sent on connect and on request
    PresenceList {
        server_id: String,
        presences: Vec<Presence>,
    },

    UserProfile { profile: UserProfile },

    ServerNicknameUpdate {
        server_id: String,
        user_id: String,
        nickname: Option<String>,
    },

    NotificationSettings {
        server_id: String,
        settings: Vec<NotificationSetting>,
    },

    SearchResults {
        server_id: String,
        query: String,
        results: Vec<SearchResult>,
        total_count: i64,
        offset: i64,
    },

    MessagePin {
        server_id: String,
        channel: String,
        pin: PinnedMessage,
    },

    MessageUnpin {
        server_id: String,
        channel: String,
        message_id: String,
    },

    PinnedMessages {
        server_id: String,
        channel: String,
        pins: Vec<PinnedMessage>,
    },

    ThreadCreate {
        server_id: String,
        parent_channel: String,
        thread: Thread,
    },

    ThreadUpdate { server_id: String, thread: Thread },

    ThreadList {
        server_id: String,
        channel: String,
        threads: Vec<Thread>,
    },

    ForumTagList {
        server_id: String,
        channel: String,
        tags: Vec<ForumTag>,
    },

    ForumTagUpdate {
        server_id: String,
        channel: String,
        tag: ForumTag,
    },

    ForumTagDelete {
        server_id: String,
        channel: String,
        tag_id: String,
    },

    BookmarkList { bookmarks: Vec<Bookmark> },

    BookmarkAdd { bookmark: Bookmark },

    BookmarkRemove { message_id: String },

    MemberKick {
        server_id: String,
        user_id: String,
        kicked_by: String,
        reason: Option<String>,
    },

    MemberBan {
        server_id: String,
        user_id: String,
        banned_by: String,
        reason: Option<String>,
    },

    MemberUnban { server_id: String, user_id: String },

    MemberTimeout {
        server_id: String,
        user_id: String,
        timeout_until: Option<String>,
    },

    SlowModeUpdate {
        server_id: String,
        channel: String,
        seconds: i32,
    },

    NsfwUpdate {
        server_id: String,
        channel: String,
        is_nsfw: bool,
    },

    BulkMessageDelete {
        server_id: String,
        channel: String,
        message_ids: Vec<String>,
    },

    AuditLogEntries {
        server_id: String,
        entries: Vec<AuditEntry>,
    },

    BanList {
        server_id: String,
        bans: Vec<Ban>,
    },

    AutomodRuleList {
        server_id: String,
        rules: Vec<AutomodRule>,
    },

    AutomodRuleUpdate {
        server_id: String,
        rule: AutomodRule,
    },

    AutomodRuleDelete { server_id: String, rule_id: String },

    InviteList {
        server_id: String,
        invites: Vec<Invite>,
    },

    InviteCreate { server_id: String, invite: Invite },

    InviteDelete { server_id: String, invite_id: String },

    EventList {
        server_id: String,
        events: Vec<ScheduledEvent>,
    },

    EventUpdate {
        server_id: String,
        event: ScheduledEvent,
    },

    EventDelete { server_id: String, event_id: String },

    EventRsvpList {
        event_id: String,
        rsvps: Vec<Rsvp>,
    },

    ServerCommunity { community: CommunitySettings },

    DiscoverServers { servers: Vec<CommunitySettings> },

    ChannelFollowList {
        channel_id: String,
        follows: Vec<ChannelFollow>,
    },

    ChannelFollowCreate { follow: ChannelFollow },

    ChannelFollowDelete { follow_id: String },

    TemplateList {
        server_id: String,
        templates: Vec<Template>,
    },

    TemplateUpdate {
        server_id: String,
        template: Template,
    },

    TemplateDelete {
        server_id: String,
        template_id: String,
    },

    Error { code: String, message: String },

    /// forward compatibility: any discriminator this build does not know
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_are_snake_case() {
        let event = ServerEvent::BulkMessageDelete {
            server_id: "s".into(),
            channel: "c".into(),
            message_ids: vec![],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"bulk_message_delete""#));
    }

    #[test]
    fn unknown_discriminators_do_not_fail_decoding() {
        let event: ServerEvent =
            serde_json::from_str(r#"{"type":"voice_state_update","channel":"c"}"#).unwrap();
        assert_eq!(event, ServerEvent::Unknown);
    }

    #[test]
    fn message_optional_fields_are_skipped() {
        let event = ServerEvent::Message {
            id: Uuid::new_v4(),
            server_id: None,
            from: "alice".into(),
            target: "bob".into(),
            content: "dm".into(),
            timestamp: Time::now_utc(),
            avatar_url: None,
            reply_to: None,
            attachments: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("server_id"));
        assert!(!json.contains("reply_to"));
    }

    #[test]
    fn history_decodes_sparse_messages() {
        let json = r##"{
            "type": "history",
            "server_id": "srv1",
            "channel": "#general",
            "messages": [
                {"id":"1f9f64a2-7e28-4b9e-b4fa-90ac34f1e3c4","from":"bob","content":"hi","timestamp":"2026-01-01T00:00:00Z"}
            ],
            "has_more": true
        }"##;
        let event: ServerEvent = serde_json::from_str(json).unwrap();
        let ServerEvent::History {
            messages, has_more, ..
        } = event
        else {
            panic!("wrong variant");
        };
        assert!(has_more);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].reactions.is_empty());
    }

    #[test]
    fn error_frame_round_trips() {
        let event = ServerEvent::Error {
            code: "FORBIDDEN".into(),
            message: "missing permission".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}

mod channel;
mod command;
mod community;
mod event;
mod member;
mod message;
mod moderation;
mod permission;
mod role;
mod server;
mod time;

pub use channel::{Category, Channel, ChannelPosition, ChannelType, ForumTag, Thread};
pub use command::ClientCommand;
pub use community::{
    ChannelFollow, CommunitySettings, CustomEmoji, Invite, Rsvp, ScheduledEvent, Template,
};
pub use event::ServerEvent;
pub use member::{Member, NotificationSetting, Presence, PresenceStatus, UserProfile};
pub use message::{
    AttachmentInfo, Bookmark, EmbedInfo, Message, PinnedMessage, ReactionGroup, ReplyInfo,
    SearchResult, UnreadCount,
};
pub use moderation::{AuditEntry, AutomodRule, Ban};
pub use permission::Permissions;
pub use role::Role;
pub use server::Server;
pub use time::Time;

/// compound key for channel-scoped maps. exact spelling matters: every map
/// over channels in the engine is indexed by this string.
pub fn channel_key(server_id: &str, channel: &str) -> String {
    format!("{server_id}:{channel}")
}

#[cfg(test)]
mod tests {
    use super::channel_key;

    #[test]
    fn channel_key_is_exact_concatenation() {
        assert_eq!(channel_key("srv1", "#general"), "srv1:#general");
        // channel names may themselves contain colons; only the first colon
        // after the server id is structural
        assert_eq!(channel_key("srv1", "a:b"), "srv1:a:b");
        assert_eq!(channel_key("", ""), ":");
    }
}

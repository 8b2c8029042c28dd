//! The typed command surface. Every method builds one [`ClientCommand`] and
//! queues it; results come back as broadcast events, never as replies.

use common::types::{ChannelPosition, ClientCommand, PresenceStatus};
use uuid::Uuid;

use crate::error::Result;
use crate::Client;

impl Client {
    // ── session & servers ──────────────────────────────────────────────

    pub fn list_servers(&self) -> Result<()> {
        self.send(ClientCommand::ListServers)
    }

    pub fn create_server(&self, name: &str, icon_url: Option<&str>) -> Result<()> {
        self.send(ClientCommand::CreateServer {
            name: name.into(),
            icon_url: icon_url.map(Into::into),
        })
    }

    pub fn join_server(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::JoinServer {
            server_id: server_id.into(),
        })
    }

    pub fn leave_server(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::LeaveServer {
            server_id: server_id.into(),
        })
    }

    pub fn delete_server(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteServer {
            server_id: server_id.into(),
        })
    }

    // ── channels ───────────────────────────────────────────────────────

    pub fn list_channels(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListChannels {
            server_id: server_id.into(),
        })
    }

    pub fn create_channel(
        &self,
        server_id: &str,
        name: &str,
        category_id: Option<&str>,
        is_private: bool,
    ) -> Result<()> {
        self.send(ClientCommand::CreateChannel {
            server_id: server_id.into(),
            name: name.into(),
            category_id: category_id.map(Into::into),
            is_private: is_private.then_some(true),
        })
    }

    pub fn delete_channel(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::DeleteChannel {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    pub fn set_topic(&self, server_id: &str, channel: &str, topic: &str) -> Result<()> {
        self.send(ClientCommand::SetTopic {
            server_id: server_id.into(),
            channel: channel.into(),
            topic: topic.into(),
        })
    }

    pub fn join_channel(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::JoinChannel {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    pub fn part_channel(&self, server_id: &str, channel: &str, reason: Option<&str>) -> Result<()> {
        self.send(ClientCommand::PartChannel {
            server_id: server_id.into(),
            channel: channel.into(),
            reason: reason.map(Into::into),
        })
    }

    pub fn reorder_channels(&self, server_id: &str, channels: Vec<ChannelPosition>) -> Result<()> {
        self.send(ClientCommand::ReorderChannels {
            server_id: server_id.into(),
            channels,
        })
    }

    pub fn set_slow_mode(&self, server_id: &str, channel: &str, seconds: i32) -> Result<()> {
        self.send(ClientCommand::SetSlowMode {
            server_id: server_id.into(),
            channel: channel.into(),
            seconds,
        })
    }

    pub fn set_nsfw(&self, server_id: &str, channel: &str, is_nsfw: bool) -> Result<()> {
        self.send(ClientCommand::SetNsfw {
            server_id: server_id.into(),
            channel: channel.into(),
            is_nsfw,
        })
    }

    pub fn set_announcement_channel(
        &self,
        server_id: &str,
        channel: &str,
        is_announcement: bool,
    ) -> Result<()> {
        self.send(ClientCommand::SetAnnouncementChannel {
            server_id: server_id.into(),
            channel: channel.into(),
            is_announcement,
        })
    }

    // ── messages (see `optimistic` for send_message and mark_read) ─────

    pub fn edit_message(&self, message_id: Uuid, content: &str) -> Result<()> {
        self.send(ClientCommand::EditMessage {
            message_id,
            content: content.into(),
        })
    }

    pub fn delete_message(&self, message_id: Uuid) -> Result<()> {
        self.send(ClientCommand::DeleteMessage { message_id })
    }

    pub fn bulk_delete_messages(
        &self,
        server_id: &str,
        channel: &str,
        message_ids: Vec<String>,
    ) -> Result<()> {
        self.send(ClientCommand::BulkDeleteMessages {
            server_id: server_id.into(),
            channel: channel.into(),
            message_ids,
        })
    }

    pub fn fetch_history(
        &self,
        server_id: &str,
        channel: &str,
        before: Option<&str>,
        limit: Option<i64>,
    ) -> Result<()> {
        self.send(ClientCommand::FetchHistory {
            server_id: server_id.into(),
            channel: channel.into(),
            before: before.map(Into::into),
            limit,
        })
    }

    pub fn add_reaction(&self, message_id: Uuid, emoji: &str) -> Result<()> {
        self.send(ClientCommand::AddReaction {
            message_id,
            emoji: emoji.into(),
        })
    }

    pub fn remove_reaction(&self, message_id: Uuid, emoji: &str) -> Result<()> {
        self.send(ClientCommand::RemoveReaction {
            message_id,
            emoji: emoji.into(),
        })
    }

    pub fn typing(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::Typing {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    // ── members & roles ────────────────────────────────────────────────

    pub fn get_members(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::GetMembers {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    pub fn update_member_role(&self, server_id: &str, user_id: &str, role: &str) -> Result<()> {
        self.send(ClientCommand::UpdateMemberRole {
            server_id: server_id.into(),
            user_id: user_id.into(),
            role: role.into(),
        })
    }

    pub fn set_server_nickname(&self, server_id: &str, nickname: Option<&str>) -> Result<()> {
        self.send(ClientCommand::SetServerNickname {
            server_id: server_id.into(),
            nickname: nickname.map(Into::into),
        })
    }

    pub fn list_roles(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListRoles {
            server_id: server_id.into(),
        })
    }

    pub fn create_role(
        &self,
        server_id: &str,
        name: &str,
        color: Option<&str>,
        permissions: i64,
    ) -> Result<()> {
        self.send(ClientCommand::CreateRole {
            server_id: server_id.into(),
            name: name.into(),
            color: color.map(Into::into),
            permissions,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_role(
        &self,
        server_id: &str,
        role_id: &str,
        name: Option<&str>,
        color: Option<&str>,
        permissions: Option<i64>,
        position: Option<i32>,
    ) -> Result<()> {
        self.send(ClientCommand::UpdateRole {
            server_id: server_id.into(),
            role_id: role_id.into(),
            name: name.map(Into::into),
            color: color.map(Into::into),
            permissions,
            position,
        })
    }

    pub fn delete_role(&self, server_id: &str, role_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteRole {
            server_id: server_id.into(),
            role_id: role_id.into(),
        })
    }

    pub fn assign_role(&self, server_id: &str, user_id: &str, role_id: &str) -> Result<()> {
        self.send(ClientCommand::AssignRole {
            server_id: server_id.into(),
            user_id: user_id.into(),
            role_id: role_id.into(),
        })
    }

    pub fn remove_role(&self, server_id: &str, user_id: &str, role_id: &str) -> Result<()> {
        self.send(ClientCommand::RemoveRole {
            server_id: server_id.into(),
            user_id: user_id.into(),
            role_id: role_id.into(),
        })
    }

    // ── categories ─────────────────────────────────────────────────────

    pub fn list_categories(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListCategories {
            server_id: server_id.into(),
        })
    }

    pub fn create_category(&self, server_id: &str, name: &str) -> Result<()> {
        self.send(ClientCommand::CreateCategory {
            server_id: server_id.into(),
            name: name.into(),
        })
    }

    pub fn update_category(
        &self,
        server_id: &str,
        category_id: &str,
        name: Option<&str>,
        position: Option<i32>,
    ) -> Result<()> {
        self.send(ClientCommand::UpdateCategory {
            server_id: server_id.into(),
            category_id: category_id.into(),
            name: name.map(Into::into),
            position,
        })
    }

    pub fn delete_category(&self, server_id: &str, category_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteCategory {
            server_id: server_id.into(),
            category_id: category_id.into(),
        })
    }

    // ── presence, profile & read state ─────────────────────────────────

    pub fn set_presence(
        &self,
        status: PresenceStatus,
        custom_status: Option<&str>,
        status_emoji: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::SetPresence {
            status,
            custom_status: custom_status.map(Into::into),
            status_emoji: status_emoji.map(Into::into),
        })
    }

    pub fn get_presences(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::GetPresences {
            server_id: server_id.into(),
        })
    }

    pub fn get_user_profile(&self, user_id: &str) -> Result<()> {
        self.send(ClientCommand::GetUserProfile {
            user_id: user_id.into(),
        })
    }

    pub fn get_unread_counts(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::GetUnreadCounts {
            server_id: server_id.into(),
        })
    }

    // ── search & notifications ─────────────────────────────────────────

    pub fn search_messages(
        &self,
        server_id: &str,
        query: &str,
        channel: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<()> {
        self.send(ClientCommand::SearchMessages {
            server_id: server_id.into(),
            query: query.into(),
            channel: channel.map(Into::into),
            limit,
            offset,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_notification_settings(
        &self,
        server_id: &str,
        channel_id: Option<&str>,
        level: &str,
        suppress_everyone: Option<bool>,
        suppress_roles: Option<bool>,
        muted: Option<bool>,
        mute_until: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::UpdateNotificationSettings {
            server_id: server_id.into(),
            channel_id: channel_id.map(Into::into),
            level: level.into(),
            suppress_everyone,
            suppress_roles,
            muted,
            mute_until: mute_until.map(Into::into),
        })
    }

    pub fn get_notification_settings(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::GetNotificationSettings {
            server_id: server_id.into(),
        })
    }

    // ── pins, threads & bookmarks ──────────────────────────────────────

    pub fn pin_message(&self, server_id: &str, channel: &str, message_id: &str) -> Result<()> {
        self.send(ClientCommand::PinMessage {
            server_id: server_id.into(),
            channel: channel.into(),
            message_id: message_id.into(),
        })
    }

    pub fn unpin_message(&self, server_id: &str, channel: &str, message_id: &str) -> Result<()> {
        self.send(ClientCommand::UnpinMessage {
            server_id: server_id.into(),
            channel: channel.into(),
            message_id: message_id.into(),
        })
    }

    pub fn get_pinned_messages(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::GetPinnedMessages {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    pub fn create_thread(
        &self,
        server_id: &str,
        parent_channel: &str,
        name: &str,
        message_id: &str,
        is_private: bool,
    ) -> Result<()> {
        self.send(ClientCommand::CreateThread {
            server_id: server_id.into(),
            parent_channel: parent_channel.into(),
            name: name.into(),
            message_id: message_id.into(),
            is_private: is_private.then_some(true),
        })
    }

    pub fn archive_thread(&self, server_id: &str, thread_id: &str, archived: bool) -> Result<()> {
        self.send(ClientCommand::ArchiveThread {
            server_id: server_id.into(),
            thread_id: thread_id.into(),
            archived,
        })
    }

    pub fn list_threads(&self, server_id: &str, channel: &str) -> Result<()> {
        self.send(ClientCommand::ListThreads {
            server_id: server_id.into(),
            channel: channel.into(),
        })
    }

    pub fn add_bookmark(&self, message_id: &str, note: Option<&str>) -> Result<()> {
        self.send(ClientCommand::AddBookmark {
            message_id: message_id.into(),
            note: note.map(Into::into),
        })
    }

    pub fn remove_bookmark(&self, message_id: &str) -> Result<()> {
        self.send(ClientCommand::RemoveBookmark {
            message_id: message_id.into(),
        })
    }

    pub fn list_bookmarks(&self) -> Result<()> {
        self.send(ClientCommand::ListBookmarks)
    }

    // ── moderation ─────────────────────────────────────────────────────

    pub fn kick_member(&self, server_id: &str, user_id: &str, reason: Option<&str>) -> Result<()> {
        self.send(ClientCommand::KickMember {
            server_id: server_id.into(),
            user_id: user_id.into(),
            reason: reason.map(Into::into),
        })
    }

    pub fn ban_member(
        &self,
        server_id: &str,
        user_id: &str,
        reason: Option<&str>,
        delete_message_days: Option<i32>,
    ) -> Result<()> {
        self.send(ClientCommand::BanMember {
            server_id: server_id.into(),
            user_id: user_id.into(),
            reason: reason.map(Into::into),
            delete_message_days,
        })
    }

    pub fn unban_member(&self, server_id: &str, user_id: &str) -> Result<()> {
        self.send(ClientCommand::UnbanMember {
            server_id: server_id.into(),
            user_id: user_id.into(),
        })
    }

    pub fn list_bans(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListBans {
            server_id: server_id.into(),
        })
    }

    pub fn timeout_member(
        &self,
        server_id: &str,
        user_id: &str,
        timeout_until: Option<&str>,
        reason: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::TimeoutMember {
            server_id: server_id.into(),
            user_id: user_id.into(),
            timeout_until: timeout_until.map(Into::into),
            reason: reason.map(Into::into),
        })
    }

    pub fn get_audit_log(
        &self,
        server_id: &str,
        action_type: Option<&str>,
        limit: Option<i64>,
        before: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::GetAuditLog {
            server_id: server_id.into(),
            action_type: action_type.map(Into::into),
            limit,
            before: before.map(Into::into),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_automod_rule(
        &self,
        server_id: &str,
        name: &str,
        rule_type: &str,
        config: &str,
        action_type: &str,
        timeout_duration_seconds: Option<i32>,
    ) -> Result<()> {
        self.send(ClientCommand::CreateAutomodRule {
            server_id: server_id.into(),
            name: name.into(),
            rule_type: rule_type.into(),
            config: config.into(),
            action_type: action_type.into(),
            timeout_duration_seconds,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_automod_rule(
        &self,
        server_id: &str,
        rule_id: &str,
        name: Option<&str>,
        enabled: Option<bool>,
        config: Option<&str>,
        action_type: Option<&str>,
        timeout_duration_seconds: Option<i32>,
    ) -> Result<()> {
        self.send(ClientCommand::UpdateAutomodRule {
            server_id: server_id.into(),
            rule_id: rule_id.into(),
            name: name.map(Into::into),
            enabled,
            config: config.map(Into::into),
            action_type: action_type.map(Into::into),
            timeout_duration_seconds,
        })
    }

    pub fn delete_automod_rule(&self, server_id: &str, rule_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteAutomodRule {
            server_id: server_id.into(),
            rule_id: rule_id.into(),
        })
    }

    pub fn list_automod_rules(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListAutomodRules {
            server_id: server_id.into(),
        })
    }

    // ── community ──────────────────────────────────────────────────────

    pub fn create_invite(
        &self,
        server_id: &str,
        max_uses: Option<i32>,
        expires_in_hours: Option<i64>,
        channel_id: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::CreateInvite {
            server_id: server_id.into(),
            max_uses,
            expires_in_hours,
            channel_id: channel_id.map(Into::into),
        })
    }

    pub fn list_invites(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListInvites {
            server_id: server_id.into(),
        })
    }

    pub fn delete_invite(&self, server_id: &str, invite_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteInvite {
            server_id: server_id.into(),
            invite_id: invite_id.into(),
        })
    }

    pub fn use_invite(&self, code: &str) -> Result<()> {
        self.send(ClientCommand::UseInvite { code: code.into() })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_event(
        &self,
        server_id: &str,
        name: &str,
        description: Option<&str>,
        channel_id: Option<&str>,
        start_time: &str,
        end_time: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::CreateEvent {
            server_id: server_id.into(),
            name: name.into(),
            description: description.map(Into::into),
            channel_id: channel_id.map(Into::into),
            start_time: start_time.into(),
            end_time: end_time.map(Into::into),
            image_url: image_url.map(Into::into),
        })
    }

    pub fn list_events(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListEvents {
            server_id: server_id.into(),
        })
    }

    pub fn update_event_status(&self, server_id: &str, event_id: &str, status: &str) -> Result<()> {
        self.send(ClientCommand::UpdateEventStatus {
            server_id: server_id.into(),
            event_id: event_id.into(),
            status: status.into(),
        })
    }

    pub fn delete_event(&self, server_id: &str, event_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteEvent {
            server_id: server_id.into(),
            event_id: event_id.into(),
        })
    }

    pub fn set_rsvp(&self, event_id: &str, status: &str) -> Result<()> {
        self.send(ClientCommand::SetRsvp {
            event_id: event_id.into(),
            status: status.into(),
        })
    }

    pub fn remove_rsvp(&self, event_id: &str) -> Result<()> {
        self.send(ClientCommand::RemoveRsvp {
            event_id: event_id.into(),
        })
    }

    pub fn list_rsvps(&self, event_id: &str) -> Result<()> {
        self.send(ClientCommand::ListRsvps {
            event_id: event_id.into(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_community_settings(
        &self,
        server_id: &str,
        description: Option<&str>,
        is_discoverable: Option<bool>,
        welcome_message: Option<&str>,
        rules_text: Option<&str>,
        category: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::UpdateCommunitySettings {
            server_id: server_id.into(),
            description: description.map(Into::into),
            is_discoverable,
            welcome_message: welcome_message.map(Into::into),
            rules_text: rules_text.map(Into::into),
            category: category.map(Into::into),
        })
    }

    pub fn get_community_settings(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::GetCommunitySettings {
            server_id: server_id.into(),
        })
    }

    pub fn discover_servers(&self, category: Option<&str>) -> Result<()> {
        self.send(ClientCommand::DiscoverServers {
            category: category.map(Into::into),
        })
    }

    pub fn accept_rules(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::AcceptRules {
            server_id: server_id.into(),
        })
    }

    pub fn follow_channel(
        &self,
        server_id: &str,
        source_channel_id: &str,
        target_server_id: &str,
        target_channel_id: &str,
    ) -> Result<()> {
        self.send(ClientCommand::FollowChannel {
            server_id: server_id.into(),
            source_channel_id: source_channel_id.into(),
            target_server_id: target_server_id.into(),
            target_channel_id: target_channel_id.into(),
        })
    }

    pub fn unfollow_channel(&self, follow_id: &str) -> Result<()> {
        self.send(ClientCommand::UnfollowChannel {
            follow_id: follow_id.into(),
        })
    }

    pub fn list_channel_follows(&self, channel_id: &str) -> Result<()> {
        self.send(ClientCommand::ListChannelFollows {
            channel_id: channel_id.into(),
        })
    }

    pub fn create_template(
        &self,
        server_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<()> {
        self.send(ClientCommand::CreateTemplate {
            server_id: server_id.into(),
            name: name.into(),
            description: description.map(Into::into),
        })
    }

    pub fn list_templates(&self, server_id: &str) -> Result<()> {
        self.send(ClientCommand::ListTemplates {
            server_id: server_id.into(),
        })
    }

    pub fn delete_template(&self, server_id: &str, template_id: &str) -> Result<()> {
        self.send(ClientCommand::DeleteTemplate {
            server_id: server_id.into(),
            template_id: template_id.into(),
        })
    }
}

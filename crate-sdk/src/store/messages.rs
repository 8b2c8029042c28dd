//! Reducers for message payloads: live messages, edits, deletes, embeds,
//! reactions, and history pages.

use std::sync::Arc;

use common::types::{
    channel_key, AttachmentInfo, EmbedInfo, Message, ReactionGroup, ReplyInfo, Time,
};
use uuid::Uuid;

use super::StoreState;

impl StoreState {
    fn messages_mut(&mut self, key: &str) -> &mut Vec<Message> {
        Arc::make_mut(self.messages.entry(key.to_owned()).or_default())
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn on_message(
        &mut self,
        id: Uuid,
        server_id: Option<&str>,
        from: String,
        target: String,
        content: String,
        timestamp: Time,
        avatar_url: Option<String>,
        reply_to: Option<ReplyInfo>,
        attachments: Vec<AttachmentInfo>,
    ) {
        // DMs and legacy servers omit the server id
        let key = channel_key(server_id.unwrap_or("default"), &target);
        self.remember_avatar(&from, avatar_url.as_deref());

        let message = Message {
            id,
            from: from.clone(),
            content,
            timestamp,
            edited_at: None,
            reply_to,
            reactions: vec![],
            attachments,
            embeds: vec![],
        };

        let list = self.messages_mut(&key);
        if let Some(existing) = list.iter_mut().find(|m| m.id == id) {
            // an echo of a message we already hold (usually our own optimistic
            // copy). the server copy is authoritative; no unread bump.
            *existing = message;
            return;
        }
        list.push(message);

        if self.nickname.as_deref() != Some(from.as_str()) {
            *self.unread_counts.entry(key).or_insert(0) += 1;
        }
    }

    pub(super) fn on_message_edit(
        &mut self,
        server_id: &str,
        channel: &str,
        id: Uuid,
        content: String,
        edited_at: Time,
    ) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.messages.get_mut(&key) {
            if let Some(m) = Arc::make_mut(list).iter_mut().find(|m| m.id == id) {
                m.content = content;
                m.edited_at = Some(edited_at);
            }
        }
    }

    pub(super) fn on_message_delete(&mut self, server_id: &str, channel: &str, id: Uuid) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.messages.get_mut(&key) {
            Arc::make_mut(list).retain(|m| m.id != id);
        }
    }

    pub(super) fn on_message_embed(
        &mut self,
        server_id: &str,
        channel: &str,
        message_id: Uuid,
        embeds: Vec<EmbedInfo>,
    ) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.messages.get_mut(&key) {
            if let Some(m) = Arc::make_mut(list).iter_mut().find(|m| m.id == message_id) {
                m.embeds = embeds;
            }
        }
    }

    pub(super) fn on_bulk_message_delete(
        &mut self,
        server_id: &str,
        channel: &str,
        message_ids: &[String],
    ) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.messages.get_mut(&key) {
            Arc::make_mut(list).retain(|m| !message_ids.iter().any(|id| id == &m.id.to_string()));
        }
    }

    pub(super) fn on_reaction_add(
        &mut self,
        server_id: &str,
        channel: &str,
        message_id: Uuid,
        user_id: String,
        emoji: String,
    ) {
        let key = channel_key(server_id, channel);
        let Some(list) = self.messages.get_mut(&key) else {
            return;
        };
        let Some(m) = Arc::make_mut(list).iter_mut().find(|m| m.id == message_id) else {
            return;
        };
        match m.reactions.iter_mut().find(|g| g.emoji == emoji) {
            Some(group) => {
                // set semantics: the same user reacting twice is one reaction
                if !group.user_ids.contains(&user_id) {
                    group.user_ids.push(user_id);
                    group.count = group.user_ids.len();
                }
            }
            None => m.reactions.push(ReactionGroup {
                emoji,
                count: 1,
                user_ids: vec![user_id],
            }),
        }
    }

    pub(super) fn on_reaction_remove(
        &mut self,
        server_id: &str,
        channel: &str,
        message_id: Uuid,
        user_id: &str,
        emoji: &str,
    ) {
        let key = channel_key(server_id, channel);
        let Some(list) = self.messages.get_mut(&key) else {
            return;
        };
        let Some(m) = Arc::make_mut(list).iter_mut().find(|m| m.id == message_id) else {
            return;
        };
        if let Some(group) = m.reactions.iter_mut().find(|g| g.emoji == emoji) {
            group.user_ids.retain(|u| u != user_id);
            group.count = group.user_ids.len();
        }
        // a group nobody is reacting with does not exist
        m.reactions.retain(|g| g.count > 0);
    }

    /// merge one history page. the server sends newest-first; the stored list
    /// is oldest-first, so the page is reversed and prepended.
    pub(super) fn on_history(
        &mut self,
        server_id: &str,
        channel: &str,
        mut messages: Vec<Message>,
        has_more: bool,
    ) {
        let key = channel_key(server_id, channel);
        messages.reverse();
        let existing = self.messages_mut(&key);
        messages.extend(existing.drain(..));
        *existing = messages;
        self.has_more.insert(key, has_more);
    }
}

#[cfg(test)]
mod tests {
    use common::types::ServerEvent;

    use crate::store::Store;

    fn msg(id: &str, from: &str, content: &str, ts: &str) -> ServerEvent {
        ServerEvent::Message {
            id: id.parse().unwrap(),
            server_id: Some("srv1".into()),
            from: from.into(),
            target: "#general".into(),
            content: content.into(),
            timestamp: serde_json::from_str(&format!("\"{ts}\"")).unwrap(),
            avatar_url: None,
            reply_to: None,
            attachments: None,
        }
    }

    const M1: &str = "00000000-0000-4000-8000-000000000001";
    const M2: &str = "00000000-0000-4000-8000-000000000002";
    const M3: &str = "00000000-0000-4000-8000-000000000003";

    #[test]
    fn message_appends_and_counts_unread_for_others_only() {
        let store = Store::new();
        store.set_nickname("alice");

        store.apply(msg(M1, "bob", "yo", "2026-01-01T00:00:00Z"));
        assert_eq!(store.messages("srv1:#general").len(), 1);
        assert_eq!(store.unread_count("srv1:#general"), 1);

        store.apply(msg(M2, "alice", "hi bob", "2026-01-01T00:00:01Z"));
        assert_eq!(store.messages("srv1:#general").len(), 2);
        assert_eq!(store.unread_count("srv1:#general"), 1);
    }

    #[test]
    fn message_without_server_id_lands_under_default() {
        let store = Store::new();
        let event = ServerEvent::Message {
            id: M1.parse().unwrap(),
            server_id: None,
            from: "bob".into(),
            target: "alice".into(),
            content: "dm".into(),
            timestamp: serde_json::from_str("\"2026-01-01T00:00:00Z\"").unwrap(),
            avatar_url: None,
            reply_to: None,
            attachments: None,
        };
        store.apply(event);
        assert_eq!(store.messages("default:alice").len(), 1);
    }

    #[test]
    fn duplicate_id_replaces_instead_of_appending() {
        let store = Store::new();
        store.set_nickname("alice");
        store.apply(msg(M1, "bob", "first", "2026-01-01T00:00:00Z"));
        store.apply(msg(M1, "bob", "authoritative", "2026-01-01T00:00:00Z"));

        let messages = store.messages("srv1:#general");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "authoritative");
        // the replacement is not a new unread message
        assert_eq!(store.unread_count("srv1:#general"), 1);
    }

    #[test]
    fn edit_updates_content_in_place() {
        let store = Store::new();
        store.apply(msg(M1, "bob", "tpyo", "2026-01-01T00:00:00Z"));
        store.apply(ServerEvent::MessageEdit {
            id: M1.parse().unwrap(),
            server_id: "srv1".into(),
            channel: "#general".into(),
            content: "typo".into(),
            edited_at: serde_json::from_str("\"2026-01-01T00:01:00Z\"").unwrap(),
        });
        let messages = store.messages("srv1:#general");
        assert_eq!(messages[0].content, "typo");
        assert!(messages[0].edited_at.is_some());
    }

    #[test]
    fn delete_and_bulk_delete_remove_by_id() {
        let store = Store::new();
        store.apply(msg(M1, "bob", "a", "2026-01-01T00:00:00Z"));
        store.apply(msg(M2, "bob", "b", "2026-01-01T00:00:01Z"));
        store.apply(msg(M3, "bob", "c", "2026-01-01T00:00:02Z"));

        store.apply(ServerEvent::MessageDelete {
            id: M2.parse().unwrap(),
            server_id: "srv1".into(),
            channel: "#general".into(),
        });
        assert_eq!(store.messages("srv1:#general").len(), 2);

        store.apply(ServerEvent::BulkMessageDelete {
            server_id: "srv1".into(),
            channel: "#general".into(),
            message_ids: vec![M1.into(), M3.into()],
        });
        assert!(store.messages("srv1:#general").is_empty());
    }

    #[test]
    fn reaction_lifecycle_counts_users_and_drops_empty_groups() {
        let store = Store::new();
        store.apply(msg(M1, "bob", "react to me", "2026-01-01T00:00:00Z"));
        let add = |user: &str| ServerEvent::ReactionAdd {
            message_id: M1.parse().unwrap(),
            server_id: "srv1".into(),
            channel: "#general".into(),
            user_id: user.into(),
            nickname: user.into(),
            emoji: "👍".into(),
        };
        let remove = |user: &str| ServerEvent::ReactionRemove {
            message_id: M1.parse().unwrap(),
            server_id: "srv1".into(),
            channel: "#general".into(),
            user_id: user.into(),
            nickname: user.into(),
            emoji: "👍".into(),
        };

        store.apply(add("u1"));
        assert_eq!(store.messages("srv1:#general")[0].reactions[0].count, 1);
        store.apply(add("u2"));
        assert_eq!(store.messages("srv1:#general")[0].reactions[0].count, 2);
        // double-add from the same user is a no-op
        store.apply(add("u2"));
        assert_eq!(store.messages("srv1:#general")[0].reactions[0].count, 2);

        store.apply(remove("u1"));
        assert_eq!(store.messages("srv1:#general")[0].reactions[0].count, 1);
        store.apply(remove("u2"));
        assert!(store.messages("srv1:#general")[0].reactions.is_empty());
    }

    #[test]
    fn history_reverses_and_prepends() {
        let store = Store::new();
        store.apply(msg(M3, "bob", "m3", "2026-01-01T00:00:03Z"));

        let page = serde_json::from_str::<Vec<common::types::Message>>(&format!(
            r#"[
                {{"id":"{M2}","from":"bob","content":"m2","timestamp":"2026-01-01T00:00:02Z"}},
                {{"id":"{M1}","from":"bob","content":"m1","timestamp":"2026-01-01T00:00:01Z"}}
            ]"#
        ))
        .unwrap();
        store.apply(ServerEvent::History {
            server_id: "srv1".into(),
            channel: "#general".into(),
            messages: page,
            has_more: true,
        });

        let messages = store.messages("srv1:#general");
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m1", "m2", "m3"]);
        assert!(store.has_more("srv1:#general"));
    }
}

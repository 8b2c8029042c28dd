//! Reducers for pins, threads, forum tags, bookmarks, and the community
//! surfaces (invites, events, automod, templates, follows, profiles).

use std::sync::Arc;

use common::types::{
    channel_key, AutomodRule, Bookmark, ChannelFollow, ForumTag, Invite, PinnedMessage,
    ScheduledEvent, Template, Thread, UserProfile,
};

use super::StoreState;

impl StoreState {
    pub(super) fn on_message_pin(&mut self, server_id: &str, channel: &str, pin: PinnedMessage) {
        let key = channel_key(server_id, channel);
        let list = Arc::make_mut(self.pinned_messages.entry(key).or_default());
        match list.iter_mut().find(|p| p.message_id == pin.message_id) {
            Some(existing) => *existing = pin,
            None => list.push(pin),
        }
    }

    pub(super) fn on_message_unpin(&mut self, server_id: &str, channel: &str, message_id: &str) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.pinned_messages.get_mut(&key) {
            Arc::make_mut(list).retain(|p| p.message_id != message_id);
        }
    }

    pub(super) fn on_pinned_messages(
        &mut self,
        server_id: &str,
        channel: &str,
        pins: Vec<PinnedMessage>,
    ) {
        self.pinned_messages
            .insert(channel_key(server_id, channel), Arc::new(pins));
    }

    pub(super) fn on_thread_create(&mut self, server_id: &str, parent_channel: &str, thread: Thread) {
        let key = channel_key(server_id, parent_channel);
        let list = Arc::make_mut(self.threads.entry(key).or_default());
        if !list.iter().any(|t| t.id == thread.id) {
            list.push(thread);
        }
    }

    /// thread updates carry no parent channel, so the thread is found by id
    /// in whichever list of this server holds it
    pub(super) fn on_thread_update(&mut self, server_id: &str, thread: Thread) {
        let prefix = channel_key(server_id, "");
        for (key, list) in self.threads.iter_mut() {
            if !key.starts_with(&prefix) {
                continue;
            }
            if list.iter().any(|t| t.id == thread.id) {
                if let Some(t) = Arc::make_mut(list).iter_mut().find(|t| t.id == thread.id) {
                    *t = thread;
                }
                return;
            }
        }
    }

    pub(super) fn on_thread_list(&mut self, server_id: &str, channel: &str, threads: Vec<Thread>) {
        self.threads
            .insert(channel_key(server_id, channel), Arc::new(threads));
    }

    pub(super) fn on_forum_tag_list(&mut self, server_id: &str, channel: &str, tags: Vec<ForumTag>) {
        self.forum_tags
            .insert(channel_key(server_id, channel), Arc::new(tags));
    }

    pub(super) fn on_forum_tag_update(&mut self, server_id: &str, channel: &str, tag: ForumTag) {
        let key = channel_key(server_id, channel);
        let list = Arc::make_mut(self.forum_tags.entry(key).or_default());
        match list.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => *existing = tag,
            None => list.push(tag),
        }
    }

    pub(super) fn on_forum_tag_delete(&mut self, server_id: &str, channel: &str, tag_id: &str) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.forum_tags.get_mut(&key) {
            Arc::make_mut(list).retain(|t| t.id != tag_id);
        }
    }

    pub(super) fn on_bookmark_add(&mut self, bookmark: Bookmark) {
        let list = Arc::make_mut(self.bookmarks.get_or_insert_with(Default::default));
        match list.iter_mut().find(|b| b.message_id == bookmark.message_id) {
            Some(existing) => *existing = bookmark,
            None => list.push(bookmark),
        }
    }

    pub(super) fn on_bookmark_remove(&mut self, message_id: &str) {
        if let Some(list) = self.bookmarks.as_mut() {
            Arc::make_mut(list).retain(|b| b.message_id != message_id);
        }
    }

    pub(super) fn on_automod_update(&mut self, server_id: &str, rule: AutomodRule) {
        let list = Arc::make_mut(self.automod_rules.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => list.push(rule),
        }
    }

    pub(super) fn on_automod_delete(&mut self, server_id: &str, rule_id: &str) {
        if let Some(list) = self.automod_rules.get_mut(server_id) {
            Arc::make_mut(list).retain(|r| r.id != rule_id);
        }
    }

    pub(super) fn on_invite_create(&mut self, server_id: &str, invite: Invite) {
        let list = Arc::make_mut(self.invites.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|i| i.id == invite.id) {
            Some(existing) => *existing = invite,
            None => list.push(invite),
        }
    }

    pub(super) fn on_invite_delete(&mut self, server_id: &str, invite_id: &str) {
        if let Some(list) = self.invites.get_mut(server_id) {
            Arc::make_mut(list).retain(|i| i.id != invite_id);
        }
    }

    pub(super) fn on_event_update(&mut self, server_id: &str, event: ScheduledEvent) {
        let list = Arc::make_mut(self.server_events.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => list.push(event),
        }
    }

    pub(super) fn on_event_delete(&mut self, server_id: &str, event_id: &str) {
        if let Some(list) = self.server_events.get_mut(server_id) {
            Arc::make_mut(list).retain(|e| e.id != event_id);
        }
        self.event_rsvps.remove(event_id);
    }

    pub(super) fn on_channel_follow_create(&mut self, follow: ChannelFollow) {
        let list = Arc::make_mut(
            self.channel_follows
                .entry(follow.source_channel_id.clone())
                .or_default(),
        );
        if !list.iter().any(|f| f.id == follow.id) {
            list.push(follow);
        }
    }

    pub(super) fn on_channel_follow_delete(&mut self, follow_id: &str) {
        for list in self.channel_follows.values_mut() {
            if list.iter().any(|f| f.id == follow_id) {
                Arc::make_mut(list).retain(|f| f.id != follow_id);
            }
        }
    }

    pub(super) fn on_template_update(&mut self, server_id: &str, template: Template) {
        let list = Arc::make_mut(self.templates.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => list.push(template),
        }
    }

    pub(super) fn on_template_delete(&mut self, server_id: &str, template_id: &str) {
        if let Some(list) = self.templates.get_mut(server_id) {
            Arc::make_mut(list).retain(|t| t.id != template_id);
        }
    }

    pub(super) fn on_user_profile(&mut self, profile: UserProfile) {
        self.remember_avatar(&profile.username, profile.avatar_url.as_deref());
        self.user_profiles
            .insert(profile.user_id.clone(), Arc::new(profile));
    }
}

#[cfg(test)]
mod tests {
    use common::types::{PinnedMessage, ServerEvent, Thread};

    use crate::store::Store;

    fn pin(message_id: &str) -> PinnedMessage {
        PinnedMessage {
            id: format!("pin-{message_id}"),
            message_id: message_id.into(),
            channel_id: "c1".into(),
            pinned_by: "alice".into(),
            pinned_at: "2026-01-01T00:00:00Z".into(),
            from: "bob".into(),
            content: "pinned".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
        }
    }

    fn thread(id: &str) -> Thread {
        Thread {
            id: id.into(),
            name: format!("#{id}"),
            channel_type: common::types::ChannelType::PublicThread,
            parent_message_id: None,
            archived: false,
            auto_archive_minutes: 1440,
            message_count: 0,
            created_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn pin_unpin_lifecycle() {
        let store = Store::new();
        store.apply(ServerEvent::MessagePin {
            server_id: "srv1".into(),
            channel: "#general".into(),
            pin: pin("m1"),
        });
        store.apply(ServerEvent::MessagePin {
            server_id: "srv1".into(),
            channel: "#general".into(),
            pin: pin("m1"),
        });
        assert_eq!(store.pinned_messages("srv1:#general").len(), 1);

        store.apply(ServerEvent::MessageUnpin {
            server_id: "srv1".into(),
            channel: "#general".into(),
            message_id: "m1".into(),
        });
        assert!(store.pinned_messages("srv1:#general").is_empty());
    }

    #[test]
    fn thread_update_finds_the_thread_by_id() {
        let store = Store::new();
        store.apply(ServerEvent::ThreadCreate {
            server_id: "srv1".into(),
            parent_channel: "#general".into(),
            thread: thread("t1"),
        });
        let mut updated = thread("t1");
        updated.archived = true;
        store.apply(ServerEvent::ThreadUpdate {
            server_id: "srv1".into(),
            thread: updated,
        });
        assert!(store.threads("srv1:#general")[0].archived);
    }

    #[test]
    fn bookmarks_upsert_by_message_id() {
        let store = Store::new();
        let bookmark = |message_id: &str, note: Option<&str>| common::types::Bookmark {
            id: format!("b-{message_id}"),
            message_id: message_id.into(),
            channel_id: "c1".into(),
            from: "bob".into(),
            content: "save me".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
            note: note.map(Into::into),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        store.apply(ServerEvent::BookmarkAdd {
            bookmark: bookmark("m1", None),
        });
        store.apply(ServerEvent::BookmarkAdd {
            bookmark: bookmark("m1", Some("updated note")),
        });
        let bookmarks = store.bookmarks();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].note.as_deref(), Some("updated note"));

        store.apply(ServerEvent::BookmarkRemove {
            message_id: "m1".into(),
        });
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn event_delete_also_drops_its_rsvps() {
        let store = Store::new();
        store.apply(ServerEvent::EventRsvpList {
            event_id: "ev1".into(),
            rsvps: vec![common::types::Rsvp {
                user_id: "u1".into(),
                status: "interested".into(),
            }],
        });
        store.apply(ServerEvent::EventDelete {
            server_id: "srv1".into(),
            event_id: "ev1".into(),
        });
        assert!(store.event_rsvps("ev1").is_empty());
    }

    #[test]
    fn user_profile_caches_avatar_by_username() {
        let store = Store::new();
        store.apply(ServerEvent::UserProfile {
            profile: common::types::UserProfile {
                user_id: "u1".into(),
                username: "bob".into(),
                avatar_url: Some("https://cdn/bob2.png".into()),
                bio: None,
                pronouns: None,
                banner_url: None,
                created_at: "2026-01-01T00:00:00Z".into(),
            },
        });
        assert!(store.user_profile("u1").is_some());
        assert_eq!(store.avatar("bob").as_deref(), Some("https://cdn/bob2.png"));
    }
}

//! Reducers for membership, presence, and typing indicators.

use std::collections::HashMap;
use std::sync::Arc;

use common::types::{channel_key, Member, Presence};

use super::{StoreState, TypingExpiry};

impl StoreState {
    pub(super) fn on_join(
        &mut self,
        server_id: &str,
        channel: &str,
        nickname: String,
        avatar_url: Option<String>,
    ) {
        self.remember_avatar(&nickname, avatar_url.as_deref());
        let key = channel_key(server_id, channel);
        let list = Arc::make_mut(self.members.entry(key).or_default());
        if list.iter().any(|m| m.nickname == nickname) {
            return;
        }
        list.push(Member {
            avatar_url,
            ..Member::new(nickname)
        });
    }

    pub(super) fn on_part(&mut self, server_id: &str, channel: &str, nickname: &str) {
        let key = channel_key(server_id, channel);
        if let Some(list) = self.members.get_mut(&key) {
            Arc::make_mut(list).retain(|m| m.nickname != nickname);
        }
    }

    /// quit removes the user everywhere, not just one channel
    pub(super) fn on_quit(&mut self, nickname: &str) {
        for list in self.members.values_mut() {
            if list.iter().any(|m| m.nickname == nickname) {
                Arc::make_mut(list).retain(|m| m.nickname != nickname);
            }
        }
    }

    pub(super) fn on_names(&mut self, server_id: &str, channel: &str, members: Vec<Member>) {
        for member in &members {
            self.remember_avatar(&member.nickname, member.avatar_url.as_deref());
        }
        let key = channel_key(server_id, channel);
        self.members.insert(key, Arc::new(members));
    }

    pub(super) fn on_nick_change(&mut self, old_nick: &str, new_nick: &str) {
        for list in self.members.values_mut() {
            if list.iter().any(|m| m.nickname == old_nick) {
                for member in Arc::make_mut(list) {
                    if member.nickname == old_nick {
                        member.nickname = new_nick.to_owned();
                    }
                }
            }
        }
        if let Some(url) = self.avatars.remove(old_nick) {
            self.avatars.insert(new_nick.to_owned(), url);
        }
    }

    /// kick and ban remove the user from every member list of that server
    pub(super) fn on_member_removed(&mut self, server_id: &str, user_id: &str) {
        let prefix = channel_key(server_id, "");
        for (key, list) in self.members.iter_mut() {
            if !key.starts_with(&prefix) {
                continue;
            }
            if list.iter().any(|m| m.user_id.as_deref() == Some(user_id)) {
                Arc::make_mut(list).retain(|m| m.user_id.as_deref() != Some(user_id));
            }
        }
    }

    pub(super) fn on_presence_update(&mut self, server_id: &str, presence: Presence) {
        let map = Arc::make_mut(self.presences.entry(server_id.to_owned()).or_default());
        map.insert(presence.user_id.clone(), presence);
    }

    pub(super) fn on_presence_list(&mut self, server_id: &str, presences: Vec<Presence>) {
        let map: HashMap<_, _> = presences
            .into_iter()
            .map(|p| (p.user_id.clone(), p))
            .collect();
        self.presences.insert(server_id.to_owned(), Arc::new(map));
    }

    /// returns the expiry to schedule, or None when the event is our own echo
    pub(super) fn on_typing_start(
        &mut self,
        server_id: &str,
        channel: &str,
        nickname: String,
    ) -> Option<TypingExpiry> {
        if self.nickname.as_deref() == Some(nickname.as_str()) {
            return None;
        }
        let key = channel_key(server_id, channel);
        let list = Arc::make_mut(self.typing_users.entry(key.clone()).or_default());
        if !list.contains(&nickname) {
            list.push(nickname.clone());
        }
        let generation = self
            .typing_generations
            .entry((key.clone(), nickname.clone()))
            .and_modify(|g| *g += 1)
            .or_insert(1);
        Some(TypingExpiry {
            key,
            nickname,
            generation: *generation,
        })
    }
}

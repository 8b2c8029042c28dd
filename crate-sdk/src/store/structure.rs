//! Reducers for server structure: channel lists, topics, reordering,
//! categories, roles, and unread counts.

use std::sync::Arc;

use common::types::{channel_key, Category, Channel, ChannelPosition, Role, UnreadCount};

use super::StoreState;

impl StoreState {
    fn patch_channel(&mut self, server_id: &str, channel: &str, f: impl FnOnce(&mut Channel)) {
        if let Some(list) = self.channels.get_mut(server_id) {
            if let Some(c) = Arc::make_mut(list).iter_mut().find(|c| c.name == channel) {
                f(c);
            }
        }
    }

    pub(super) fn on_channel_list(&mut self, server_id: &str, mut channels: Vec<Channel>) {
        channels.sort_by_key(|c| c.position);
        self.channels.insert(server_id.to_owned(), Arc::new(channels));
    }

    pub(super) fn on_topic(&mut self, server_id: &str, channel: &str, topic: String) {
        self.patch_channel(server_id, channel, |c| c.topic = topic);
    }

    pub(super) fn on_channel_reorder(&mut self, server_id: &str, positions: &[ChannelPosition]) {
        let Some(list) = self.channels.get_mut(server_id) else {
            return;
        };
        let list = Arc::make_mut(list);
        for c in list.iter_mut() {
            if let Some(p) = positions.iter().find(|p| p.id == c.id) {
                c.position = p.position;
                c.category_id = p.category_id.clone();
            }
        }
        list.sort_by_key(|c| c.position);
    }

    pub(super) fn on_slow_mode(&mut self, server_id: &str, channel: &str, seconds: i32) {
        self.patch_channel(server_id, channel, |c| c.slowmode_seconds = seconds);
    }

    pub(super) fn on_nsfw(&mut self, server_id: &str, channel: &str, is_nsfw: bool) {
        self.patch_channel(server_id, channel, |c| c.is_nsfw = is_nsfw);
    }

    pub(super) fn on_category_list(&mut self, server_id: &str, mut categories: Vec<Category>) {
        categories.sort_by_key(|c| c.position);
        self.categories
            .insert(server_id.to_owned(), Arc::new(categories));
    }

    pub(super) fn on_category_update(&mut self, server_id: &str, category: Category) {
        let list = Arc::make_mut(self.categories.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => list.push(category),
        }
        list.sort_by_key(|c| c.position);
    }

    pub(super) fn on_category_delete(&mut self, server_id: &str, category_id: &str) {
        if let Some(list) = self.categories.get_mut(server_id) {
            Arc::make_mut(list).retain(|c| c.id != category_id);
        }
    }

    pub(super) fn on_role_list(&mut self, server_id: &str, mut roles: Vec<Role>) {
        // highest position first, the order the member list renders them in
        roles.sort_by_key(|r| std::cmp::Reverse(r.position));
        self.roles.insert(server_id.to_owned(), Arc::new(roles));
    }

    pub(super) fn on_role_update(&mut self, server_id: &str, role: Role) {
        let list = Arc::make_mut(self.roles.entry(server_id.to_owned()).or_default());
        match list.iter_mut().find(|r| r.id == role.id) {
            Some(existing) => *existing = role,
            None => list.push(role),
        }
        list.sort_by_key(|r| std::cmp::Reverse(r.position));
    }

    pub(super) fn on_role_delete(&mut self, server_id: &str, role_id: &str) {
        if let Some(list) = self.roles.get_mut(server_id) {
            Arc::make_mut(list).retain(|r| r.id != role_id);
        }
    }

    /// full per-server snapshot: zero counts disappear, non-zero replace
    pub(super) fn on_unread_counts(&mut self, server_id: &str, counts: Vec<UnreadCount>) {
        let prefix = channel_key(server_id, "");
        self.unread_counts.retain(|key, _| !key.starts_with(&prefix));
        for c in counts {
            if c.count > 0 {
                self.unread_counts
                    .insert(channel_key(server_id, &c.channel_name), c.count as u64);
            }
        }
    }
}

//! The normalized mirror of server state.
//!
//! One [`Store`] per client. All mutation goes through [`Store::apply`], which
//! runs exactly one reducer to completion; readers get snapshot-consistent
//! `Arc` clones. Two rules keep identity-based change detection correct:
//!
//! - missing keys resolve to a per-type empty sentinel, so two reads of an
//!   absent key are `Arc::ptr_eq`
//! - reducers rewrite only the entries they touch (`Arc::make_mut`), so an
//!   untouched key keeps its pointer across unrelated events

mod community;
mod members;
mod messages;
mod structure;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use common::types::{
    AuditEntry, AutomodRule, Ban, Bookmark, Category, Channel, ChannelFollow, ClientCommand,
    CommunitySettings, CustomEmoji, ForumTag, Invite, Member, Message, NotificationSetting,
    PinnedMessage, Presence, ReplyInfo, Role, Rsvp, ScheduledEvent, SearchResult, Server,
    ServerEvent, Template, Thread, UserProfile,
};
use tracing::{debug, error, info};

static EMPTY_MESSAGES: LazyLock<Arc<Vec<Message>>> = LazyLock::new(Default::default);
static EMPTY_MEMBERS: LazyLock<Arc<Vec<Member>>> = LazyLock::new(Default::default);
static EMPTY_CHANNELS: LazyLock<Arc<Vec<Channel>>> = LazyLock::new(Default::default);
static EMPTY_CATEGORIES: LazyLock<Arc<Vec<Category>>> = LazyLock::new(Default::default);
static EMPTY_ROLES: LazyLock<Arc<Vec<Role>>> = LazyLock::new(Default::default);
static EMPTY_SERVERS: LazyLock<Arc<Vec<Server>>> = LazyLock::new(Default::default);
static EMPTY_TYPING: LazyLock<Arc<Vec<String>>> = LazyLock::new(Default::default);
static EMPTY_PRESENCES: LazyLock<Arc<HashMap<String, Presence>>> = LazyLock::new(Default::default);
static EMPTY_EMOJI: LazyLock<Arc<HashMap<String, String>>> = LazyLock::new(Default::default);
static EMPTY_PINS: LazyLock<Arc<Vec<PinnedMessage>>> = LazyLock::new(Default::default);
static EMPTY_THREADS: LazyLock<Arc<Vec<Thread>>> = LazyLock::new(Default::default);
static EMPTY_FORUM_TAGS: LazyLock<Arc<Vec<ForumTag>>> = LazyLock::new(Default::default);
static EMPTY_BANS: LazyLock<Arc<Vec<Ban>>> = LazyLock::new(Default::default);
static EMPTY_AUDIT: LazyLock<Arc<Vec<AuditEntry>>> = LazyLock::new(Default::default);
static EMPTY_AUTOMOD: LazyLock<Arc<Vec<AutomodRule>>> = LazyLock::new(Default::default);
static EMPTY_INVITES: LazyLock<Arc<Vec<Invite>>> = LazyLock::new(Default::default);
static EMPTY_EVENTS: LazyLock<Arc<Vec<ScheduledEvent>>> = LazyLock::new(Default::default);
static EMPTY_RSVPS: LazyLock<Arc<Vec<Rsvp>>> = LazyLock::new(Default::default);
static EMPTY_FOLLOWS: LazyLock<Arc<Vec<ChannelFollow>>> = LazyLock::new(Default::default);
static EMPTY_TEMPLATES: LazyLock<Arc<Vec<Template>>> = LazyLock::new(Default::default);
static EMPTY_BOOKMARKS: LazyLock<Arc<Vec<Bookmark>>> = LazyLock::new(Default::default);
static EMPTY_DISCOVER: LazyLock<Arc<Vec<CommunitySettings>>> = LazyLock::new(Default::default);
static EMPTY_NOTIFICATIONS: LazyLock<Arc<Vec<NotificationSetting>>> =
    LazyLock::new(Default::default);

/// side effects a reducer asked for. the dispatcher turns these into outbound
/// commands and timers; keeping them out of the reducer keeps reducers pure.
#[derive(Debug, Default)]
pub struct Effects {
    /// commands to transmit, in order
    pub commands: Vec<ClientCommand>,
    /// schedule a typing-indicator expiry
    pub typing_expiry: Option<TypingExpiry>,
}

/// a pending typing-indicator removal. `generation` pins the entry: a fresh
/// `typing_start` for the same (key, nickname) bumps the generation and the
/// stale expiry becomes a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingExpiry {
    pub key: String,
    pub nickname: String,
    pub generation: u64,
}

/// full-text search pane state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Option<Arc<Vec<SearchResult>>>,
    pub total_count: i64,
}

#[derive(Default)]
pub(crate) struct StoreState {
    pub(crate) connected: bool,
    pub(crate) nickname: Option<String>,
    pub(crate) servers: Option<Arc<Vec<Server>>>,

    // keyed by server id
    pub(crate) channels: HashMap<String, Arc<Vec<Channel>>>,
    pub(crate) categories: HashMap<String, Arc<Vec<Category>>>,
    pub(crate) roles: HashMap<String, Arc<Vec<Role>>>,
    pub(crate) presences: HashMap<String, Arc<HashMap<String, Presence>>>,
    pub(crate) custom_emoji: HashMap<String, Arc<HashMap<String, String>>>,
    pub(crate) bans: HashMap<String, Arc<Vec<Ban>>>,
    pub(crate) audit_log: HashMap<String, Arc<Vec<AuditEntry>>>,
    pub(crate) automod_rules: HashMap<String, Arc<Vec<AutomodRule>>>,
    pub(crate) invites: HashMap<String, Arc<Vec<Invite>>>,
    pub(crate) server_events: HashMap<String, Arc<Vec<ScheduledEvent>>>,
    pub(crate) community_settings: HashMap<String, CommunitySettings>,
    pub(crate) templates: HashMap<String, Arc<Vec<Template>>>,
    pub(crate) notification_settings: HashMap<String, Arc<Vec<NotificationSetting>>>,

    // keyed by channel key (`server_id:channel`)
    pub(crate) messages: HashMap<String, Arc<Vec<Message>>>,
    pub(crate) members: HashMap<String, Arc<Vec<Member>>>,
    pub(crate) has_more: HashMap<String, bool>,
    pub(crate) unread_counts: HashMap<String, u64>,
    pub(crate) typing_users: HashMap<String, Arc<Vec<String>>>,
    pub(crate) typing_generations: HashMap<(String, String), u64>,
    pub(crate) pinned_messages: HashMap<String, Arc<Vec<PinnedMessage>>>,
    pub(crate) threads: HashMap<String, Arc<Vec<Thread>>>,
    pub(crate) forum_tags: HashMap<String, Arc<Vec<ForumTag>>>,

    // other keys
    pub(crate) event_rsvps: HashMap<String, Arc<Vec<Rsvp>>>,
    pub(crate) channel_follows: HashMap<String, Arc<Vec<ChannelFollow>>>,
    pub(crate) user_profiles: HashMap<String, Arc<UserProfile>>,
    pub(crate) avatars: HashMap<String, String>,

    pub(crate) bookmarks: Option<Arc<Vec<Bookmark>>>,
    pub(crate) discoverable_servers: Option<Arc<Vec<CommunitySettings>>>,
    pub(crate) search: SearchState,
    pub(crate) replying_to: Option<ReplyInfo>,
}

/// cheap-to-clone handle to the engine state
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// run the reducer for one inbound event. returns the effects the caller
    /// must carry out; the state transition itself is already committed.
    pub fn apply(&self, event: ServerEvent) -> Effects {
        let mut effects = Effects::default();
        self.write().apply_event(event, &mut effects);
        effects
    }

    /// remove a typing indicator if (and only if) it still belongs to the
    /// generation the expiry was scheduled for
    pub fn expire_typing(&self, key: &str, nickname: &str, generation: u64) {
        let mut state = self.write();
        let gen_key = (key.to_owned(), nickname.to_owned());
        if state.typing_generations.get(&gen_key) != Some(&generation) {
            return;
        }
        state.typing_generations.remove(&gen_key);
        let now_empty = match state.typing_users.get_mut(key) {
            Some(list) => {
                Arc::make_mut(list).retain(|n| n != nickname);
                list.is_empty()
            }
            None => false,
        };
        if now_empty {
            state.typing_users.remove(key);
        }
    }

    /// clear every server-derived map back to its empty sentinel. called on
    /// explicit disconnect; reconnects do not reset.
    pub fn reset(&self) {
        let mut state = self.write();
        let nickname = state.nickname.take();
        *state = StoreState {
            nickname,
            ..StoreState::default()
        };
    }

    /// transport hook: flipped on socket open/close, never by reducers
    pub fn set_connected(&self, connected: bool) {
        self.write().connected = connected;
    }

    /// transport hook: the identity used for self-suppression and unread
    /// accounting
    pub fn set_nickname(&self, nickname: &str) {
        self.write().nickname = Some(nickname.to_owned());
    }

    // ── selectors ──────────────────────────────────────────────────────

    pub fn connected(&self) -> bool {
        self.read().connected
    }

    pub fn nickname(&self) -> Option<String> {
        self.read().nickname.clone()
    }

    pub fn servers(&self) -> Arc<Vec<Server>> {
        self.read().servers.clone().unwrap_or_else(|| EMPTY_SERVERS.clone())
    }

    pub fn channels(&self, server_id: &str) -> Arc<Vec<Channel>> {
        self.read()
            .channels
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_CHANNELS.clone())
    }

    pub fn categories(&self, server_id: &str) -> Arc<Vec<Category>> {
        self.read()
            .categories
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_CATEGORIES.clone())
    }

    pub fn roles(&self, server_id: &str) -> Arc<Vec<Role>> {
        self.read()
            .roles
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_ROLES.clone())
    }

    pub fn messages(&self, key: &str) -> Arc<Vec<Message>> {
        self.read()
            .messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_MESSAGES.clone())
    }

    pub fn members(&self, key: &str) -> Arc<Vec<Member>> {
        self.read()
            .members
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_MEMBERS.clone())
    }

    pub fn has_more(&self, key: &str) -> bool {
        self.read().has_more.get(key).copied().unwrap_or(false)
    }

    /// absent key means zero unread
    pub fn unread_count(&self, key: &str) -> u64 {
        self.read().unread_counts.get(key).copied().unwrap_or(0)
    }

    pub fn typing_users(&self, key: &str) -> Arc<Vec<String>> {
        self.read()
            .typing_users
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_TYPING.clone())
    }

    pub fn presences(&self, server_id: &str) -> Arc<HashMap<String, Presence>> {
        self.read()
            .presences
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_PRESENCES.clone())
    }

    pub fn custom_emoji(&self, server_id: &str) -> Arc<HashMap<String, String>> {
        self.read()
            .custom_emoji
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_EMOJI.clone())
    }

    pub fn pinned_messages(&self, key: &str) -> Arc<Vec<PinnedMessage>> {
        self.read()
            .pinned_messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_PINS.clone())
    }

    pub fn threads(&self, key: &str) -> Arc<Vec<Thread>> {
        self.read()
            .threads
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_THREADS.clone())
    }

    pub fn forum_tags(&self, key: &str) -> Arc<Vec<ForumTag>> {
        self.read()
            .forum_tags
            .get(key)
            .cloned()
            .unwrap_or_else(|| EMPTY_FORUM_TAGS.clone())
    }

    pub fn bans(&self, server_id: &str) -> Arc<Vec<Ban>> {
        self.read()
            .bans
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_BANS.clone())
    }

    pub fn audit_log(&self, server_id: &str) -> Arc<Vec<AuditEntry>> {
        self.read()
            .audit_log
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_AUDIT.clone())
    }

    pub fn automod_rules(&self, server_id: &str) -> Arc<Vec<AutomodRule>> {
        self.read()
            .automod_rules
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_AUTOMOD.clone())
    }

    pub fn invites(&self, server_id: &str) -> Arc<Vec<Invite>> {
        self.read()
            .invites
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_INVITES.clone())
    }

    pub fn server_events(&self, server_id: &str) -> Arc<Vec<ScheduledEvent>> {
        self.read()
            .server_events
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_EVENTS.clone())
    }

    pub fn event_rsvps(&self, event_id: &str) -> Arc<Vec<Rsvp>> {
        self.read()
            .event_rsvps
            .get(event_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_RSVPS.clone())
    }

    pub fn channel_follows(&self, channel_id: &str) -> Arc<Vec<ChannelFollow>> {
        self.read()
            .channel_follows
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_FOLLOWS.clone())
    }

    pub fn community_settings(&self, server_id: &str) -> Option<CommunitySettings> {
        self.read().community_settings.get(server_id).cloned()
    }

    pub fn templates(&self, server_id: &str) -> Arc<Vec<Template>> {
        self.read()
            .templates
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_TEMPLATES.clone())
    }

    pub fn notification_settings(&self, server_id: &str) -> Arc<Vec<NotificationSetting>> {
        self.read()
            .notification_settings
            .get(server_id)
            .cloned()
            .unwrap_or_else(|| EMPTY_NOTIFICATIONS.clone())
    }

    pub fn user_profile(&self, user_id: &str) -> Option<Arc<UserProfile>> {
        self.read().user_profiles.get(user_id).cloned()
    }

    /// most recent non-empty avatar url seen for a nickname, from any of:
    /// message, join, names, profile
    pub fn avatar(&self, nickname: &str) -> Option<String> {
        self.read().avatars.get(nickname).cloned()
    }

    pub fn bookmarks(&self) -> Arc<Vec<Bookmark>> {
        self.read()
            .bookmarks
            .clone()
            .unwrap_or_else(|| EMPTY_BOOKMARKS.clone())
    }

    pub fn discoverable_servers(&self) -> Arc<Vec<CommunitySettings>> {
        self.read()
            .discoverable_servers
            .clone()
            .unwrap_or_else(|| EMPTY_DISCOVER.clone())
    }

    pub fn search(&self) -> SearchState {
        self.read().search.clone()
    }

    pub fn replying_to(&self) -> Option<ReplyInfo> {
        self.read().replying_to.clone()
    }

    pub fn set_replying_to(&self, reply: Option<ReplyInfo>) {
        self.write().replying_to = reply;
    }

    /// clear the search pane back to its empty state
    pub fn clear_search(&self) {
        self.write().search = SearchState::default();
    }

    // ── optimistic-layer and REST hooks ────────────────────────────────

    pub(crate) fn take_replying_to(&self) -> Option<ReplyInfo> {
        self.write().replying_to.take()
    }

    pub(crate) fn append_local_message(&self, key: &str, message: Message) {
        let mut state = self.write();
        Arc::make_mut(state.messages.entry(key.to_owned()).or_default()).push(message);
    }

    pub(crate) fn clear_unread(&self, key: &str) {
        self.write().unread_counts.remove(key);
    }

    pub(crate) fn set_custom_emoji(&self, server_id: &str, emoji: Vec<CustomEmoji>) {
        let map: HashMap<_, _> = emoji.into_iter().map(|e| (e.name, e.image_url)).collect();
        self.write()
            .custom_emoji
            .insert(server_id.to_owned(), Arc::new(map));
    }
}

impl StoreState {
    /// route one event to its reducer. exactly one arm per wire variant.
    fn apply_event(&mut self, event: ServerEvent, effects: &mut Effects) {
        match event {
            ServerEvent::Message {
                id,
                server_id,
                from,
                target,
                content,
                timestamp,
                avatar_url,
                reply_to,
                attachments,
            } => self.on_message(
                id,
                server_id.as_deref(),
                from,
                target,
                content,
                timestamp,
                avatar_url,
                reply_to,
                attachments.unwrap_or_default(),
            ),
            ServerEvent::MessageEdit {
                id,
                server_id,
                channel,
                content,
                edited_at,
            } => self.on_message_edit(&server_id, &channel, id, content, edited_at),
            ServerEvent::MessageDelete {
                id,
                server_id,
                channel,
            } => self.on_message_delete(&server_id, &channel, id),
            ServerEvent::MessageEmbed {
                message_id,
                server_id,
                channel,
                embeds,
            } => self.on_message_embed(&server_id, &channel, message_id, embeds),
            ServerEvent::BulkMessageDelete {
                server_id,
                channel,
                message_ids,
            } => self.on_bulk_message_delete(&server_id, &channel, &message_ids),
            ServerEvent::ReactionAdd {
                message_id,
                server_id,
                channel,
                user_id,
                emoji,
                ..
            } => self.on_reaction_add(&server_id, &channel, message_id, user_id, emoji),
            ServerEvent::ReactionRemove {
                message_id,
                server_id,
                channel,
                user_id,
                emoji,
                ..
            } => self.on_reaction_remove(&server_id, &channel, message_id, &user_id, &emoji),
            ServerEvent::History {
                server_id,
                channel,
                messages,
                has_more,
            } => self.on_history(&server_id, &channel, messages, has_more),

            ServerEvent::TypingStart {
                server_id,
                channel,
                nickname,
            } => effects.typing_expiry = self.on_typing_start(&server_id, &channel, nickname),
            ServerEvent::PresenceUpdate {
                server_id,
                presence,
            } => self.on_presence_update(&server_id, presence),
            ServerEvent::PresenceList {
                server_id,
                presences,
            } => self.on_presence_list(&server_id, presences),

            ServerEvent::Join {
                nickname,
                server_id,
                channel,
                avatar_url,
            } => self.on_join(&server_id, &channel, nickname, avatar_url),
            ServerEvent::Part {
                nickname,
                server_id,
                channel,
                ..
            } => self.on_part(&server_id, &channel, &nickname),
            ServerEvent::Quit { nickname, .. } => self.on_quit(&nickname),
            ServerEvent::Names {
                server_id,
                channel,
                members,
            } => self.on_names(&server_id, &channel, members),
            ServerEvent::NickChange { old_nick, new_nick } => self.on_nick_change(&old_nick, &new_nick),
            ServerEvent::MemberKick {
                server_id, user_id, ..
            }
            | ServerEvent::MemberBan {
                server_id, user_id, ..
            } => self.on_member_removed(&server_id, &user_id),
            // surfaces for these refresh on the next explicit query
            ServerEvent::MemberUnban { .. }
            | ServerEvent::MemberTimeout { .. }
            | ServerEvent::ServerNicknameUpdate { .. }
            | ServerEvent::MemberRoleUpdate { .. } => {}

            ServerEvent::ChannelList {
                server_id,
                channels,
            } => {
                self.on_channel_list(&server_id, channels);
                // load-bearing priming: a channel list means the client is
                // looking at this server, so pull the rest of its structure
                effects.commands.extend([
                    ClientCommand::ListRoles {
                        server_id: server_id.clone(),
                    },
                    ClientCommand::ListCategories {
                        server_id: server_id.clone(),
                    },
                    ClientCommand::GetPresences { server_id },
                ]);
            }
            ServerEvent::TopicChange {
                server_id,
                channel,
                topic,
                ..
            }
            | ServerEvent::Topic {
                server_id,
                channel,
                topic,
            } => self.on_topic(&server_id, &channel, topic),
            ServerEvent::ChannelReorder {
                server_id,
                channels,
            } => self.on_channel_reorder(&server_id, &channels),
            ServerEvent::SlowModeUpdate {
                server_id,
                channel,
                seconds,
            } => self.on_slow_mode(&server_id, &channel, seconds),
            ServerEvent::NsfwUpdate {
                server_id,
                channel,
                is_nsfw,
            } => self.on_nsfw(&server_id, &channel, is_nsfw),
            ServerEvent::CategoryList {
                server_id,
                categories,
            } => self.on_category_list(&server_id, categories),
            ServerEvent::CategoryUpdate {
                server_id,
                category,
            } => self.on_category_update(&server_id, category),
            ServerEvent::CategoryDelete {
                server_id,
                category_id,
            } => self.on_category_delete(&server_id, &category_id),
            ServerEvent::RoleList { server_id, roles } => self.on_role_list(&server_id, roles),
            ServerEvent::RoleUpdate { server_id, role } => self.on_role_update(&server_id, role),
            ServerEvent::RoleDelete { server_id, role_id } => self.on_role_delete(&server_id, &role_id),
            ServerEvent::ServerList { servers } => self.servers = Some(Arc::new(servers)),
            ServerEvent::UnreadCounts { server_id, counts } => self.on_unread_counts(&server_id, counts),

            ServerEvent::MessagePin {
                server_id,
                channel,
                pin,
            } => self.on_message_pin(&server_id, &channel, pin),
            ServerEvent::MessageUnpin {
                server_id,
                channel,
                message_id,
            } => self.on_message_unpin(&server_id, &channel, &message_id),
            ServerEvent::PinnedMessages {
                server_id,
                channel,
                pins,
            } => self.on_pinned_messages(&server_id, &channel, pins),
            ServerEvent::ThreadCreate {
                server_id,
                parent_channel,
                thread,
            } => self.on_thread_create(&server_id, &parent_channel, thread),
            ServerEvent::ThreadUpdate { server_id, thread } => self.on_thread_update(&server_id, thread),
            ServerEvent::ThreadList {
                server_id,
                channel,
                threads,
            } => self.on_thread_list(&server_id, &channel, threads),
            ServerEvent::ForumTagList {
                server_id,
                channel,
                tags,
            } => self.on_forum_tag_list(&server_id, &channel, tags),
            ServerEvent::ForumTagUpdate {
                server_id,
                channel,
                tag,
            } => self.on_forum_tag_update(&server_id, &channel, tag),
            ServerEvent::ForumTagDelete {
                server_id,
                channel,
                tag_id,
            } => self.on_forum_tag_delete(&server_id, &channel, &tag_id),
            ServerEvent::BookmarkList { bookmarks } => self.bookmarks = Some(Arc::new(bookmarks)),
            ServerEvent::BookmarkAdd { bookmark } => self.on_bookmark_add(bookmark),
            ServerEvent::BookmarkRemove { message_id } => self.on_bookmark_remove(&message_id),

            ServerEvent::AuditLogEntries { server_id, entries } => {
                self.audit_log.insert(server_id, Arc::new(entries));
            }
            ServerEvent::BanList { server_id, bans } => {
                self.bans.insert(server_id, Arc::new(bans));
            }
            ServerEvent::AutomodRuleList { server_id, rules } => {
                self.automod_rules.insert(server_id, Arc::new(rules));
            }
            ServerEvent::AutomodRuleUpdate { server_id, rule } => self.on_automod_update(&server_id, rule),
            ServerEvent::AutomodRuleDelete { server_id, rule_id } => {
                self.on_automod_delete(&server_id, &rule_id)
            }

            ServerEvent::InviteList { server_id, invites } => {
                self.invites.insert(server_id, Arc::new(invites));
            }
            ServerEvent::InviteCreate { server_id, invite } => self.on_invite_create(&server_id, invite),
            ServerEvent::InviteDelete {
                server_id,
                invite_id,
            } => self.on_invite_delete(&server_id, &invite_id),
            ServerEvent::EventList { server_id, events } => {
                self.server_events.insert(server_id, Arc::new(events));
            }
            ServerEvent::EventUpdate { server_id, event } => self.on_event_update(&server_id, event),
            ServerEvent::EventDelete {
                server_id,
                event_id,
            } => self.on_event_delete(&server_id, &event_id),
            ServerEvent::EventRsvpList { event_id, rsvps } => {
                self.event_rsvps.insert(event_id, Arc::new(rsvps));
            }
            ServerEvent::ServerCommunity { community } => {
                self.community_settings
                    .insert(community.server_id.clone(), community);
            }
            ServerEvent::DiscoverServers { servers } => self.discoverable_servers = Some(Arc::new(servers)),
            ServerEvent::ChannelFollowList {
                channel_id,
                follows,
            } => {
                self.channel_follows.insert(channel_id, Arc::new(follows));
            }
            ServerEvent::ChannelFollowCreate { follow } => self.on_channel_follow_create(follow),
            ServerEvent::ChannelFollowDelete { follow_id } => self.on_channel_follow_delete(&follow_id),
            ServerEvent::TemplateList {
                server_id,
                templates,
            } => {
                self.templates.insert(server_id, Arc::new(templates));
            }
            ServerEvent::TemplateUpdate {
                server_id,
                template,
            } => self.on_template_update(&server_id, template),
            ServerEvent::TemplateDelete {
                server_id,
                template_id,
            } => self.on_template_delete(&server_id, &template_id),

            ServerEvent::SearchResults {
                query,
                results,
                total_count,
                ..
            } => {
                self.search = SearchState {
                    query,
                    results: Some(Arc::new(results)),
                    total_count,
                };
            }
            ServerEvent::NotificationSettings {
                server_id,
                settings,
            } => {
                self.notification_settings
                    .insert(server_id, Arc::new(settings));
            }
            ServerEvent::UserProfile { profile } => self.on_user_profile(profile),

            ServerEvent::ServerNotice { message } => info!(%message, "server notice"),
            ServerEvent::Error { code, message } => error!(%code, %message, "server error"),
            ServerEvent::Unknown => debug!("ignoring unknown event type"),
        }
    }

    /// cache the freshest non-empty avatar for a nickname
    pub(crate) fn remember_avatar(&mut self, nickname: &str, avatar_url: Option<&str>) {
        if let Some(url) = avatar_url.filter(|u| !u.is_empty()) {
            self.avatars.insert(nickname.to_owned(), url.to_owned());
        }
    }
}

//! Ephemeral view intent: what the user is looking at and which panels are
//! open. None of this comes from the server and none of it is cleared by a
//! disconnect. Server folders are the one durable piece, persisted on every
//! mutation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{LocalStorage, SERVER_FOLDERS_KEY};

/// a user-defined grouping of servers in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFolder {
    pub id: Uuid,
    pub name: String,
    pub server_ids: Vec<String>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_server: Option<String>,
    pub active_channel: Option<String>,
    pub show_member_list: bool,
    pub show_settings: bool,
    pub show_server_settings: bool,
    pub show_search: bool,
    pub show_quick_switcher: bool,
    pub show_pinned_messages: bool,
    pub show_thread_panel: bool,
    pub show_bookmarks: bool,
    pub show_moderation_panel: bool,
    pub show_community_panel: bool,
    /// user id of the open profile popout
    pub show_user_profile: Option<String>,
    pub active_thread_id: Option<String>,
    pub collapsed_categories: HashMap<String, bool>,
    pub server_folders: Vec<ServerFolder>,
}

pub struct UiStore {
    inner: Arc<RwLock<UiState>>,
    storage: LocalStorage,
}

impl UiStore {
    /// build the store, restoring persisted folders. a missing or corrupt
    /// folder file means no folders, never an error.
    pub(crate) fn load(storage: LocalStorage) -> Self {
        let server_folders = storage
            .get(SERVER_FOLDERS_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(UiState {
                server_folders,
                ..UiState::default()
            })),
            storage,
        }
    }

    pub fn snapshot(&self) -> UiState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_mut<T>(&self, f: impl FnOnce(&mut UiState) -> T) -> T {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn persist_folders(&self, folders: &[ServerFolder]) {
        if let Ok(json) = serde_json::to_string(folders) {
            self.storage.set(SERVER_FOLDERS_KEY, &json);
        }
    }

    // ── navigation ─────────────────────────────────────────────────────

    /// switching servers always drops the channel selection; the view picks
    /// a new one once the channel list arrives
    pub fn set_active_server(&self, server_id: Option<&str>) {
        self.with_mut(|ui| {
            ui.active_server = server_id.map(Into::into);
            ui.active_channel = None;
        });
    }

    pub fn set_active_channel(&self, channel: Option<&str>) {
        self.with_mut(|ui| ui.active_channel = channel.map(Into::into));
    }

    /// opening a thread opens the panel; closing it closes the panel
    pub fn set_active_thread(&self, thread_id: Option<&str>) {
        self.with_mut(|ui| {
            ui.show_thread_panel = thread_id.is_some();
            ui.active_thread_id = thread_id.map(Into::into);
        });
    }

    // ── panels ─────────────────────────────────────────────────────────

    pub fn set_show_member_list(&self, show: bool) {
        self.with_mut(|ui| ui.show_member_list = show);
    }

    pub fn set_show_settings(&self, show: bool) {
        self.with_mut(|ui| ui.show_settings = show);
    }

    pub fn set_show_server_settings(&self, show: bool) {
        self.with_mut(|ui| ui.show_server_settings = show);
    }

    pub fn set_show_search(&self, show: bool) {
        self.with_mut(|ui| ui.show_search = show);
    }

    pub fn set_show_quick_switcher(&self, show: bool) {
        self.with_mut(|ui| ui.show_quick_switcher = show);
    }

    pub fn set_show_pinned_messages(&self, show: bool) {
        self.with_mut(|ui| ui.show_pinned_messages = show);
    }

    pub fn set_show_bookmarks(&self, show: bool) {
        self.with_mut(|ui| ui.show_bookmarks = show);
    }

    pub fn set_show_moderation_panel(&self, show: bool) {
        self.with_mut(|ui| ui.show_moderation_panel = show);
    }

    pub fn set_show_community_panel(&self, show: bool) {
        self.with_mut(|ui| ui.show_community_panel = show);
    }

    pub fn set_show_user_profile(&self, user_id: Option<&str>) {
        self.with_mut(|ui| ui.show_user_profile = user_id.map(Into::into));
    }

    pub fn toggle_category_collapsed(&self, category_id: &str) {
        self.with_mut(|ui| {
            let entry = ui
                .collapsed_categories
                .entry(category_id.to_owned())
                .or_insert(false);
            *entry = !*entry;
        });
    }

    // ── server folders (persisted) ─────────────────────────────────────

    pub fn server_folders(&self) -> Vec<ServerFolder> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .server_folders
            .clone()
    }

    pub fn create_folder(&self, name: &str, server_ids: Vec<String>) -> Uuid {
        let id = Uuid::new_v4();
        let folders = self.with_mut(|ui| {
            ui.server_folders.push(ServerFolder {
                id,
                name: name.into(),
                server_ids,
                collapsed: false,
            });
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
        id
    }

    pub fn delete_folder(&self, id: Uuid) {
        let folders = self.with_mut(|ui| {
            ui.server_folders.retain(|f| f.id != id);
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
    }

    pub fn rename_folder(&self, id: Uuid, name: &str) {
        let folders = self.with_mut(|ui| {
            if let Some(folder) = ui.server_folders.iter_mut().find(|f| f.id == id) {
                folder.name = name.into();
            }
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
    }

    pub fn toggle_folder_collapsed(&self, id: Uuid) {
        let folders = self.with_mut(|ui| {
            if let Some(folder) = ui.server_folders.iter_mut().find(|f| f.id == id) {
                folder.collapsed = !folder.collapsed;
            }
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
    }

    pub fn add_server_to_folder(&self, id: Uuid, server_id: &str) {
        let folders = self.with_mut(|ui| {
            if let Some(folder) = ui.server_folders.iter_mut().find(|f| f.id == id) {
                if !folder.server_ids.iter().any(|s| s == server_id) {
                    folder.server_ids.push(server_id.into());
                }
            }
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
    }

    pub fn remove_server_from_folder(&self, id: Uuid, server_id: &str) {
        let folders = self.with_mut(|ui| {
            if let Some(folder) = ui.server_folders.iter_mut().find(|f| f.id == id) {
                folder.server_ids.retain(|s| s != server_id);
            }
            ui.server_folders.clone()
        });
        self.persist_folders(&folders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> UiStore {
        let dir = std::env::temp_dir().join(format!("concord-test-{}", Uuid::new_v4()));
        UiStore::load(LocalStorage::new(dir))
    }

    #[test]
    fn switching_server_clears_channel() {
        let ui = scratch();
        ui.set_active_server(Some("srv1"));
        ui.set_active_channel(Some("#general"));
        ui.set_active_server(Some("srv2"));
        let state = ui.snapshot();
        assert_eq!(state.active_server.as_deref(), Some("srv2"));
        assert!(state.active_channel.is_none());
    }

    #[test]
    fn thread_selection_drives_the_panel() {
        let ui = scratch();
        ui.set_active_thread(Some("t1"));
        assert!(ui.snapshot().show_thread_panel);
        ui.set_active_thread(None);
        let state = ui.snapshot();
        assert!(!state.show_thread_panel);
        assert!(state.active_thread_id.is_none());
    }

    #[test]
    fn category_collapse_toggles() {
        let ui = scratch();
        ui.toggle_category_collapsed("cat1");
        assert_eq!(ui.snapshot().collapsed_categories.get("cat1"), Some(&true));
        ui.toggle_category_collapsed("cat1");
        assert_eq!(ui.snapshot().collapsed_categories.get("cat1"), Some(&false));
    }

    #[test]
    fn folders_persist_across_loads() {
        let dir = std::env::temp_dir().join(format!("concord-test-{}", Uuid::new_v4()));
        let ui = UiStore::load(LocalStorage::new(dir.clone()));
        let id = ui.create_folder("work", vec!["srv1".into(), "srv2".into()]);
        ui.toggle_folder_collapsed(id);

        let reloaded = UiStore::load(LocalStorage::new(dir.clone()));
        let folders = reloaded.server_folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "work");
        assert!(folders[0].collapsed);
        assert_eq!(folders[0].server_ids, ["srv1", "srv2"]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_folder_file_falls_back_to_empty() {
        let dir = std::env::temp_dir().join(format!("concord-test-{}", Uuid::new_v4()));
        let storage = LocalStorage::new(dir.clone());
        storage.set(crate::storage::SERVER_FOLDERS_KEY, "{definitely not json");
        let ui = UiStore::load(LocalStorage::new(dir.clone()));
        assert!(ui.server_folders().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn folder_membership_is_unique() {
        let ui = scratch();
        let id = ui.create_folder("fun", vec![]);
        ui.add_server_to_folder(id, "srv1");
        ui.add_server_to_folder(id, "srv1");
        assert_eq!(ui.server_folders()[0].server_ids, ["srv1"]);
        ui.remove_server_from_folder(id, "srv1");
        assert!(ui.server_folders()[0].server_ids.is_empty());
    }
}

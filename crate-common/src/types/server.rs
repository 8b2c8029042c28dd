use serde::{Deserialize, Serialize};

use super::Permissions;

/// a server the viewer belongs to, as listed by `server_list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub member_count: usize,
    /// the viewer's named role in this server, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// effective permission bitfield for the viewer
    #[serde(default)]
    pub my_permissions: Permissions,
}

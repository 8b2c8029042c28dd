use serde::{Deserialize, Serialize};

use super::Permissions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub server_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// higher positions render first and outrank lower ones
    pub position: i32,
    pub permissions: Permissions,
    /// the implicit everyone role; cannot be deleted or unassigned
    pub is_default: bool,
}

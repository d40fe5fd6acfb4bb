//! Per-user permission document.

use serde::{Deserialize, Serialize};

/// Permission flags for one principal, keyed by that principal's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPermission {
    pub owner_id: String,
    pub some_permission: bool,
}

/// Request body for writing a permission document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutUserPermissionRequest {
    pub some_permission: bool,
}

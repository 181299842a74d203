//! User identity data model.

use serde::{Deserialize, Serialize};

/// Account identity owned by the session store.
///
/// Replaced wholesale on login or identity refresh, cleared on logout; no
/// field is ever patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
}

/// Display identity attached to authored content (courses and comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::value::truthy_string;

/// Role tag that grants administrative views.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Snapshot of the persisted identity and credential material.
///
/// Every field is optional because storage may hold a partial record; a
/// partial record is never treated as a live session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub credential_token: Option<String>,
}

impl SessionRecord {
    /// True iff both the user id and the credential token are present.
    ///
    /// Username and role are not consulted.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some() && self.credential_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// The identity part of a successful login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl SessionIdentity {
    /// Reads `id`, `username` and `role` from a login response body.
    ///
    /// On failure returns the names of the fields that were absent or empty.
    pub fn from_login_body(body: &Value) -> Result<Self, Vec<&'static str>> {
        let user_id = truthy_string(body.get("id"));
        let username = truthy_string(body.get("username"));
        let role = truthy_string(body.get("role"));

        match (user_id, username, role) {
            (Some(user_id), Some(username), Some(role)) => Ok(SessionIdentity {
                user_id,
                username,
                role,
            }),
            (user_id, username, role) => {
                let mut missing = Vec::new();
                if user_id.is_none() {
                    missing.push("id");
                }
                if username.is_none() {
                    missing.push("username");
                }
                if role.is_none() {
                    missing.push("role");
                }
                Err(missing)
            }
        }
    }
}

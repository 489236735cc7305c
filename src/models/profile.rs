use std::fmt;

use serde::Serialize;

/// Body of `POST /register`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct RegistrationProfile {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords stay out of Debug output so they never reach the logs.
impl fmt::Debug for RegistrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_passwords() {
        let credentials = Credentials::new("alice", "secret1");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret1"));

        let profile = RegistrationProfile {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(!format!("{:?}", profile).contains("secret1"));
    }

    #[test]
    fn login_body_serializes_both_fields() {
        let body = serde_json::to_value(Credentials::new("alice", "secret1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"username": "alice", "password": "secret1"})
        );
    }
}

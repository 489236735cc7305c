use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the authentication backend lives and how we talk to it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout. Left to the transport default when unset.
    #[serde(default)]
    pub timeout_in_ms: Option<u64>,
    /// Cookies expired on logout (session id and CSRF token).
    #[serde(default = "default_session_cookies")]
    pub session_cookies: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:8081/api/auth".to_string()
}

fn default_session_cookies() -> Vec<String> {
    vec!["JSESSIONID".to_string(), "XSRF-TOKEN".to_string()]
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_in_ms: None,
            session_cookies: default_session_cookies(),
        }
    }
}

impl BackendConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

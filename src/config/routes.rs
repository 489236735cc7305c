use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// View paths known to the application shell.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RoutesConfig {
    #[serde(default = "default_login")]
    pub login: String,
    #[serde(default = "default_home")]
    pub home: String,
    /// Where a successful login lands.
    #[serde(default = "default_after_login")]
    pub after_login: String,
    /// Patterns that require an authenticated session, e.g. `/task-details/:id`.
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_home() -> String {
    "/".to_string()
}

fn default_after_login() -> String {
    "/tasks".to_string()
}

fn default_protected() -> Vec<String> {
    [
        "/tasks",
        "/add-task",
        "/task-details/:id",
        "/history",
        "/update-task/:id",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            home: default_home(),
            after_login: default_after_login(),
            protected: default_protected(),
        }
    }
}

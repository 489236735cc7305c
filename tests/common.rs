#![allow(dead_code)]

use std::sync::Arc;

use figment::providers::{Format, Yaml};
use figment::Figment;
use mockito::{Mock, ServerGuard};
use reqwest::cookie::Jar;
use taskauth::config::{Config, ConfigV1};
use taskauth::state::AppState;
use taskauth::store::{MemoryStorage, Storage};

pub fn test_config(base_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "console"
backend:
  base_url: "{}/api/auth"
  timeout_in_ms: 3000
"#,
        base_url
    );

    Figment::new()
        .merge(Yaml::string(&yaml))
        .extract::<Config>()
        .expect("Failed to parse test config YAML")
        .into()
}

/// One tab of the application over an origin's storage and cookies.
pub fn build_tab(server: &ServerGuard, storage: Arc<dyn Storage>, cookies: Arc<Jar>) -> AppState {
    AppState::with_cookie_jar(Arc::new(test_config(&server.url())), storage, cookies)
        .expect("state should build")
}

/// Two tabs of the same origin.
pub fn build_tabs(server: &ServerGuard) -> (AppState, AppState) {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
    let cookies = Arc::new(Jar::default());
    (
        build_tab(server, storage.clone(), cookies.clone()),
        build_tab(server, storage, cookies),
    )
}

pub fn build_app(server: &ServerGuard) -> AppState {
    AppState::new(
        Arc::new(test_config(&server.url())),
        Arc::new(MemoryStorage::default()),
    )
    .expect("state should build")
}

pub fn login_body(id: u64, username: &str, role: &str) -> String {
    format!(
        r#"{{"id": {}, "username": "{}", "role": "{}"}}"#,
        id, username, role
    )
}

pub async fn mock_login(server: &mut ServerGuard, id: u64, username: &str, role: &str) -> Mock {
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(login_body(id, username, role))
        .create_async()
        .await
}

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::backend::BackendConfig;
use super::logging::LoggingConfig;
use super::routes::RoutesConfig;
use super::storage::StorageConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl From<Config> for ConfigV1 {
    fn from(config: Config) -> Self {
        // handle configuration migration between versions here when necessary
        match config {
            Config::ConfigV1(c) => c,
        }
    }
}

/// Load config from a YAML file, with `TASKAUTH_` environment overrides
/// (e.g. `TASKAUTH_BACKEND__BASE_URL`).
pub fn load_config(path: &str) -> Result<ConfigV1, figment::Error> {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("TASKAUTH_").split("__"))
        .extract::<Config>()
        .map(ConfigV1::from)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ConfigV1 {
        Figment::new()
            .merge(Yaml::string(yaml))
            .extract::<Config>()
            .expect("config should parse")
            .into()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse("version: \"1.0.0\"\n");
        assert_eq!(config.backend.base_url, "http://localhost:8081/api/auth");
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.routes.protected.len(), 5);
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.storage, StorageConfig::Memory(_)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result = Figment::new()
            .merge(Yaml::string("version: \"2.0.0\"\n"))
            .extract::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = parse(
            r#"
version: "1.0.0"
backend:
  base_url: http://auth.internal/api/auth
  timeout_in_ms: 2500
routes:
  login: /signin
  protected:
    - /tasks
"#,
        );
        assert_eq!(config.backend.base_url, "http://auth.internal/api/auth");
        assert_eq!(config.backend.timeout_in_ms, Some(2500));
        assert_eq!(config.backend.session_cookies.len(), 2);
        assert_eq!(config.routes.login, "/signin");
        assert_eq!(config.routes.protected, vec!["/tasks"]);
        assert_eq!(config.routes.after_login, "/tasks");
    }
}

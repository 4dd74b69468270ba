//! For reading application configuration.

use config::{ConfigError, Environment, File, Map, Source};
use serde::Deserialize;
use std::time::Duration;

/// The key holding the greeting text.
const GREETING_KEY: &str = "greeting_service_greeting";

/// An environment variable that overrides the greeting text under its traditional name.
pub const GREETING_ENV_VAR: &str = "greetingServiceGreeting";

/// The greeting used when none is configured.
pub const DEFAULT_GREETING: &str = "Hello";

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub log: LogConfig,
    /// Metrics configuration.
    pub metrics: MetricsConfig,
    /// The salutation used in every greeting.
    pub greeting_service_greeting: String,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub address: String,
    /// Server http port.
    pub port: u16,
    /// How long a request may take before it is aborted.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// The maximum number of requests handled at once.
    pub concurrency_limit: usize,
}

/// Logging configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct LogConfig {
    /// Emit logs as JSON lines instead of human readable text.
    pub json: bool,
}

/// Metrics configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus recorder and serve `/metrics`.
    pub enabled: bool,
}

/// Retrieve [`Config`] from defaults, an optional `config` file and the environment.
#[tracing::instrument]
pub fn load_config() -> Result<Config, ConfigError> {
    build_config(
        File::with_name("config").required(false),
        std::env::vars().collect(),
    )
}

/// Layers `file` and then `env` on top of the defaults.
///
/// Variables prefixed with `APP__` override the file, and [`GREETING_ENV_VAR`]
/// overrides everything else.
fn build_config<S>(file: S, env: Map<String, String>) -> Result<Config, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let greeting = env.get(GREETING_ENV_VAR).cloned();
    config::Config::builder()
        .set_default("server.address", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.request_timeout", "10s")?
        .set_default("server.concurrency_limit", 500)?
        .set_default("log.json", false)?
        .set_default("metrics.enabled", true)?
        .set_default(GREETING_KEY, DEFAULT_GREETING)?
        .add_source(file)
        .add_source(
            Environment::with_prefix("app")
                .separator("__")
                .source(Some(env)),
        )
        .set_override_option(GREETING_KEY, greeting)?
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str, env: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        build_config(File::from_str(toml, FileFormat::Toml), env)
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let config = from_toml("", &[]).unwrap();
        assert_eq!(DEFAULT_GREETING, config.greeting_service_greeting);
        assert_eq!("127.0.0.1", config.server.address);
        assert_eq!(8080, config.server.port);
        assert_eq!(Duration::from_secs(10), config.server.request_timeout);
        assert_eq!(500, config.server.concurrency_limit);
        assert!(!config.log.json);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn file_overrides_defaults() {
        let toml = r#"
            greeting_service_greeting = "Hei"

            [server]
            port = 3000
            request_timeout = "250ms"
        "#;
        let config = from_toml(toml, &[]).unwrap();
        assert_eq!("Hei", config.greeting_service_greeting);
        assert_eq!(3000, config.server.port);
        assert_eq!(Duration::from_millis(250), config.server.request_timeout);
        assert_eq!("127.0.0.1", config.server.address);
    }

    #[test]
    fn greeting_variable_wins_over_file() {
        let toml = r#"greeting_service_greeting = "Hei""#;
        let config = from_toml(toml, &[(GREETING_ENV_VAR, "Bonjour")]).unwrap();
        assert_eq!("Bonjour", config.greeting_service_greeting);
    }

    #[test]
    fn empty_greeting_is_kept_as_is() {
        let config = from_toml("", &[(GREETING_ENV_VAR, "")]).unwrap();
        assert_eq!("", config.greeting_service_greeting);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let toml = r#"
            [server]
            port = "not a port"
        "#;
        assert!(from_toml(toml, &[]).is_err());
    }

    #[test]
    fn prefixed_variable_overrides_file() {
        let toml = r#"greeting_service_greeting = "Hei""#;
        let env = [("APP__GREETING_SERVICE_GREETING", "Hallo")];
        let config = from_toml(toml, &env).unwrap();
        assert_eq!("Hallo", config.greeting_service_greeting);
    }

    #[test]
    fn greeting_variable_wins_over_prefixed_variable() {
        let env = [
            ("APP__GREETING_SERVICE_GREETING", "Hallo"),
            (GREETING_ENV_VAR, "Bonjour"),
        ];
        let config = from_toml("", &env).unwrap();
        assert_eq!("Bonjour", config.greeting_service_greeting);
    }

    #[test]
    fn prefixed_server_port_is_picked_up() {
        let toml = r#"
            [server]
            port = 3000
        "#;
        let config = from_toml(toml, &[("APP__SERVER__PORT", "9000")]).unwrap();
        assert_eq!(9000, config.server.port);
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let config = from_toml("", &[("PORT", "1234"), ("GREETING", "Yo")]).unwrap();
        assert_eq!(8080, config.server.port);
        assert_eq!(DEFAULT_GREETING, config.greeting_service_greeting);
    }
}

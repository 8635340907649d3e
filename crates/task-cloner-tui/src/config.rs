/*
[INPUT]:  YAML configuration file and TASK_CLONER__* environment variables
[OUTPUT]: Parsed ClonerConfig and the Backend it selects
[POS]:    Configuration layer - backend, flow and logging setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use task_cloner_adapter::{
    Backend, ClientConfig, ClonerError, MockBackend, MockBackendConfig, RetryPolicy,
    WebhookBackend, WebhookClient,
};
use thiserror::Error;

pub const ENV_PREFIX: &str = "TASK_CLONER";
pub const ENV_SEPARATOR: &str = "__";
const APP_DIR: &str = "task-cloner";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_yaml::Error),
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Backend(#[from] ClonerError),
}

/// Top-level configuration for the task cloner
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClonerConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    #[default]
    Mock,
    Webhook,
}

/// Where imports and creates go
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,
    /// Required when `mode` is `webhook`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Sent as a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base of the browse URL the mock backend hands out
    #[serde(default = "default_browse_base_url")]
    pub browse_base_url: String,
    #[serde(default = "default_mock_import_delay_ms")]
    pub mock_import_delay_ms: u64,
    #[serde(default = "default_mock_create_delay_ms")]
    pub mock_create_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            webhook_url: None,
            auth_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            browse_base_url: default_browse_base_url(),
            mock_import_delay_ms: default_mock_import_delay_ms(),
            mock_create_delay_ms: default_mock_create_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Pause between a fetched task and the editor picking it up
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            notice_ttl_secs: default_notice_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Daily-rolling log files are written here when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_browse_base_url() -> String {
    "https://example.atlassian.net".to_string()
}

fn default_mock_import_delay_ms() -> u64 {
    1500
}

fn default_mock_create_delay_ms() -> u64 {
    2000
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_notice_ttl_secs() -> u64 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `<config_dir>/task-cloner/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl ClonerConfig {
    /// Load from `path` (required) or the default location (optional),
    /// then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// As [`ClonerConfig::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(
                        File::from(default_path)
                            .format(FileFormat::Yaml)
                            .required(false),
                    );
                }
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env);
        builder = builder.add_source(environment);

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(content, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.mode == BackendMode::Webhook {
            let url = self
                .backend
                .webhook_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    ConfigError::Invalid("backend.webhook_url is required in webhook mode".to_string())
                })?;
            let parsed = url::Url::parse(url)
                .map_err(|err| ConfigError::Invalid(format!("backend.webhook_url: {err}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(
                    "backend.webhook_url must use http or https".to_string(),
                ));
            }
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be positive".to_string(),
            ));
        }
        if self.flow.notice_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "flow.notice_ttl_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.flow.settle_delay_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.flow.notice_ttl_secs)
    }

    /// Instantiate the configured backend.
    pub fn build_backend(&self) -> Result<Arc<dyn Backend>, ConfigError> {
        let backend = &self.backend;
        match backend.mode {
            BackendMode::Mock => Ok(Arc::new(MockBackend::new(MockBackendConfig {
                import_delay: Duration::from_millis(backend.mock_import_delay_ms),
                create_delay: Duration::from_millis(backend.mock_create_delay_ms),
                browse_base_url: backend.browse_base_url.clone(),
            }))),
            BackendMode::Webhook => {
                let url = backend.webhook_url.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("backend.webhook_url is required in webhook mode".to_string())
                })?;
                let client_config = ClientConfig {
                    timeout: Duration::from_secs(backend.timeout_secs),
                    connect_timeout: Duration::from_secs(backend.connect_timeout_secs),
                };
                let mut client = WebhookClient::with_config(client_config, url)?;
                if let Some(token) = backend.auth_token.as_deref() {
                    client = client.with_auth_token(token);
                }
                let retry = RetryPolicy {
                    max_retries: backend.max_retries,
                    ..RetryPolicy::default()
                };
                Ok(Arc::new(WebhookBackend::new(client, retry)))
            }
        }
    }
}

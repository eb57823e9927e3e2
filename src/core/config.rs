//! Configuration handling for Menugate
//!
//! Supports menugate.toml, .menugaterc, a user-level config file and
//! environment variable overrides.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;

use crate::core::{GateError, GateResult};
use crate::gate::rules::{default_rules, DEFAULT_LANDING_PATH, TOP_TIER_CODE};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend location
    pub server: ServerConfig,

    /// Network configuration
    pub network: NetworkConfig,

    /// Permission gate configuration
    pub gate: GateConfig,

    /// CSRF helper configuration
    pub csrf: CsrfConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the content-management site
    pub base_url: String,

    /// Prefix of the REST API below the origin
    pub api_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout: u64,

    /// Session cookie sent with every request (`name=value`)
    pub cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Page used for both the denied and the generic-error redirect
    pub landing_path: String,

    /// Authorization code that bypasses every page rule
    pub top_tier_code: String,

    /// Page path to required capability
    pub rules: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Header used when the token endpoint does not name one
    pub header_name: String,

    /// Form field used when the token endpoint does not name one
    pub parameter_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            network: NetworkConfig::default(),
            gate: GateConfig::default(),
            csrf: CsrfConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_prefix: "/api".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            cookie: None,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            top_tier_code: TOP_TIER_CODE.to_string(),
            rules: default_rules(),
        }
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            header_name: "X-XSRF-TOKEN".to_string(),
            parameter_name: "_csrf".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the user config dir and the project directory
    pub fn load(project_dir: &Path) -> GateResult<Self> {
        let mut config = Config::default();

        if let Some(user_file) = Self::user_config_file() {
            if user_file.exists() {
                config = config.merge(Self::read_toml(&user_file)?);
            }
        }

        config = config.merge_project_files(project_dir)?.apply_env_overrides();
        config.validate()?;

        tracing::debug!("Loaded configuration for {}", config.server.base_url);
        Ok(config)
    }

    /// Load only the project files, without the user file or environment
    pub fn load_project(project_dir: &Path) -> GateResult<Self> {
        let config = Config::default().merge_project_files(project_dir)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_project_files(mut self, project_dir: &Path) -> GateResult<Self> {
        let toml_path = project_dir.join("menugate.toml");
        if toml_path.exists() {
            self = self.merge(Self::read_toml(&toml_path)?);
        }

        // .menugaterc is JSON
        let rc_path = project_dir.join(".menugaterc");
        if rc_path.exists() {
            let content = std::fs::read_to_string(&rc_path)?;
            let file_config: Config = serde_json::from_str(&content)?;
            self = self.merge(file_config);
        }

        Ok(self)
    }

    fn read_toml(path: &Path) -> GateResult<Config> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Location of the per-user config file
    pub fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("com", "menugate", "menugate")
            .map(|dirs| dirs.config_dir().join("menugate.toml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(self, other: Config) -> Self {
        let server_defaults = ServerConfig::default();
        let network_defaults = NetworkConfig::default();
        let gate_defaults = GateConfig::default();
        let csrf_defaults = CsrfConfig::default();

        Self {
            server: ServerConfig {
                base_url: if other.server.base_url != server_defaults.base_url {
                    other.server.base_url
                } else {
                    self.server.base_url
                },
                api_prefix: if other.server.api_prefix != server_defaults.api_prefix {
                    other.server.api_prefix
                } else {
                    self.server.api_prefix
                },
            },
            network: NetworkConfig {
                timeout: if other.network.timeout != network_defaults.timeout {
                    other.network.timeout
                } else {
                    self.network.timeout
                },
                cookie: other.network.cookie.or(self.network.cookie),
            },
            gate: GateConfig {
                landing_path: if other.gate.landing_path != gate_defaults.landing_path {
                    other.gate.landing_path
                } else {
                    self.gate.landing_path
                },
                top_tier_code: if other.gate.top_tier_code != gate_defaults.top_tier_code {
                    other.gate.top_tier_code
                } else {
                    self.gate.top_tier_code
                },
                // A rule table replaces the previous one as a whole
                rules: if other.gate.rules != gate_defaults.rules {
                    other.gate.rules
                } else {
                    self.gate.rules
                },
            },
            csrf: CsrfConfig {
                header_name: if other.csrf.header_name != csrf_defaults.header_name {
                    other.csrf.header_name
                } else {
                    self.csrf.header_name
                },
                parameter_name: if other.csrf.parameter_name != csrf_defaults.parameter_name {
                    other.csrf.parameter_name
                } else {
                    self.csrf.parameter_name
                },
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(base_url) = env::var("MENUGATE_BASE_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(cookie) = env::var("MENUGATE_COOKIE") {
            if !cookie.is_empty() {
                self.network.cookie = Some(cookie);
            }
        }

        if let Ok(timeout) = env::var("MENUGATE_TIMEOUT") {
            if let Ok(n) = timeout.parse() {
                self.network.timeout = n;
            }
        }

        if let Ok(landing) = env::var("MENUGATE_LANDING_PATH") {
            self.gate.landing_path = landing;
        }

        self
    }

    fn validate(&self) -> GateResult<()> {
        url::Url::parse(&self.server.base_url)
            .map_err(|e| GateError::config(format!("invalid base_url {}: {}", self.server.base_url, e)))?;

        if !self.gate.landing_path.starts_with('/') {
            return Err(GateError::config(format!(
                "landing_path must be absolute, got {}",
                self.gate.landing_path
            )));
        }

        if self.network.timeout == 0 {
            return Err(GateError::config("network.timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Save configuration to menugate.toml
    pub fn save(&self, project_dir: &Path) -> GateResult<()> {
        let toml_path = project_dir.join("menugate.toml");
        let content = toml::to_string_pretty(self)?;
        std::fs::write(toml_path, content)?;
        Ok(())
    }
}

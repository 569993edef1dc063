// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path};
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pws.config.yaml";
pub const ENV_PREFIX: &str = "PWS_";

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Seconds a preflight response may be cached
    pub cors_max_age: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec![],
            cors_max_age: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Exponentiate on the rayon pool
    pub parallel: bool,
    /// Elements per parallel work item
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            batch_size: 64,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Emit one log event per element
    pub log: bool,
    /// Return the per-element trace in the `debug` field of responses
    pub include_in_response: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            log: true,
            include_in_response: true,
        }
    }
}

/// The structure of `pws.config.yaml`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    server: ServerConfig,
    engine: EngineConfig,
    trace: TraceConfig,
    /// The file this configuration was loaded from, if one existed
    #[serde(skip)]
    config_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn trace(&self) -> &TraceConfig {
        &self.trace
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.engine.batch_size == 0 {
            bail!("engine.batch_size must be at least 1");
        }
        Ok(())
    }
}

/// Values passed on the command line. These take precedence over every other source.
#[derive(Default, Clone, Debug)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Load the configuration.
///
/// Sources are merged in order of increasing precedence: built in defaults,
/// the YAML file, `PWS_*` environment variables (use `__` to nest, eg.
/// `PWS_SERVER__PORT`) and finally `overrides`.
pub fn load_config(config_file: Option<String>, overrides: CliOverrides) -> Result<AppConfig> {
    let location = resolve_config_path(
        find_in_parent,
        env::current_dir()?,
        OsDirs::config_dir(),
        DEFAULT_CONFIG_NAME,
        config_file.map(PathBuf::from),
    );

    let file_exists = location.path().exists();
    if location.is_explicit() && !file_exists {
        bail!("Configuration file not found: {}", location.path().display());
    }
    debug!(path = %location.path().display(), exists = file_exists, "resolved configuration file");

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Yaml::file(location.path()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(host) = overrides.host {
        figment = figment.merge(Serialized::default("server.host", host));
    }
    if let Some(port) = overrides.port {
        figment = figment.merge(Serialized::default("server.port", port));
    }

    let mut config: AppConfig = figment
        .extract()
        .context("Could not parse configuration")?;
    config.config_file = file_exists.then(|| location.path().to_path_buf());
    config.validate()?;

    Ok(config)
}

pub struct OsDirs;
impl OsDirs {
    /// `~/.config/pws` on linux. Falls back to the cwd on platforms without one.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pws")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(!config.engine().parallel);
        assert_eq!(config.engine().batch_size, 64);
        assert!(config.trace().log);
        assert!(config.trace().include_in_response);
        assert!(config.server().cors_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file() {
        Jail::expect_with(|_jail| {
            let config = load_config(None, CliOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.server(), &ServerConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_NAME,
                r#"
server:
  host: "127.0.0.1"
  port: 7000
  cors_origins:
    - "http://localhost:5173"
engine:
  parallel: true
  batch_size: 8
trace:
  include_in_response: false
"#,
            )?;

            let config = load_config(None, CliOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.bind_address(), "127.0.0.1:7000");
            assert_eq!(config.server().cors_origins, vec!["http://localhost:5173"]);
            assert!(config.engine().parallel);
            assert_eq!(config.engine().batch_size, 8);
            assert!(config.trace().log);
            assert!(!config.trace().include_in_response);
            assert!(config.config_file().is_some());

            jail.set_env("PWS_SERVER__PORT", "7100");
            jail.set_env("PWS_TRACE__LOG", "false");
            let config = load_config(None, CliOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.server().port, 7100);
            assert!(!config.trace().log);

            let config = load_config(
                None,
                CliOverrides {
                    host: Some("localhost".to_string()),
                    port: Some(9000),
                },
            )
            .map_err(|e| e.to_string())?;
            assert_eq!(config.bind_address(), "localhost:9000");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let err = load_config(Some("nope.yaml".to_string()), CliOverrides::default())
                .expect_err("missing explicit file");
            assert!(err.to_string().contains("Configuration file not found"));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "engine:\n  batch_size: 0\n")?;
            let err = load_config(Some("custom.yaml".to_string()), CliOverrides::default())
                .expect_err("batch size zero");
            assert!(err.to_string().contains("batch_size"));

            jail.create_file("unknown.yaml", "engine:\n  turbo: true\n")?;
            assert!(load_config(Some("unknown.yaml".to_string()), CliOverrides::default()).is_err());
            Ok(())
        });
    }
}

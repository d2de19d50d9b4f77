//! Configuration file loading and the `config` subcommand
//!
//! Values resolve in order: CLI flag, environment, `~/.intake/config.toml`,
//! built-in default. Set `INTAKE_CONFIG` to read a different file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use intake_server::db::{redact_password, DEFAULT_MAX_CONNECTIONS};
use intake_server::ServerConfig;

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

/// Values given on the command line (or picked up from env by clap)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: bool,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
}

/// Fully resolved settings for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Settings {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }

    /// Copy safe to print: password in the database URL masked
    pub fn redacted(&self) -> Self {
        Self {
            database_url: self.database_url.as_deref().map(redact_password),
            ..self.clone()
        }
    }
}

impl IntakeConfig {
    /// Path of the config file, honouring `INTAKE_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("INTAKE_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".intake").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Layer command-line overrides on top of the file values.
    pub fn resolve(&self, overrides: Overrides) -> Settings {
        let defaults = ServerConfig::default();

        Settings {
            bind: overrides
                .bind
                .or(self.server.bind)
                .unwrap_or(defaults.bind_addr),
            // A flag can only switch permissive mode on
            cors_permissive: overrides.cors_permissive
                || self.server.cors_permissive.unwrap_or(defaults.cors_permissive),
            database_url: overrides.database_url.or_else(|| self.database.url.clone()),
            max_connections: overrides
                .max_connections
                .or(self.database.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (database password masked)
    Show {
        /// Database URL (overrides config file)
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: Option<String>,
    },
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", IntakeConfig::config_path()?.display());
        }
        ConfigCommands::Show { database_url } => {
            let settings = IntakeConfig::load()?.resolve(Overrides {
                database_url,
                ..Default::default()
            });
            let rendered = toml::to_string_pretty(&settings.redacted())
                .context("Failed to render configuration")?;
            print!("{rendered}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = IntakeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, IntakeConfig::default());

        let settings = config.resolve(Overrides::default());
        assert_eq!(settings.bind.port(), 3030);
        assert!(!settings.cors_permissive);
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn reads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
bind = "0.0.0.0:8080"

[database]
url = "postgres://app:pw@db/intake"
"#
        )
        .unwrap();

        let config = IntakeConfig::load_from(file.path()).unwrap();
        let settings = config.resolve(Overrides::default());
        assert_eq!(settings.bind, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.database_url.as_deref(), Some("postgres://app:pw@db/intake"));
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn flags_override_file() {
        let config = IntakeConfig {
            server: ServerSection {
                bind: Some("0.0.0.0:8080".parse().unwrap()),
                cors_permissive: Some(false),
            },
            database: DatabaseSection {
                url: Some("postgres://file/intake".into()),
                max_connections: Some(20),
            },
        };

        let settings = config.resolve(Overrides {
            bind: Some("127.0.0.1:9000".parse().unwrap()),
            cors_permissive: true,
            database_url: Some("postgres://flag/intake".into()),
            max_connections: None,
        });

        assert_eq!(settings.bind.port(), 9000);
        assert!(settings.cors_permissive);
        assert_eq!(settings.database_url.as_deref(), Some("postgres://flag/intake"));
        assert_eq!(settings.max_connections, 20);
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = 42").unwrap();
        assert!(IntakeConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn redacted_masks_password() {
        let settings = IntakeConfig::default().resolve(Overrides {
            database_url: Some("postgres://app:hunter2@db/intake".into()),
            ..Default::default()
        });
        let shown = settings.redacted();
        assert_eq!(
            shown.database_url.as_deref(),
            Some("postgres://app:****@db/intake")
        );
    }
}

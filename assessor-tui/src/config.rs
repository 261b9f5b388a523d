//! Command line and config file.
//!
//! Settings come from `<config dir>/assessor/config.toml` (or `--config`);
//! command line flags override the file.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use assessor_core::config::{load_or_default, ConfigError};
use assessor_core::ClientConfig;

#[derive(Debug, Default, Parser)]
#[command(name = "assessor", version, about = "Оценка защищённости ПДн и ГИС")]
pub struct Cli {
    /// Config file (default: <config dir>/assessor/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classification service address, e.g. http://localhost:8080
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Write JSON logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive used when `ASSESSOR_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub log: LogSettings,
}

impl Settings {
    /// Read the config file and apply command line overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.clone().or_else(default_config_path);
        let settings = match path {
            Some(path) => load_or_default(&path)?,
            None => Settings::default(),
        };
        Ok(settings.with_overrides(cli))
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.base_url {
            self.client.base_url = url.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.client.timeout_secs = Some(secs);
        }
        if let Some(file) = &cli.log_file {
            self.log.file = Some(file.clone());
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("assessor").join("config.toml"))
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("assessor").join("assessor.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s: Settings = toml::from_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.client.base_url, assessor_core::config::DEFAULT_BASE_URL);
        assert_eq!(s.log.level, "info");
    }

    #[test]
    fn client_keys_are_top_level() {
        let s: Settings = toml::from_str(
            r#"
            base_url = "http://classifier:9000"
            timeout_secs = 15

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(s.client.base_url, "http://classifier:9000");
        assert_eq!(s.client.timeout_secs, Some(15));
        assert_eq!(s.log.level, "debug");
        assert_eq!(s.log.file, None);
    }

    #[test]
    fn flags_override_file() {
        let file: Settings = toml::from_str(r#"base_url = "http://a""#).unwrap();
        let cli = Cli {
            base_url: Some("http://b".into()),
            log_file: Some(PathBuf::from("/tmp/assessor.log")),
            ..Cli::default()
        };
        let s = file.with_overrides(&cli);
        assert_eq!(s.client.base_url, "http://b");
        assert_eq!(s.client.timeout_secs, None);
        assert_eq!(s.log.file, Some(PathBuf::from("/tmp/assessor.log")));
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/assessor/config.toml")),
            ..Cli::default()
        };
        let s = Settings::load(&cli).unwrap();
        assert_eq!(s.client, ClientConfig::default());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["assessor", "--base-url", "http://x", "--timeout-secs", "3"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://x"));
        assert_eq!(cli.timeout_secs, Some(3));
    }
}

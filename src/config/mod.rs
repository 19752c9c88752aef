//! Configuration management for hubpoll

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::fetch::FetchOptions;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Security Hub endpoint (LocalStack or a signing proxy). Defaults to the
    /// regional service endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Incident polling settings
    #[serde(default)]
    pub fetch: FetchOptions,

    /// Run-state file; defaults to `state.json` next to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            fetch: FetchOptions::default(),
            state_path: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".hubpoll").join("config.yaml"))
    }

    /// The explicit path if given, else the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_at(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Endpoint requests are sent to.
    pub fn endpoint_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://securityhub.{}.amazonaws.com", self.region),
        }
    }

    /// Run-state file for a config loaded from `config_path`.
    pub fn state_file(&self, config_path: &Path) -> PathBuf {
        match self.state_path {
            Some(ref path) => path.clone(),
            None => config_path
                .parent()
                .map(|dir| dir.join("state.json"))
                .unwrap_or_else(|| PathBuf::from("state.json")),
        }
    }

    /// Reject settings that would only fail later, mid-poll.
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::Invalid("region must not be empty".to_string()).into());
        }
        if self.fetch.max_results == 0 {
            return Err(ConfigError::Invalid("fetch.max_results must be at least 1".to_string()).into());
        }
        crate::fetch::first_fetch_start(&self.fetch.first_fetch, chrono::Utc::now())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetch::SeverityFloor;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.fetch, FetchOptions::default());
    }

    #[test]
    fn test_endpoint_url() {
        let mut config = Config {
            region: "eu-west-1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint_url(), "https://securityhub.eu-west-1.amazonaws.com");

        config.endpoint = Some("http://localhost:4566/".to_string());
        assert_eq!(config.endpoint_url(), "http://localhost:4566");
    }

    #[test]
    fn test_state_file_defaults_next_to_config() {
        let config = Config::default();
        assert_eq!(
            config.state_file(Path::new("/etc/hubpoll/config.yaml")),
            PathBuf::from("/etc/hubpoll/state.json")
        );

        let config = Config {
            state_path: Some(PathBuf::from("/var/lib/hubpoll/run.json")),
            ..Default::default()
        };
        assert_eq!(
            config.state_file(Path::new("/etc/hubpoll/config.yaml")),
            PathBuf::from("/var/lib/hubpoll/run.json")
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config {
            endpoint: Some("http://localhost:4566".to_string()),
            fetch: FetchOptions {
                severity: SeverityFloor::High,
                ..Default::default()
            },
            ..Default::default()
        };

        config.save_at(&path).unwrap();
        let loaded = Config::load_at(&path).unwrap();

        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_minimal_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "endpoint: http://localhost:4566\nfetch:\n  severity: critical\n").unwrap();

        let config = Config::load_at(&path).unwrap();

        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.fetch.severity, SeverityFloor::Critical);
        assert_eq!(config.fetch.first_fetch, "15 days");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load_at(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound)));
    }

    #[test]
    fn test_load_rejects_bad_first_fetch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "fetch:\n  first_fetch: whenever\n").unwrap();

        let err = Config::load_at(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_bad_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "fetch: [unclosed").unwrap();

        let err = Config::load_at(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }
}

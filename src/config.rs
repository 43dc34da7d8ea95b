//! Service and CLI configuration.
//!
//! Precedence, lowest first: built-in defaults, `template-generator.yaml`,
//! environment (`TEMPLATE_GENERATOR_ROOT`, `HOST`, `PORT`, `.env` honoured),
//! command-line flags.

use crate::codegen::naming::NamingKeys;
use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "template-generator.yaml";

pub const ROOT_ENV: &str = "TEMPLATE_GENERATOR_ROOT";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Project directory that contains `src/app/`
    pub project_root: PathBuf,
    pub host: String,
    pub port: u16,
    /// Wire keys of the naming-convention block
    pub naming_keys: NamingKeys,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            host: "0.0.0.0".to_string(),
            port: 3000,
            naming_keys: NamingKeys::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenerationError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| GenerationError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Defaults, then the config file (explicit, or `template-generator.yaml`
    /// when present), then environment overrides
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ROOT_ENV) {
            self.project_root = PathBuf::from(root);
        }
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port
                .parse()
                .map_err(|_| GenerationError::Config(format!("{} must be a port number, got '{}'", PORT_ENV, port)))?;
        }
        Ok(self)
    }

    /// Address the HTTP service binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template-generator.yaml");
        std::fs::write(
            &path,
            "project_root: /srv/app\nport: 8080\nnaming_keys:\n  plural_pascal: PluralPascal\n",
        )
        .unwrap();

        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.project_root, PathBuf::from("/srv/app"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.naming_keys.plural_pascal, "PluralPascal");
        assert_eq!(config.naming_keys.plural_lower, "users_2_000___");
    }

    #[test]
    fn test_from_file_missing() {
        let err = GeneratorConfig::from_file("/nonexistent/template-generator.yaml").unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ROOT_ENV, "/tmp/project"), (PORT_ENV, "9000")].into_iter().collect();
        let config = GeneratorConfig::default()
            .with_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.project_root, PathBuf::from("/tmp/project"));
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bad_port() {
        let err = GeneratorConfig::default()
            .with_env_from(|k| (k == PORT_ENV).then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}

//! Scanner configuration
//!
//! Loaded from YAML. Precedence, highest first: command-line flags,
//! environment (`GS1_CONFIG`, `GS1_STORE`), the config file, defaults.
//! Relative paths are resolved against the working directory.
//!
//! Parsing fails with [`ConfigError`]; assembling a registry, rule set or
//! session from a parsed config fails with [`Gs1Error`].

use crate::session::ScanSession;
use gs1_classify::{ProviderSelection, RuleSet};
use gs1_core::Gs1Error;
use gs1_registry::{AiRegistry, RegistryFile};
use gs1_store::{JsonFileBackend, ScanStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/scanner.yaml";

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "GS1_CONFIG";

/// Environment variable overriding `store_path`
pub const STORE_ENV: &str = "GS1_STORE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for Gs1Error {
    fn from(err: ConfigError) -> Self {
        Gs1Error::ConfigError(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// JSON record list
    pub store_path: PathBuf,

    /// Provider rules YAML
    pub providers_path: PathBuf,

    /// Manual provider; absent means automatic classification
    pub provider: Option<String>,

    /// Extra AIs layered over the built-in table
    pub registry: RegistryFile,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/scans.json"),
            providers_path: PathBuf::from("config/providers.yaml"),
            provider: None,
            registry: RegistryFile::default(),
        }
    }
}

impl ScannerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, else the default file if present, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Override the store path when `path` is set
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store_path = path;
        }
        self
    }

    /// Override the manual provider when `provider` is set
    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        if provider.is_some() {
            self.provider = provider;
        }
        self
    }

    pub fn selection(&self) -> ProviderSelection {
        ProviderSelection::from_option(self.provider.clone())
    }

    /// Built-in table plus configured extensions
    pub fn build_registry(&self) -> gs1_core::Result<AiRegistry> {
        let mut registry = AiRegistry::builtin();
        registry.extend(
            self.registry.definitions.clone(),
            self.registry.families.clone(),
        )?;
        Ok(registry)
    }

    /// Provider rules; a missing rules file leaves only manual assignment
    pub fn load_rules(&self) -> gs1_core::Result<RuleSet> {
        if !self.providers_path.exists() {
            tracing::warn!(
                path = %self.providers_path.display(),
                "provider rules file not found, automatic classification disabled"
            );
            return Ok(RuleSet::default());
        }
        Ok(RuleSet::load(&self.providers_path)?)
    }

    /// Open the configured store and assemble a session
    pub fn open_session(&self) -> gs1_core::Result<ScanSession> {
        let registry = self.build_registry()?;
        let rules = self.load_rules()?;
        let store = ScanStore::open(JsonFileBackend::new(&self.store_path))?;

        tracing::info!(
            store = %self.store_path.display(),
            providers = rules.len(),
            "scan session ready"
        );
        Ok(ScanSession::new(store, registry, rules).with_selection(self.selection()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs1_registry::LengthClass;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = ScannerConfig::from_yaml("provider: SAI\n").unwrap();
        assert_eq!(config.store_path, PathBuf::from("data/scans.json"));
        assert_eq!(config.selection(), ProviderSelection::Manual("SAI".to_string()));
    }

    #[test]
    fn test_registry_extension() {
        let config = ScannerConfig::from_yaml(
            r#"
registry:
  definitions:
    - code: "7003"
      length_class: fixed
      length: 10
      description: Expiration date and time
"#,
        )
        .unwrap();

        let registry = config.build_registry().unwrap();
        let def = registry.lookup("7003").unwrap();
        assert_eq!(def.length_class, LengthClass::Fixed);
        assert_eq!(def.length, 10);
    }

    #[test]
    fn test_conflicting_extension_rejected() {
        let config = ScannerConfig::from_yaml(
            r#"
registry:
  definitions:
    - code: "01"
      length_class: fixed
      length: 14
      description: GTIN again
"#,
        )
        .unwrap();

        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, Gs1Error::RegistryError(_)));
        assert!(err.to_string().starts_with("REGISTRY/"));
    }

    #[test]
    fn test_unreadable_rules_file_is_a_rules_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let providers_path = dir.path().join("providers.yaml");
        std::fs::write(&providers_path, "providers: [not, a, rule\n").unwrap();

        let config = ScannerConfig {
            providers_path,
            store_path: dir.path().join("scans.json"),
            ..ScannerConfig::default()
        };
        assert!(matches!(config.load_rules(), Err(Gs1Error::RuleSetError(_))));
        assert!(matches!(config.open_session(), Err(Gs1Error::RuleSetError(_))));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = ScannerConfig::resolve(Some(Path::new("/nonexistent/scanner.yaml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::errors::ConfigError;

/// Immutable identity of one agent function.
///
/// Capability tags keep their insertion order and are not deduplicated; the
/// platform receives them exactly as supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionIdentity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// Runtime behavior flags, immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    #[serde(default = "default_auto_register")]
    pub auto_register: bool,
    #[serde(default)]
    pub debug: bool,
}

fn default_platform_url() -> String {
    defaults::PLATFORM_URL.to_string()
}

fn default_auto_register() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            platform_url: default_platform_url(),
            auto_register: true,
            debug: false,
        }
    }
}

/// Complete construction-time configuration for a [`FunctionRuntime`].
///
/// [`FunctionRuntime`]: crate::runtime::FunctionRuntime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(flatten)]
    pub runtime: RuntimeConfig,
}

impl FunctionConfig {
    /// Creates a configuration with defaults for everything except the name.
    ///
    /// Fails when the name is empty; the platform rejects nameless functions
    /// and the SDK refuses to construct one.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }
        Ok(Self {
            name,
            description: String::new(),
            capabilities: Vec::new(),
            runtime: RuntimeConfig::default(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_platform_url(mut self, url: impl Into<String>) -> Self {
        self.runtime.platform_url = url.into();
        self
    }

    pub fn with_auto_register(mut self, auto_register: bool) -> Self {
        self.runtime.auto_register = auto_register;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.runtime.debug = debug;
        self
    }

    /// Loads a configuration from a TOML file.
    pub async fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;

        if config.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }

        Ok(config)
    }

    pub(crate) fn identity(&self) -> FunctionIdentity {
        FunctionIdentity {
            name: self.name.clone(),
            description: self.description.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(FunctionConfig::new("").is_err());
        assert!(FunctionConfig::new("   ").is_err());
    }

    #[test]
    fn defaults_are_applied() {
        let config = FunctionConfig::new("echo").unwrap();
        assert_eq!(config.runtime.platform_url, defaults::PLATFORM_URL);
        assert!(config.runtime.auto_register);
        assert!(!config.runtime.debug);
        assert!(config.capabilities.is_empty());
    }

    #[test]
    fn toml_with_partial_fields_parses() {
        let config: FunctionConfig = toml::from_str(
            r#"
            name = "summarizer"
            capabilities = ["text", "nlp", "text"]
            auto_register = false
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "summarizer");
        // Order preserved, duplicates kept
        assert_eq!(config.capabilities, vec!["text", "nlp", "text"]);
        assert!(!config.runtime.auto_register);
        assert_eq!(config.runtime.platform_url, defaults::PLATFORM_URL);
    }
}

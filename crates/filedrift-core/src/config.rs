use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Glob patterns matched case-insensitively against file names.
    /// Matching files are left out of every inventory.
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".DS_Store".to_string(), "Thumbs.db".to_string()]
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignore_patterns() {
        let config = AppConfig::default();
        assert!(config.ignore_patterns.contains(&".DS_Store".to_string()));
        assert!(config.ignore_patterns.contains(&"Thumbs.db".to_string()));
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for token issuance and validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Upper bound on signing attempts while aligning a token to base64
    /// padding. Each attempt appends one space to the plaintext; two are
    /// enough for Ed25519, anything above is slack.
    pub max_padding_attempts: u32,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            max_padding_attempts: 4,
        }
    }
}

impl ProfilerConfig {
    /// Load profiler configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        tracing::info!("Loading profiler config from: {:?}", path_ref);
        let text = fs::read_to_string(path_ref).map_err(|e| {
            anyhow::anyhow!("Failed to read profiler config file at {:?}: {}", path_ref, e)
        })?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| anyhow::anyhow!("Invalid profiler config at {:?}: {}", path_ref, e))?;
        tracing::info!("Loaded profiler config from: {:?}", path_ref);
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject bounds that would make every issuance fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_padding_attempts == 0 {
            anyhow::bail!("max_padding_attempts must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ProfilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn zero_attempts_is_rejected() {
        assert!(ProfilerConfig::from_toml_str("max_padding_attempts = 0").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_padding_attempts = 8").unwrap();
        let config = ProfilerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_padding_attempts, 8);

        assert!(ProfilerConfig::from_file(file.path().with_extension("missing")).is_err());
    }

    #[test]
    fn profiler_rejects_zero_attempts() {
        use crate::{InMemoryKeyProvider, InMemoryProfileStore, Profiler};

        let zero = ProfilerConfig {
            max_padding_attempts: 0,
        };
        assert!(Profiler::with_config(
            InMemoryProfileStore::new(),
            InMemoryKeyProvider::new(),
            zero
        )
        .is_err());

        let profiler = Profiler::with_config(
            InMemoryProfileStore::new(),
            InMemoryKeyProvider::new(),
            ProfilerConfig {
                max_padding_attempts: 2,
            },
        )
        .unwrap();
        assert_eq!(profiler.config().max_padding_attempts, 2);
    }
}

//! User-facing chain completion settings.

use crate::error::{ChainscopeError, Result};
use chainscope_api::models::{SearchBounds, signature_prefix};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub max_chains: usize,
    pub min_chain_length: usize,
    pub max_chain_length: usize,
    /// Pipe-delimited FQNs, e.g. `java.lang.Object|java.lang.String`
    pub ignored_types: String,
    pub timeout_secs: u64,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            max_chains: 20,
            min_chain_length: 2,
            max_chain_length: 4,
            ignored_types: "java.lang.Object|java.lang.String".to_string(),
            timeout_secs: 3,
        }
    }
}

impl ChainSettings {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Signature prefixes of the ignored types (`java.lang.Object` -> `Ljava/lang/Object`).
    pub fn ignored_type_signatures(&self) -> Vec<String> {
        self.ignored_types
            .split('|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(signature_prefix)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chains == 0 {
            return Err(ChainscopeError::Config(
                "max_chains must be at least 1".to_string(),
            ));
        }
        if self.min_chain_length == 0 {
            return Err(ChainscopeError::Config(
                "min_chain_length must be at least 1".to_string(),
            ));
        }
        if self.max_chain_length < self.min_chain_length {
            return Err(ChainscopeError::Config(format!(
                "max_chain_length ({}) is smaller than min_chain_length ({})",
                self.max_chain_length, self.min_chain_length
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ChainscopeError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Validated search bounds for these settings.
    pub fn to_bounds(&self) -> Result<SearchBounds> {
        self.validate()?;
        Ok(
            SearchBounds::new(self.max_chains, self.min_chain_length, self.max_chain_length)
                .with_excluded_types(self.ignored_type_signatures())
                .with_timeout(Duration::from_secs(self.timeout_secs)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_convert_to_bounds() {
        let bounds = ChainSettings::default().to_bounds().unwrap();
        assert_eq!(bounds.max_chains, 20);
        assert_eq!(bounds.min_depth, 2);
        assert_eq!(bounds.max_depth, 4);
        assert_eq!(bounds.timeout, Duration::from_secs(3));
        assert_eq!(
            bounds.excluded_types,
            vec!["Ljava/lang/Object".to_string(), "Ljava/lang/String".to_string()]
        );
    }

    #[test]
    fn test_ignored_types_skip_blanks() {
        let settings = ChainSettings {
            ignored_types: " java.util.List || ".to_string(),
            ..ChainSettings::default()
        };
        assert_eq!(settings.ignored_type_signatures(), vec!["Ljava/util/List"]);
    }

    #[test]
    fn test_invalid_lengths_rejected() {
        let settings = ChainSettings {
            min_chain_length: 3,
            max_chain_length: 2,
            ..ChainSettings::default()
        };
        assert!(matches!(
            settings.to_bounds(),
            Err(ChainscopeError::Config(_))
        ));

        let settings = ChainSettings {
            min_chain_length: 0,
            ..ChainSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_chains": 5, "timeout_secs": 1}}"#).unwrap();

        let settings = ChainSettings::load(file.path()).unwrap();
        assert_eq!(settings.max_chains, 5);
        assert_eq!(settings.timeout_secs, 1);
        assert_eq!(settings.min_chain_length, 2);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ChainSettings::load(file.path()),
            Err(ChainscopeError::Json(_))
        ));
    }
}

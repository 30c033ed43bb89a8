use serde::{Deserialize, Serialize};

use pyon_codec::EncodeOptions;

use crate::error::{PyonError, Result};
use crate::hash::HashAlgorithm;

/// File extension required by [`crate::to_file`].
pub const DEFAULT_EXTENSION: &str = "pyon";

/// Facade settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyonConfig {
    /// Emit `_protected` attribute values instead of `null`.
    pub enc_protected: bool,
    /// Emit `__private` attribute values instead of `null`.
    pub enc_private: bool,
    /// Digest used by [`crate::Pyon::identifier`].
    pub algorithm: HashAlgorithm,
    /// Extension a save destination must carry, without the dot.
    pub extension: String,
}

impl Default for PyonConfig {
    fn default() -> Self {
        Self {
            enc_protected: false,
            enc_private: false,
            algorithm: HashAlgorithm::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl PyonConfig {
    pub fn with_protected(mut self, enabled: bool) -> Self {
        self.enc_protected = enabled;
        self
    }

    pub fn with_private(mut self, enabled: bool) -> Self {
        self.enc_private = enabled;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new()
            .with_protected(self.enc_protected)
            .with_private(self.enc_private)
    }

    /// Defaults overridden by `PYON_ENC_PROTECTED`, `PYON_ENC_PRIVATE` and
    /// `PYON_HASH_ALGORITHM`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`PyonConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("PYON_ENC_PROTECTED") {
            config.enc_protected = parse_flag("PYON_ENC_PROTECTED", &raw)?;
        }
        if let Some(raw) = lookup("PYON_ENC_PRIVATE") {
            config.enc_private = parse_flag("PYON_ENC_PRIVATE", &raw)?;
        }
        if let Some(raw) = lookup("PYON_HASH_ALGORITHM") {
            config.algorithm = raw.trim().parse()?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(PyonError::InvalidConfig {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

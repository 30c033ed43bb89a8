use serde::{Deserialize, Serialize};

/// Per-call encode settings.
///
/// Attributes whose names start with `_` (protected) or `__` (private) are
/// written as `null` unless the matching flag is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodeOptions {
    #[serde(default)]
    pub enc_protected: bool,
    #[serde(default)]
    pub enc_private: bool,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_protected(mut self, enabled: bool) -> Self {
        self.enc_protected = enabled;
        self
    }

    pub fn with_private(mut self, enabled: bool) -> Self {
        self.enc_private = enabled;
        self
    }

    /// Both tiers emitted verbatim.
    pub fn all() -> Self {
        Self {
            enc_protected: true,
            enc_private: true,
        }
    }
}

use crate::error::Result;
use serde::Deserialize;

/// Runtime switches for a [`Reconciler`](crate::Reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcilerConfig {
    /// Keep a journal of keyed-list patches, drained with `take_patches`
    pub record_patches: bool,
    /// Log a warning when a sibling list repeats a key
    pub warn_on_duplicate_keys: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            record_patches: false,
            warn_on_duplicate_keys: true,
        }
    }
}

impl ReconcilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a JSON document. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_patch_journal(mut self) -> Self {
        self.record_patches = true;
        self
    }
}

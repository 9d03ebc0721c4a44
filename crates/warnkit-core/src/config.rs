//! Configuration for help URL generation.

use serde::{Deserialize, Serialize};

/// Knowledge-base root used when no other root is configured.
pub const DEFAULT_KB_ROOT: &str = "https://kb.example.com/exceptions";

/// Environment variable that overrides the knowledge-base root.
pub const KB_ROOT_ENV: &str = "WARNKIT_KB_ROOT";

/// Options for building warning help URLs.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `kb-root`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HelpUrlConfig {
    /// Knowledge-base root; the warning code is appended as a path segment.
    /// A trailing `/` is ignored.
    pub kb_root: String,
}

impl HelpUrlConfig {
    pub fn new(kb_root: impl Into<String>) -> Self {
        Self {
            kb_root: kb_root.into(),
        }
    }

    /// Default configuration, with the root taken from `WARNKIT_KB_ROOT`
    /// when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(KB_ROOT_ENV) {
            Ok(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    pub(crate) fn root(&self) -> &str {
        self.kb_root.trim_end_matches('/')
    }
}

impl Default for HelpUrlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KB_ROOT)
    }
}

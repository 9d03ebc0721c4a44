//! Warning kinds and their fixed per-kind properties.

use crate::error::WarnError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant for the four warning kinds.
///
/// Everything that differs between kinds (code, name, default message, the
/// composer's verb) is a function of this value and never of instance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Generic warning. Every other kind is also a `Base` warning.
    Base,
    /// A feature that will be deprecated in the future.
    PendingDeprecation,
    /// A feature that has been deprecated.
    Deprecation,
    /// A feature that is unstable and unfit for production use.
    Stability,
}

impl WarningKind {
    pub const ALL: [WarningKind; 4] = [
        WarningKind::Base,
        WarningKind::PendingDeprecation,
        WarningKind::Deprecation,
        WarningKind::Stability,
    ];

    /// Classification code for the kind.
    pub const fn code(self) -> u32 {
        match self {
            WarningKind::Base => 32,
            WarningKind::PendingDeprecation => 33,
            WarningKind::Deprecation => 34,
            WarningKind::Stability => 35,
        }
    }

    /// Kind name, used in `Display` output and as the grouping key.
    pub const fn name(self) -> &'static str {
        match self {
            WarningKind::Base => "Warning",
            WarningKind::PendingDeprecation => "PendingDeprecationWarning",
            WarningKind::Deprecation => "DeprecationWarning",
            WarningKind::Stability => "StabilityWarning",
        }
    }

    /// Message used when a warning is constructed with no arguments.
    pub const fn default_message(self) -> &'static str {
        match self {
            WarningKind::Base => "A warning has occurred.",
            WarningKind::PendingDeprecation => "A feature is pending deprecation.",
            WarningKind::Deprecation => "A feature has been deprecated.",
            WarningKind::Stability => {
                "A feature is unstable and should not be used in production environments."
            }
        }
    }

    /// Subtype test: every kind is a `Base` warning, otherwise kinds only
    /// match themselves.
    pub fn is_a(self, other: WarningKind) -> bool {
        other == WarningKind::Base || self == other
    }

    fn slug(self) -> &'static str {
        match self {
            WarningKind::Base => "base",
            WarningKind::PendingDeprecation => "pending-deprecation",
            WarningKind::Deprecation => "deprecation",
            WarningKind::Stability => "stability",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for WarningKind {
    type Err = WarnError;

    /// Accepts either the kebab-case slug (`pending-deprecation`) or the
    /// kind name (`PendingDeprecationWarning`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WarningKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s || kind.name() == s)
            .ok_or_else(|| WarnError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_fixed_per_kind() {
        let codes: Vec<u32> = WarningKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![32, 33, 34, 35]);
    }

    #[test]
    fn test_is_a_follows_subtyping() {
        for kind in WarningKind::ALL {
            assert!(kind.is_a(WarningKind::Base));
            assert!(kind.is_a(kind));
        }
        assert!(!WarningKind::Base.is_a(WarningKind::Deprecation));
        assert!(!WarningKind::Stability.is_a(WarningKind::Deprecation));
        assert!(!WarningKind::PendingDeprecation.is_a(WarningKind::Deprecation));
    }

    #[test]
    fn test_from_str_accepts_slug_and_name() {
        assert_eq!(
            "pending-deprecation".parse::<WarningKind>().unwrap(),
            WarningKind::PendingDeprecation
        );
        assert_eq!(
            "StabilityWarning".parse::<WarningKind>().unwrap(),
            WarningKind::Stability
        );
        assert!(matches!(
            "fatal".parse::<WarningKind>(),
            Err(WarnError::UnknownKind(s)) if s == "fatal"
        ));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WarningKind::PendingDeprecation).unwrap();
        assert_eq!(json, "\"pending-deprecation\"");
        let kind: WarningKind = serde_json::from_str("\"stability\"").unwrap();
        assert_eq!(kind, WarningKind::Stability);
    }
}

//! Installation and entry health classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health of an installation or a single registration.
///
/// Variants are declared in severity order, so the derived `Ord` is the
/// aggregation order: the highest severity wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    /// Not an installation, or not evaluated
    #[default]
    None,
    /// All evaluated registrations resolve to existing files
    Okay,
    /// At least one registration points at a missing file
    InvalidPath,
    /// Two or more registrations share a filename
    Duplicate,
}

impl HealthStatus {
    /// Whether a node with this classification is an installation the
    /// operator can inspect and edit
    pub fn is_viewable(self) -> bool {
        self != Self::None
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Okay => "okay",
            Self::InvalidPath => "invalid path",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(HealthStatus::None < HealthStatus::Okay);
        assert!(HealthStatus::Okay < HealthStatus::InvalidPath);
        assert!(HealthStatus::InvalidPath < HealthStatus::Duplicate);
        assert_eq!(
            HealthStatus::InvalidPath.max(HealthStatus::Duplicate),
            HealthStatus::Duplicate
        );
    }

    #[test]
    fn test_viewable() {
        assert!(!HealthStatus::None.is_viewable());
        assert!(HealthStatus::Okay.is_viewable());
        assert!(HealthStatus::InvalidPath.is_viewable());
        assert!(HealthStatus::Duplicate.is_viewable());
    }

    #[test]
    fn test_serde_kebab_case() {
        let yaml = serde_yaml_ng::to_string(&HealthStatus::InvalidPath).unwrap();
        assert_eq!(yaml.trim(), "invalid-path");
    }
}

//! Expert and package registration types

use crate::types::HealthStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description prefix that marks a package as disabled
pub const DISABLED_PACKAGE_PREFIX: &str = "__";

/// Section of an installation holding the environment variable macros
pub const ENVIRONMENT_VARIABLES_SECTION: &str = "Environment Variables";

/// Value in the installation base section holding the root directory
pub const ROOT_DIR_KEY: &str = "RootDir";

/// Registration sections of one installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Experts loaded by the IDE (`name = path`)
    Experts,
    /// Experts parked by the operator (`name = path`)
    DisabledExperts,
    /// Design-time packages (`path = description`)
    KnownIdePackages,
    /// Runtime packages (`path = description`)
    KnownPackages,
}

/// How a section encodes the enabled state of its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledMarking {
    /// Every entry of the section has the given enabled state
    Membership(bool),
    /// Entries are disabled when the description carries `__`
    NamePrefix,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Experts,
        Section::DisabledExperts,
        Section::KnownIdePackages,
        Section::KnownPackages,
    ];

    /// Section name relative to the installation's base section
    pub fn store_name(self) -> &'static str {
        match self {
            Self::Experts => "Experts",
            Self::DisabledExperts => "Experts/Disabled",
            Self::KnownIdePackages => "Known IDE Packages",
            Self::KnownPackages => "Known Packages",
        }
    }

    pub fn is_package(self) -> bool {
        matches!(self, Self::KnownIdePackages | Self::KnownPackages)
    }

    pub fn disabled_marking(self) -> DisabledMarking {
        match self {
            Self::Experts => DisabledMarking::Membership(true),
            Self::DisabledExperts => DisabledMarking::Membership(false),
            Self::KnownIdePackages | Self::KnownPackages => DisabledMarking::NamePrefix,
        }
    }

    /// Expert section holding entries with the given enabled state
    pub fn expert_section(enabled: bool) -> Self {
        if enabled {
            Self::Experts
        } else {
            Self::DisabledExperts
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

/// Split a stored package description into display name and enabled flag
pub fn decode_package_name(raw: &str) -> (&str, bool) {
    match raw.strip_prefix(DISABLED_PACKAGE_PREFIX) {
        Some(name) => (name, false),
        None => (raw, true),
    }
}

/// Store form of a package description
pub fn encode_package_name(name: &str, enabled: bool) -> String {
    let (bare, _) = decode_package_name(name);
    if enabled {
        bare.to_string()
    } else {
        format!("{}{}", DISABLED_PACKAGE_PREFIX, bare)
    }
}

/// One expert or package registration as rendered for an installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name (expert key, or package description without `__`)
    pub name: String,

    /// Registered file, possibly containing macros
    pub target_path: String,

    pub enabled: bool,

    pub section: Section,

    pub health: HealthStatus,
}

impl Entry {
    /// Build an entry from a raw `(key, value)` pair of the given section
    pub fn from_store(section: Section, key: &str, value: &str) -> Self {
        match section.disabled_marking() {
            DisabledMarking::Membership(enabled) => Self {
                name: key.to_string(),
                target_path: value.to_string(),
                enabled,
                section,
                health: HealthStatus::None,
            },
            DisabledMarking::NamePrefix => {
                let (name, enabled) = decode_package_name(value);
                Self {
                    name: name.to_string(),
                    target_path: key.to_string(),
                    enabled,
                    section,
                    health: HealthStatus::None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_disabled_package() {
        assert_eq!(decode_package_name("__Foo"), ("Foo", false));
        assert_eq!(decode_package_name("Foo"), ("Foo", true));
        assert_eq!(decode_package_name("_Foo"), ("_Foo", true));
    }

    #[test]
    fn test_encode_package_name_is_idempotent() {
        assert_eq!(encode_package_name("Foo", false), "__Foo");
        assert_eq!(encode_package_name("__Foo", false), "__Foo");
        assert_eq!(encode_package_name("__Foo", true), "Foo");
    }

    #[test]
    fn test_entry_from_package_pair() {
        let entry = Entry::from_store(
            Section::KnownPackages,
            r"$(BDSBIN)\dclfoo.bpl",
            "__Foo Components",
        );
        assert_eq!(entry.name, "Foo Components");
        assert_eq!(entry.target_path, r"$(BDSBIN)\dclfoo.bpl");
        assert!(!entry.enabled);
    }

    #[test]
    fn test_entry_from_disabled_expert_pair() {
        let entry = Entry::from_store(Section::DisabledExperts, "GExperts", r"C:\GExperts\g.dll");
        assert_eq!(entry.name, "GExperts");
        assert!(!entry.enabled);
        assert_eq!(Section::expert_section(false), Section::DisabledExperts);
    }
}

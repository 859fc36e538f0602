//! Error types for expertmgr-core

use thiserror::Error;

/// Result type alias using expertmgr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Expert Manager
#[derive(Error, Debug)]
pub enum Error {
    /// A store path could not be enumerated
    #[error("Store path unavailable: {path}")]
    StoreUnavailable { path: String },

    /// The backing store rejected an operation
    #[error("Store error: {message}")]
    Store { message: String },

    /// A write-then-delete pair failed partway
    #[error(
        "Mutation conflict for '{entry}': written to '{written_to}' but could not be removed from '{stale_in}'{}: {source}",
        if *rolled_back { " (write rolled back)" } else { "" }
    )]
    MutationConflict {
        entry: String,
        written_to: String,
        stale_in: String,
        rolled_back: bool,
        #[source]
        source: Box<Error>,
    },

    /// Logical path does not address a version-level installation
    #[error("Not an installation: {path}. Expected vendor/family/version")]
    NotAnInstallation { path: String },

    /// Operation is not valid for the given section
    #[error("Invalid section for this operation: {section}")]
    InvalidSection { section: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a store unavailable error
    pub fn store_unavailable(path: impl Into<String>) -> Self {
        Self::StoreUnavailable { path: path.into() }
    }

    /// Create a generic store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a mutation conflict error
    pub fn mutation_conflict(
        entry: impl Into<String>,
        written_to: impl Into<String>,
        stale_in: impl Into<String>,
        rolled_back: bool,
        source: Error,
    ) -> Self {
        Self::MutationConflict {
            entry: entry.into(),
            written_to: written_to.into(),
            stale_in: stale_in.into(),
            rolled_back,
            source: Box::new(source),
        }
    }

    /// Create a not-an-installation error
    pub fn not_an_installation(path: impl Into<String>) -> Self {
        Self::NotAnInstallation { path: path.into() }
    }

    /// Create an invalid section error
    pub fn invalid_section(section: impl Into<String>) -> Self {
        Self::InvalidSection {
            section: section.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the presentation layer must re-sync from the store
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MutationConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_conflict_message_mentions_rollback() {
        let err = Error::mutation_conflict(
            "MyExpert",
            "Experts/Disabled",
            "Experts",
            true,
            Error::store("access denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("MyExpert"));
        assert!(msg.contains("rolled back"));
        assert!(msg.contains("access denied"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_store_unavailable_is_not_conflict() {
        let err = Error::store_unavailable("Software/Borland");
        assert!(!err.is_conflict());
        assert_eq!(err.to_string(), "Store path unavailable: Software/Borland");
    }
}

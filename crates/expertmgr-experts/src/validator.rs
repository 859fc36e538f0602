//! Installation validation
//!
//! Classifies one installation by checking its registrations for missing
//! files and for filenames registered more than once. The three logical
//! sections (experts, known IDE packages, known packages) are classified
//! independently and the most severe result wins.

use crate::macros::{MacroTable, PathResolver};
use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::types::{decode_package_name, HealthStatus, InstallationPath, Section};
use expertmgr_core::utils::{duplicate_key, file_name_component};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Per-section outcome of validating one installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub experts: HealthStatus,
    pub known_ide_packages: HealthStatus,
    pub known_packages: HealthStatus,

    /// Disabled experts read while validating; they never affect health
    pub disabled_experts: usize,
}

impl ValidationReport {
    /// Most severe section classification
    pub fn overall(&self) -> HealthStatus {
        self.experts
            .max(self.known_ide_packages)
            .max(self.known_packages)
    }
}

/// Validates installations against a store and a file probe
pub struct Validator<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> {
    store: &'a S,
    probe: &'a P,
    root: String,
}

impl<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> Validator<'a, S, P> {
    pub fn new(store: &'a S, probe: &'a P, root: impl Into<String>) -> Self {
        Self {
            store,
            probe,
            root: root.into(),
        }
    }

    /// Overall health of one installation
    pub fn validate(&self, installation: &InstallationPath) -> HealthStatus {
        self.report(installation).overall()
    }

    /// Health of each section of one installation
    pub fn report(&self, installation: &InstallationPath) -> ValidationReport {
        let base = installation.store_path(&self.root);
        let resolver = PathResolver::new(MacroTable::build_for(self.store, &base), self.probe);

        let experts = self.read_section(&base, Section::Experts);
        let experts_health = classify(&resolver, experts.iter().map(|(_, path)| path.as_str()));

        // Disabled experts are only inspected for their filenames.
        let disabled = self.read_section(&base, Section::DisabledExperts);
        for (name, path) in &disabled {
            trace!(
                "Disabled expert {} ({}) not evaluated",
                name,
                file_name_component(path)
            );
        }

        let report = ValidationReport {
            experts: experts_health,
            known_ide_packages: self.classify_packages(&resolver, &base, Section::KnownIdePackages),
            known_packages: self.classify_packages(&resolver, &base, Section::KnownPackages),
            disabled_experts: disabled.len(),
        };
        debug!("Validated {}: {}", installation, report.overall());
        report
    }

    fn classify_packages(
        &self,
        resolver: &PathResolver<'_, P>,
        base: &str,
        section: Section,
    ) -> HealthStatus {
        let packages = self.read_section(base, section);
        classify(
            resolver,
            packages
                .iter()
                .filter(|(_, description)| decode_package_name(description).1)
                .map(|(path, _)| path.as_str()),
        )
    }

    fn read_section(&self, base: &str, section: Section) -> Vec<(String, String)> {
        self.store
            .enumerate_keys(base, section.store_name())
            .unwrap_or_else(|e| {
                warn!("Could not read {} of {}: {}", section, base, e);
                Vec::new()
            })
    }
}

/// Classify one section's registered paths.
///
/// A missing file marks the section `InvalidPath` unless it is already more
/// severe; the first repeated filename marks it `Duplicate` and ends the scan.
fn classify<'p, P: FileProbe + ?Sized>(
    resolver: &PathResolver<'_, P>,
    paths: impl IntoIterator<Item = &'p str>,
) -> HealthStatus {
    let mut health = HealthStatus::Okay;
    let mut seen = HashSet::new();
    for path in paths {
        if health == HealthStatus::Okay && !resolver.exists(path) {
            health = HealthStatus::InvalidPath;
        }
        if !seen.insert(duplicate_key(path)) {
            trace!("Duplicate filename: {}", file_name_component(path));
            return HealthStatus::Duplicate;
        }
    }
    health
}
